//! Product update pipeline (application-level orchestration).
//!
//! ```text
//! candidate Product
//!   ↓
//! 1. price > 0
//!   ↓
//! 2. name non-empty
//!   ↓
//! 3. manufacturer non-empty
//!   ↓
//! 4. barcode: format → country → manufacturer code → check digit
//!   ↓
//! 5. IdentityStore::update(candidate)
//! ```
//!
//! The whole candidate is validated on every call, not just the changed
//! fields. The first failing step is reported and the store is left untouched.

use mercado_core::{DomainError, DomainResult, IdentityStore};

use crate::barcode::BarcodeRules;
use crate::product::Product;

/// Validates candidate products and commits the valid ones to a store.
#[derive(Debug)]
pub struct ProductUpdatePipeline<S> {
    store: S,
    rules: BarcodeRules,
}

impl<S> ProductUpdatePipeline<S>
where
    S: IdentityStore<Product>,
{
    /// Pipeline with the default barcode rules.
    pub fn new(store: S) -> Self {
        Self::with_rules(store, BarcodeRules::default())
    }

    pub fn with_rules(store: S, rules: BarcodeRules) -> Self {
        Self { store, rules }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rules(&self) -> &BarcodeRules {
        &self.rules
    }

    /// Run every check without committing.
    pub fn validate(&self, candidate: &Product) -> DomainResult<()> {
        // `!(x > 0)` also rejects NaN.
        if !(candidate.price > 0.0) {
            return Err(DomainError::InvalidPrice);
        }
        if candidate.name.is_empty() {
            return Err(DomainError::InvalidName);
        }
        if candidate.manufacturer.is_empty() {
            return Err(DomainError::InvalidManufacturer);
        }
        self.rules.validate(&candidate.barcode)
    }

    /// Validate `candidate` and, if every check passes, replace the stored
    /// product with the same id.
    ///
    /// Fails with the first violated rule, or with `DomainError::NotFound` when
    /// no product with that id is stored.
    pub fn update(&self, candidate: Product) -> DomainResult<Product> {
        if let Err(err) = self.validate(&candidate) {
            tracing::warn!(product_id = %candidate.id, error = %err, "product update rejected");
            return Err(err);
        }

        let stored = self.store.update(candidate)?;
        tracing::info!(product_id = %stored.id, "product updated");
        Ok(stored)
    }
}
