//! Identity-keyed store contract shared by every entity type.

use std::sync::Arc;

use crate::entity::Entity;
use crate::error::DomainResult;

/// Append/lookup/update/delete container keyed by an entity's identity.
///
/// Semantics every implementation must uphold:
///
/// - Enumeration order is insertion order. Replacing an entity (via `save` of an
///   existing id, or `update`) keeps its original position.
/// - Identities are caller-supplied; at most one entity is stored per id.
/// - The store never inspects or validates entity content.
///
/// Methods take `&self` so one store can be shared (e.g. behind `Arc`) by the
/// pipeline and its callers.
pub trait IdentityStore<E: Entity>: Send + Sync {
    /// Insert `entity`, or replace in place if its id is already stored.
    fn save(&self, entity: E) -> DomainResult<E>;

    /// Fails with `DomainError::NotFound` when no entity has `id`.
    fn find(&self, id: &E::Id) -> DomainResult<E>;

    /// All stored entities in insertion order.
    fn find_all(&self) -> DomainResult<Vec<E>>;

    /// Replace the stored entity sharing `entity`'s id.
    ///
    /// Fails with `DomainError::NotFound` when the id is absent; never inserts.
    fn update(&self, entity: E) -> DomainResult<E>;

    /// Remove the entity with `entity`'s id.
    ///
    /// Fails with `DomainError::NotFound` when the id is absent.
    fn delete(&self, entity: &E) -> DomainResult<()>;

    /// Remove every entity. Idempotent.
    fn delete_all(&self) -> DomainResult<()>;
}

impl<E, S> IdentityStore<E> for Arc<S>
where
    E: Entity,
    S: IdentityStore<E> + ?Sized,
{
    fn save(&self, entity: E) -> DomainResult<E> {
        (**self).save(entity)
    }

    fn find(&self, id: &E::Id) -> DomainResult<E> {
        (**self).find(id)
    }

    fn find_all(&self) -> DomainResult<Vec<E>> {
        (**self).find_all()
    }

    fn update(&self, entity: E) -> DomainResult<E> {
        (**self).update(entity)
    }

    fn delete(&self, entity: &E) -> DomainResult<()> {
        (**self).delete(entity)
    }

    fn delete_all(&self) -> DomainResult<()> {
        (**self).delete_all()
    }
}
