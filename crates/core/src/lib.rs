//! `mercado-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the entity/identity model, the store contract shared by every entity type,
//! and the domain error taxonomy.

pub mod entity;
pub mod error;
pub mod id;
pub mod store;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{LotId, ProductId};
pub use store::IdentityStore;
