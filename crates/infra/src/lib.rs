//! Infrastructure layer: in-memory storage backing the domain stores.

pub mod store;

pub use store::InMemoryIdentityStore;
