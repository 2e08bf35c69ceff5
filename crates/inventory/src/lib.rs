//! Inventory domain module.
//!
//! Lots: batches of items referencing one product. Lots are stored through
//! their own identity store and are not validated by the product pipeline.

pub mod lot;

pub use lot::Lot;
