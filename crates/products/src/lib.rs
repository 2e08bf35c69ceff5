//! Products domain module.
//!
//! Business rules for products: the product record, barcode validation and the
//! update pipeline that commits validated products to an identity store.

pub mod barcode;
pub mod product;
pub mod update;

pub use barcode::{check_digit, BarcodeRules};
pub use product::Product;
pub use update::ProductUpdatePipeline;
