use serde::{Deserialize, Serialize};

use mercado_core::{Entity, ProductId};

/// Product entity.
///
/// A plain record: fields are public so a boundary layer can populate a full
/// candidate. Field validity is enforced when a candidate goes through
/// [`crate::ProductUpdatePipeline`], not on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub manufacturer: String,
    /// Unit price; must be strictly positive to be accepted.
    pub price: f64,
    /// 13-digit EAN-13-style code.
    pub barcode: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        price: f64,
        barcode: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            manufacturer: manufacturer.into(),
            price,
            barcode: barcode.into(),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
