use serde::{Deserialize, Serialize};

use mercado_core::{Entity, LotId};
use mercado_products::Product;

/// A batch of items of one product.
///
/// The lot holds its own copy of the product; no lifecycle rule ties the two
/// together and nothing here validates the product or the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub product: Product,
    pub item_count: u32,
}

impl Lot {
    pub fn new(id: LotId, product: Product, item_count: u32) -> Self {
        Self {
            id,
            product,
            item_count,
        }
    }
}

impl Entity for Lot {
    type Id = LotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
