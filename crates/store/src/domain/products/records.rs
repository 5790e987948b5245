//! Product Records

use crate::{
    schemas::{ProductIn, Record, RecordMeta},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub meta: RecordMeta<Product>,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub status: bool,
}

impl Record for Product {
    type Kind = Product;

    fn meta(&self) -> &RecordMeta<Product> {
        &self.meta
    }
}

impl From<ProductIn> for Product {
    fn from(product: ProductIn) -> Self {
        Self {
            meta: product.meta,
            name: product.name,
            quantity: product.quantity,
            price: product.price,
            status: product.status,
        }
    }
}
