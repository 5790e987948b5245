//! Products Data

/// Partial Product Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub status: Option<bool>,
}

impl ProductUpdate {
    /// Whether no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.status.is_none()
    }
}
