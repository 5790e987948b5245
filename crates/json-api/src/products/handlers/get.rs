//! Get Product Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use store::{domain::products::records::Product, schemas::Record};

use crate::{extensions::*, products::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,

    /// Display name
    pub name: String,

    /// Units in stock
    pub quantity: i64,

    /// Unit price
    pub price: f64,

    /// Whether the product is active
    pub status: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id().into_uuid(),
            created_at: product.created_at().to_string(),
            updated_at: product.updated_at().to_string(),
            name: product.name,
            quantity: product.quantity,
            price: product.price,
            status: product.status,
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = state
        .app
        .products
        .get_product(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
