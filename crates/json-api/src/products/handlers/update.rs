//! Update Product Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use store::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
};

/// Update Product Request
///
/// Absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            quantity: request.quantity,
            price: request.price,
            status: request.status,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, json, depot),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let id = id.into_inner();

    tracing::Span::current().record("product_id", tracing::field::display(id));

    let product = state
        .app
        .products
        .update_product(id.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
