//! Create Product Handler

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use store::schemas::{ProductIn, Record};

use crate::{extensions::*, products::errors::into_status_error};

/// Create Product Request
///
/// Documents the accepted body. Validation itself runs on the raw JSON so
/// that lenient spellings (`"10"`, `10.0`, `"yes"`) are coerced rather than
/// rejected.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Version 4 UUID; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// RFC 3339 timestamp with offset; defaults to now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// RFC 3339 timestamp with offset; defaults to `created_at`'s instant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Display name
    pub name: String,

    /// Units in stock; whole floats and integer strings are accepted
    pub quantity: i64,

    /// Unit price; numeric strings are accepted
    pub price: f64,

    /// Whether the product is active; `0`/`1` and yes/no spellings are accepted
    pub status: bool,
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Created product UUID
    pub id: Uuid,
}

/// Create Product Handler
///
/// Accepts `name`, `quantity`, `price` and `status`, plus optional `id`,
/// `created_at` and `updated_at`.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    request_body = CreateProductRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let body = req.parse_json::<Value>().await.or_400()?;
    let product = ProductIn::from_json(body).or_400()?;

    let id = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?
        .id();

    res.add_header(LOCATION, format!("/products/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(product_id = %id, "created product");

    Ok(Json(ProductCreatedResponse { id: id.into_uuid() }))
}
