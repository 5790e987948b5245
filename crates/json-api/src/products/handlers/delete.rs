//! Delete Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let id = id.into_inner();

    state
        .app
        .products
        .delete_product(id.into())
        .await
        .map_err(into_status_error)?;

    info!(product_id = %id, "deleted product");

    Ok(StatusCode::NO_CONTENT)
}
