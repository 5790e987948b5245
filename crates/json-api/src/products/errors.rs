//! Product Errors

use salvo::http::StatusError;
use tracing::{debug, error};

use store::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::NotFound => {
            debug!("product not found");

            StatusError::not_found().brief("Product not found")
        }
        ProductsServiceError::Storage(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
