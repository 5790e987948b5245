//! Product Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::get::ProductResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products, oldest first
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns a list of products.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::io;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use store::domain::products::{MockProductsService, ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{Allow, make_product, products_service, strict_products_mock};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut repo = strict_products_mock(Allow::List);

        repo.expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        let response: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(response.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_keeps_service_order() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut repo = strict_products_mock(Allow::List);

        repo.expect_list_products()
            .once()
            .return_once(move || Ok(vec![make_product(uuid_a), make_product(uuid_b)]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].id, uuid_a.into_uuid());
        assert_eq!(response.products[1].id, uuid_b.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut repo = strict_products_mock(Allow::List);

        repo.expect_list_products().once().return_once(|| {
            Err(ProductsServiceError::Storage(
                io::Error::other("connection reset").into(),
            ))
        });

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
