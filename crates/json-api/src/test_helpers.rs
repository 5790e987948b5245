//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::uuid;

use store::{
    context::AppContext,
    database::MockDatabaseHealth,
    domain::products::{
        MockProductsService,
        records::{Product, ProductUuid},
    },
    schemas::RecordMeta,
};

use crate::state::State;

pub(crate) const PRODUCT_ID: ProductUuid =
    ProductUuid::from_uuid(uuid!("ddc287ef-ab93-4ef5-8336-78883c422f6a"));

/// The one service operation a handler under test may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Allow {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// Products mock that fails the test on any call outside `allow`.
///
/// Expectations for the allowed operation are left to the caller; without
/// one, that operation fails too.
pub(crate) fn strict_products_mock(allow: Allow) -> MockProductsService {
    let mut products = MockProductsService::new();

    if allow != Allow::List {
        products.expect_list_products().never();
    }

    if allow != Allow::Get {
        products.expect_get_product().never();
    }

    if allow != Allow::Create {
        products.expect_create_product().never();
    }

    if allow != Allow::Update {
        products.expect_update_product().never();
    }

    if allow != Allow::Delete {
        products.expect_delete_product().never();
    }

    products
}

pub(crate) fn make_product(id: ProductUuid) -> Product {
    Product {
        meta: RecordMeta {
            id,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        name: "Iphone 14 Pro Max".to_string(),
        quantity: 10,
        price: 8.5,
        status: true,
    }
}

pub(crate) fn state_with(
    products: MockProductsService,
    database: MockDatabaseHealth,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        database: Arc::new(database),
    })
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    let mut database = MockDatabaseHealth::new();

    database.expect_ping().never();

    state_with(products, database)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}
