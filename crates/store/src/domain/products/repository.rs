//! Products Repository

use futures::TryStreamExt;
use jiff::Timestamp;
use mongodb::{
    Collection,
    bson::{DateTime, Document, doc},
    options::ReturnDocument,
};

use crate::{
    database::Db,
    domain::products::{
        data::ProductUpdate,
        errors::ProductsServiceError,
        records::{Product, ProductUuid},
    },
    schemas::{ProductIn, RecordMeta},
};

pub(crate) const PRODUCTS_COLLECTION: &str = "products";

#[derive(Debug, Clone)]
pub(crate) struct MongoProductsRepository {
    collection: Collection<Document>,
}

impl MongoProductsRepository {
    #[must_use]
    pub(crate) fn new(db: &Db) -> Self {
        Self {
            collection: db.collection(PRODUCTS_COLLECTION),
        }
    }

    pub(crate) async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let documents: Vec<Document> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?
            .try_collect()
            .await?;

        documents.into_iter().map(Product::try_from).collect()
    }

    pub(crate) async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<Product>, ProductsServiceError> {
        self.collection
            .find_one(id_filter(product))
            .await?
            .map(Product::try_from)
            .transpose()
    }

    pub(crate) async fn create_product(
        &self,
        product: ProductIn,
    ) -> Result<Product, ProductsServiceError> {
        let document = to_document(&Product::from(product));

        self.collection.insert_one(&document).await?;

        // Timestamps come back at the stored millisecond precision.
        Product::try_from(document)
    }

    pub(crate) async fn update_product(
        &self,
        product: ProductUuid,
        update: &ProductUpdate,
        updated_at: Timestamp,
    ) -> Result<Option<Product>, ProductsServiceError> {
        let mut set = doc! { "updated_at": to_bson_datetime(updated_at) };

        if let Some(name) = &update.name {
            set.insert("name", name.as_str());
        }

        if let Some(quantity) = update.quantity {
            set.insert("quantity", quantity);
        }

        if let Some(price) = update.price {
            set.insert("price", price);
        }

        if let Some(status) = update.status {
            set.insert("status", status);
        }

        self.collection
            .find_one_and_update(id_filter(product), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .map(Product::try_from)
            .transpose()
    }

    pub(crate) async fn delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<u64, ProductsServiceError> {
        let deleted = self
            .collection
            .delete_one(id_filter(product))
            .await?
            .deleted_count;

        Ok(deleted)
    }
}

fn id_filter(product: ProductUuid) -> Document {
    doc! { "_id": product.to_string() }
}

fn to_bson_datetime(timestamp: Timestamp) -> DateTime {
    DateTime::from_millis(timestamp.as_millisecond())
}

fn from_bson_datetime(datetime: DateTime) -> Result<Timestamp, ProductsServiceError> {
    Timestamp::from_millisecond(datetime.timestamp_millis())
        .map_err(|_| ProductsServiceError::InvalidData)
}

fn to_document(product: &Product) -> Document {
    doc! {
        "_id": product.meta.id.to_string(),
        "created_at": to_bson_datetime(product.meta.created_at),
        "updated_at": to_bson_datetime(product.meta.updated_at),
        "name": product.name.as_str(),
        "quantity": product.quantity,
        "price": product.price,
        "status": product.status,
    }
}

impl TryFrom<Document> for Product {
    type Error = ProductsServiceError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        let id = document
            .get_str("_id")?
            .parse::<ProductUuid>()
            .map_err(|_| ProductsServiceError::InvalidData)?;

        Ok(Self {
            meta: RecordMeta {
                id,
                created_at: from_bson_datetime(*document.get_datetime("created_at")?)?,
                updated_at: from_bson_datetime(*document.get_datetime("updated_at")?)?,
            },
            name: document.get_str("name")?.to_string(),
            quantity: document.get_i64("quantity")?,
            price: document.get_f64("price")?,
            status: document.get_bool("status")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::schemas::Record;

    use super::*;

    fn make_product() -> Product {
        Product {
            meta: RecordMeta::new(),
            name: "Desk Lamp".to_string(),
            quantity: 3,
            price: 19.99,
            status: true,
        }
    }

    #[test]
    fn documents_key_products_by_uuid_string() {
        let product = make_product();
        let document = to_document(&product);

        assert_eq!(
            document.get_str("_id").ok(),
            Some(product.id().to_string().as_str())
        );
    }

    #[test]
    fn document_round_trip_keeps_business_fields() -> TestResult {
        let product = make_product();
        let decoded = Product::try_from(to_document(&product))?;

        assert_eq!(decoded.id(), product.id());
        assert_eq!(decoded.name, product.name);
        assert_eq!(decoded.quantity, product.quantity);
        assert!((decoded.price - product.price).abs() < f64::EPSILON);
        assert_eq!(decoded.status, product.status);
        assert_eq!(
            decoded.created_at().as_millisecond(),
            product.created_at().as_millisecond()
        );

        Ok(())
    }

    #[test]
    fn decoded_timestamps_are_truncated_to_milliseconds() -> TestResult {
        let mut product = make_product();
        product.meta.created_at = "2026-10-16T01:41:59.978980908Z".parse()?;
        product.meta.updated_at = product.meta.created_at;

        let stored = Product::try_from(to_document(&product))?;

        assert_eq!(
            stored.created_at(),
            "2026-10-16T01:41:59.978Z".parse::<Timestamp>()?
        );
        assert_eq!(stored.updated_at(), stored.created_at());
        assert_eq!(Product::try_from(to_document(&stored))?, stored);

        Ok(())
    }

    #[test]
    fn malformed_id_is_invalid_data() {
        let mut document = to_document(&make_product());
        document.insert("_id", "not-a-uuid");

        let result = Product::try_from(document);

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[test]
    fn missing_status_is_invalid_data() {
        let mut document = to_document(&make_product());
        document.remove("status");

        let result = Product::try_from(document);

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
