//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, ConnectError, DatabaseHealth},
    domain::products::{MongoProductsService, ProductsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to configure database client")]
    Connect(#[from] ConnectError),

    #[error("failed to reach database")]
    Ping(#[source] mongodb::error::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub database: Arc<dyn DatabaseHealth>,
}

impl AppContext {
    /// Build application context from a connection string and database name.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection settings are invalid or the
    /// server does not answer a ping.
    pub async fn from_database_url(url: &str, database: Option<&str>) -> Result<Self, AppInitError> {
        let db = database::connect(url, database).await?;

        db.ping().await.map_err(AppInitError::Ping)?;

        info!(database = db.database().name(), "connected to database");

        Ok(Self {
            products: Arc::new(MongoProductsService::new(&db)),
            database: Arc::new(db),
        })
    }
}
