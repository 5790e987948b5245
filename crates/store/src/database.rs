//! Database connection management

use async_trait::async_trait;
use mockall::automock;
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    error::Error,
};
use thiserror::Error;
use tracing::debug;

/// Collection name prefix reserved for server internals.
pub const SYSTEM_COLLECTION_PREFIX: &str = "system";

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid connection settings")]
    Client(#[source] Error),

    #[error("no database name configured and none in the connection string")]
    NoDatabase,
}

#[derive(Debug, Clone)]
pub struct Db {
    client: Client,
    database: Database,
}

impl Db {
    #[must_use]
    pub fn new(client: Client, database: Database) -> Self {
        Self { client, database }
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    #[must_use]
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    /// Round-trip a `ping` command to the server.
    ///
    /// # Errors
    ///
    /// Returns an error when the server cannot be reached.
    pub async fn ping(&self) -> Result<(), Error> {
        self.database.run_command(doc! { "ping": 1 }).await?;

        Ok(())
    }

    /// Delete every document from every non-system collection.
    ///
    /// Returns the number of documents removed. Stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns an error when listing or clearing a collection fails.
    pub async fn purge_collections(&self) -> Result<u64, Error> {
        let mut removed = 0;

        for name in self.database.list_collection_names().await? {
            if is_system_collection(&name) {
                continue;
            }

            let deleted = self.collection(&name).delete_many(doc! {}).await?.deleted_count;

            debug!(collection = %name, deleted, "purged collection");

            removed += deleted;
        }

        Ok(removed)
    }
}

/// Liveness probe for the backing database.
#[automock]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Round-trip a ping to the server.
    async fn ping(&self) -> Result<(), Error>;
}

#[async_trait]
impl DatabaseHealth for Db {
    async fn ping(&self) -> Result<(), Error> {
        Db::ping(self).await
    }
}

/// Whether `name` is reserved and exempt from purging.
#[must_use]
pub fn is_system_collection(name: &str) -> bool {
    name.starts_with(SYSTEM_COLLECTION_PREFIX)
}

/// Connect to MongoDB.
///
/// `database` falls back to the default database named in `url`.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or names no database.
pub async fn connect(url: &str, database: Option<&str>) -> Result<Db, ConnectError> {
    let client = Client::with_uri_str(url)
        .await
        .map_err(ConnectError::Client)?;

    let database = match database {
        Some(name) => client.database(name),
        None => client.default_database().ok_or(ConnectError::NoDatabase)?,
    };

    Ok(Db::new(client, database))
}
