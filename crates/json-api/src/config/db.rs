//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `MongoDB` connection string
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "mongodb://localhost:27017/store"
    )]
    pub database_url: String,

    /// Database name, overriding the one in the connection string
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,
}
