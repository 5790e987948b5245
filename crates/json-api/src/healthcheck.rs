//! Store JSON API Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extensions::*;

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every dependency answers, `degraded` otherwise
    pub status: String,

    /// `up` or `down`
    pub database: String,

    /// Running server version
    pub version: String,
}

/// Healthcheck handler
///
/// Pings the database; answers `503` while it is unreachable.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service healthy"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let (status, database) = match state.app.database.ping().await {
        Ok(()) => ("ok", "up"),
        Err(error) => {
            warn!("database ping failed: {error}");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            ("degraded", "down")
        }
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
