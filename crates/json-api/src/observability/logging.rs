//! Logging subscriber initialisation.

use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, ServerConfig};

use super::ObservabilityError;

/// Noisy dependencies held back unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: [&str; 3] = ["hyper=warn", "mongodb=warn", "salvo_core=info"];

pub(crate) fn init_subscriber(config: &ServerConfig) -> Result<(), ObservabilityError> {
    let logging = &config.logging;
    let filter = build_env_filter(&logging.log_level);

    match logging.log_format {
        LogFormat::Compact => install(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(logging.log_color)
                .with_target(true)
                .with_line_number(true),
            filter,
        ),
        LogFormat::Json => install(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_target(true),
            filter,
        ),
    }
}

fn default_directives(level: &str) -> String {
    std::iter::once(level)
        .chain(QUIET_TARGETS)
        .collect::<Vec<_>>()
        .join(",")
}

/// `RUST_LOG` directives win; a bare level falls back to the quiet defaults.
fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_ignored| EnvFilter::new(default_directives(level)))
}

fn install<L>(layer: L, filter: EnvFilter) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
