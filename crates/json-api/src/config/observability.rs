//! Logging Config

use clap::{ArgAction, Args, ValueEnum};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Base log level; ignored when `RUST_LOG` holds full directives
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Colour compact output with ANSI escapes
    #[arg(long, env = "LOG_COLOR", action = ArgAction::Set, default_value_t = true)]
    pub log_color: bool,
}
