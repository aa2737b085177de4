//! Logging infrastructure for Parapet.
//!
//! Structured logs go to stderr, either as JSON lines or in a pretty
//! human-readable layout, so that reports written to stdout stay clean.
//!
//! # Usage
//!
//! ```ignore
//! use parapet_telemetry::{LogFormat, TelemetryConfig};
//!
//! let config = TelemetryConfig::new()
//!     .with_log_level("debug")
//!     .with_log_format(LogFormat::Json);
//!
//! parapet_telemetry::init(&config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::{events, init_logging};

use thiserror::Error;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),

    /// The configured log level is not a valid filter directive.
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
}

/// Initialize logging from `config`.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    logging::init_logging(config)?;
    tracing::debug!(
        service = %config.service_name,
        level = %config.log_level,
        format = ?config.log_format,
        "logging initialized"
    );
    Ok(())
}
