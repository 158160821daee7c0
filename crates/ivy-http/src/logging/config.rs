//! # Logging Configuration
//!
//! Subscriber setup for the ivy framework. Router diagnostics are emitted
//! through `tracing`; this module installs the process-wide subscriber
//! that receives them.

use ivy_core::Environment;
use std::io;
use thiserror::Error;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the global subscriber
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Output format of the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Logging configuration for the ivy framework
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    pub format: LogFormat,
    /// Include file and line number information
    pub include_location: bool,
    /// Environment filter (supports complex filters like "ivy_http=debug,tokio=info")
    pub env_filter: Option<String>,
    /// Service name logged once the subscriber is installed
    pub service_name: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
            env_filter: None,
            service_name: None,
        }
    }
}

impl LoggingConfig {
    /// Create production logging configuration
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
            include_location: false,
            env_filter: Some("ivy_http=info,ivy_core=info".to_string()),
            service_name: None,
        }
    }

    /// Create development logging configuration
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            env_filter: Some("ivy_http=debug,ivy_core=debug".to_string()),
            service_name: None,
        }
    }

    /// Create test logging configuration (minimal output)
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            format: LogFormat::Compact,
            include_location: false,
            env_filter: Some("ivy_http=error".to_string()),
            service_name: None,
        }
    }

    /// Pick the preset matching the runtime environment
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Testing => Self::test(),
            Environment::Production => Self::production(),
        }
    }

    /// Set service name
    pub fn with_service(mut self, name: &str) -> Self {
        self.service_name = Some(name.to_string());
        self
    }

    /// Set environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// The filter directive in effect, falling back to the plain level
    pub fn filter_directive(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured filter when set.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    let directive = config.filter_directive().to_string();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .map_err(|e| LoggingError::InvalidFilter {
            filter: directive.clone(),
            message: e.to_string(),
        })?;

    let layer = Layer::new()
        .with_writer(io::stdout)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer.pretty())
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init(),
    };
    installed.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = config.service_name.as_deref().unwrap_or("ivy"),
        filter = %directive,
        format = ?config.format,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let production = LoggingConfig::production();
        assert_eq!(production.format, LogFormat::Json);
        assert_eq!(production.filter_directive(), "ivy_http=info,ivy_core=info");

        let development = LoggingConfig::development();
        assert_eq!(development.level, "debug");
        assert!(development.include_location);
    }

    #[test]
    fn test_for_environment() {
        assert_eq!(
            LoggingConfig::for_environment(Environment::Production).format,
            LogFormat::Json
        );
        assert_eq!(LoggingConfig::for_environment(Environment::Testing).level, "error");
    }

    #[test]
    fn test_filter_directive_falls_back_to_level() {
        let config = LoggingConfig {
            env_filter: None,
            level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(config.filter_directive(), "warn");

        let config = config.with_env_filter("ivy_http=trace").with_service("api");
        assert_eq!(config.filter_directive(), "ivy_http=trace");
        assert_eq!(config.service_name.as_deref(), Some("api"));
    }
}
