//! Router configuration
//!
//! Timeouts around the middleware and handler phases, and the indent used
//! when encoding structured results. A timeout of `0` disables it.

use super::defaults::RouterDefaults;
use crate::foundation::constants::MAX_JSON_INDENT;
use ivy_core::{
    env_or_default, AppConfigTrait, ConfigError, ConfigSource, ConfigValidator, RangeValidator,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

const ENV_PIPELINE_TIMEOUT: &str = "IVY_PIPELINE_TIMEOUT";
const ENV_HANDLER_TIMEOUT: &str = "IVY_HANDLER_TIMEOUT";
const ENV_JSON_INDENT: &str = "IVY_JSON_INDENT";

/// Router specific configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Time allowed for the whole middleware pipeline, in seconds
    pub pipeline_timeout_secs: u64,
    /// Time allowed for a handler to produce its result, in seconds
    pub handler_timeout_secs: u64,
    /// Spaces per indent level for structured responses
    pub json_indent: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            pipeline_timeout_secs: RouterDefaults::PIPELINE_TIMEOUT_SECS,
            handler_timeout_secs: RouterDefaults::HANDLER_TIMEOUT_SECS,
            json_indent: RouterDefaults::JSON_INDENT,
        }
    }
}

impl RouterConfig {
    /// Configuration with both timeouts disabled
    pub fn without_timeouts() -> Self {
        Self {
            pipeline_timeout_secs: 0,
            handler_timeout_secs: 0,
            ..Default::default()
        }
    }

    pub fn pipeline_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.pipeline_timeout_secs)
    }

    pub fn handler_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.handler_timeout_secs)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_env<T: FromStr>(
    var: &str,
    field: &str,
    default: T,
    expected: &str,
) -> Result<T, ConfigError>
where
    T: ToString,
{
    let raw = env_or_default(var, &default.to_string())?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::invalid_value(field, raw.clone(), expected))
}

impl AppConfigTrait for RouterConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            pipeline_timeout_secs: parse_env(
                ENV_PIPELINE_TIMEOUT,
                "pipeline_timeout_secs",
                RouterDefaults::PIPELINE_TIMEOUT_SECS,
                "valid number of seconds",
            )?,
            handler_timeout_secs: parse_env(
                ENV_HANDLER_TIMEOUT,
                "handler_timeout_secs",
                RouterDefaults::HANDLER_TIMEOUT_SECS,
                "valid number of seconds",
            )?,
            json_indent: parse_env(
                ENV_JSON_INDENT,
                "json_indent",
                RouterDefaults::JSON_INDENT,
                "valid number of spaces",
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        RangeValidator::new("pipeline_timeout_secs", 0, RouterDefaults::MAX_TIMEOUT_SECS)
            .validate(&self.pipeline_timeout_secs)?;
        RangeValidator::new("handler_timeout_secs", 0, RouterDefaults::MAX_TIMEOUT_SECS)
            .validate(&self.handler_timeout_secs)?;
        RangeValidator::new("json_indent", 0, MAX_JSON_INDENT as u64)
            .validate(&(self.json_indent as u64))?;
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "pipeline_timeout_secs".to_string(),
            ConfigSource::env_or_default(
                ENV_PIPELINE_TIMEOUT,
                RouterDefaults::PIPELINE_TIMEOUT_SECS.to_string(),
            ),
        );
        sources.insert(
            "handler_timeout_secs".to_string(),
            ConfigSource::env_or_default(
                ENV_HANDLER_TIMEOUT,
                RouterDefaults::HANDLER_TIMEOUT_SECS.to_string(),
            ),
        );
        sources.insert(
            "json_indent".to_string(),
            ConfigSource::env_or_default(ENV_JSON_INDENT, RouterDefaults::JSON_INDENT.to_string()),
        );
        sources
    }
}
