pub mod config;

pub use config::validation::ConfigError;
pub use config::{
    env_or_default, AppConfigTrait, ConfigSource, ConfigValidator, Environment, RangeValidator,
};
