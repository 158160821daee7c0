pub mod config;

pub use config::{init_logging, LoggingConfig, LoggingError};
