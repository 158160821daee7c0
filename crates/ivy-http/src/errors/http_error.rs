//! HTTP dispatch error types
//!
//! Every failure the router can hit while registering or resolving a route.
//! Each variant knows the status and the literal body written for it.

use crate::foundation::constants::{
    BODY_ROUTE_NOT_FOUND, BODY_SERVER_ERROR, MIDDLEWARE_ERROR_PREFIX,
};
use crate::middleware::MiddlewareError;
use crate::routing::pattern::RoutePatternError;
use http::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Result type for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

/// Routing and dispatch errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("No route matches {method} {path}")]
    NotFound { method: String, path: String },

    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("Middleware pipeline failed: {0}")]
    Middleware(#[from] MiddlewareError),

    #[error("Response encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Handler did not finish within {0:?}")]
    HandlerTimeout(Duration),

    #[error("Invalid route pattern: {0}")]
    InvalidRoute(#[from] RoutePatternError),

    #[error("Configuration error: {0}")]
    Config(#[from] ivy_core::ConfigError),
}

impl HttpError {
    /// Create a not found error
    pub fn not_found<M: Into<String>, P: Into<String>>(method: M, path: P) -> Self {
        HttpError::NotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Create an unsupported method error
    pub fn unsupported_method<T: Into<String>>(method: T) -> Self {
        HttpError::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Status written to the response for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::NotFound { .. } | HttpError::UnsupportedMethod { .. } => {
                StatusCode::NOT_FOUND
            }
            HttpError::Middleware(_)
            | HttpError::Encoding(_)
            | HttpError::HandlerTimeout(_)
            | HttpError::InvalidRoute(_)
            | HttpError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body written to the response for this error
    pub fn response_body(&self) -> String {
        match self {
            HttpError::NotFound { .. } | HttpError::UnsupportedMethod { .. } => {
                BODY_ROUTE_NOT_FOUND.to_string()
            }
            HttpError::Middleware(err) => format!("{}{}", MIDDLEWARE_ERROR_PREFIX, err),
            _ => BODY_SERVER_ERROR.to_string(),
        }
    }

    /// Get error code for consistent diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::NotFound { .. } => "ROUTE_NOT_FOUND",
            HttpError::UnsupportedMethod { .. } => "UNSUPPORTED_METHOD",
            HttpError::Middleware(_) => "MIDDLEWARE_FAILURE",
            HttpError::Encoding(_) => "ENCODING_FAILURE",
            HttpError::HandlerTimeout(_) => "HANDLER_TIMEOUT",
            HttpError::InvalidRoute(_) => "INVALID_ROUTE",
            HttpError::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}
