//! HTTP routing
//!
//! This module provides:
//! - Per-method route tables with `:param` and `*splat` segments
//! - Parameter extraction into [`PathParams`]
//! - The [`Router`] that resolves a request and drives middleware and handlers
//! - Route listings for introspection

pub mod options;
pub mod params;
pub mod pattern;
pub mod router;
pub mod table;

pub use options::{RouteOptions, RouteRecord};
pub use params::{ParamError, PathParams};
pub use pattern::{request_path, PathSegment, RoutePattern, RoutePatternError};
pub use router::{DispatchOutcome, RouteBinding, RouteMatch, Router, RouterBuilder};
pub use table::{RouteTable, TableMatch};

use crate::errors::HttpError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP methods supported by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    /// Every supported method, in table order
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method names are matched exactly; `get` is not `GET`.
impl FromStr for HttpMethod {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "DELETE" => Ok(HttpMethod::DELETE),
            other => Err(HttpError::unsupported_method(other)),
        }
    }
}

impl TryFrom<http::Method> for HttpMethod {
    type Error = HttpError;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => http::Method::GET,
            HttpMethod::POST => http::Method::POST,
            HttpMethod::PUT => http::Method::PUT,
            HttpMethod::DELETE => http::Method::DELETE,
        }
    }
}
