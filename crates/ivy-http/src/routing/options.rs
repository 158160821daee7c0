//! Route options and route listings

use super::HttpMethod;
use crate::middleware::{Middleware, MiddlewareSpec};
use std::fmt;

/// Options attached to a route at registration time
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    /// Middleware run before the handler, in order. Empty means dispatch directly.
    pub middleware: Vec<MiddlewareSpec>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware identifier
    pub fn middleware(mut self, spec: impl Into<MiddlewareSpec>) -> Self {
        self.middleware.push(spec.into());
        self
    }

    /// Append an inline middleware
    pub fn inline<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(MiddlewareSpec::inline(middleware));
        self
    }

    /// Append several middleware identifiers
    pub fn with_middleware<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MiddlewareSpec>,
    {
        self.middleware.extend(specs.into_iter().map(Into::into));
        self
    }

    pub fn has_middleware(&self) -> bool {
        !self.middleware.is_empty()
    }

    pub fn middleware_names(&self) -> Vec<&str> {
        self.middleware.iter().map(MiddlewareSpec::label).collect()
    }
}

/// A registered route as it appears in listings. Not used for matching.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub method: HttpMethod,
    pub path: String,
    pub options: RouteOptions,
}

impl fmt::Display for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if self.options.has_middleware() {
            write!(f, " [{}]", self.options.middleware_names().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{middleware_fn, MiddlewareError, PipelineContext};

    #[test]
    fn test_default_options_have_no_middleware() {
        let options = RouteOptions::new();
        assert!(!options.has_middleware());
        assert!(options.middleware_names().is_empty());
    }

    #[test]
    fn test_middleware_order_is_kept() {
        let options = RouteOptions::new()
            .middleware("auth")
            .inline(middleware_fn("stamp", |ctx: PipelineContext| async move {
                Ok::<_, MiddlewareError>(ctx)
            }))
            .with_middleware(["log", "cors"]);

        assert_eq!(options.middleware_names(), vec!["auth", "stamp", "log", "cors"]);
    }

    #[test]
    fn test_record_display() {
        let record = RouteRecord {
            method: HttpMethod::GET,
            path: "/users/:id".to_string(),
            options: RouteOptions::new().with_middleware(["auth", "log"]),
        };
        assert_eq!(record.to_string(), "GET /users/:id [auth, log]");

        let bare = RouteRecord {
            method: HttpMethod::DELETE,
            path: "/ping".to_string(),
            options: RouteOptions::new(),
        };
        assert_eq!(bare.to_string(), "DELETE /ping");
    }
}
