//! Middleware container
//!
//! Turns the middleware identifiers attached to a route into the ordered
//! list of steps the pipeline runs.

use super::{Middleware, MiddlewareError, MiddlewareSpec};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Resolves middleware specifications into executable steps
pub trait MiddlewareContainer: Send + Sync {
    /// Resolve `specs` into steps, preserving order
    fn parse(&self, specs: &[MiddlewareSpec]) -> Result<Vec<Arc<dyn Middleware>>, MiddlewareError>;
}

/// Name-based middleware container with support for groups.
///
/// A group name expands to its members in the order they were given.
/// Members must be registered middleware, not other groups.
#[derive(Debug, Default)]
pub struct MiddlewareRegistry {
    middleware: HashMap<String, Arc<dyn Middleware>>,
    groups: HashMap<String, Vec<String>>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register middleware under `name`, replacing any previous entry
    pub fn register<M: Middleware + 'static>(&mut self, name: impl Into<String>, middleware: M) {
        self.register_arc(name, Arc::new(middleware));
    }

    pub fn register_arc(&mut self, name: impl Into<String>, middleware: Arc<dyn Middleware>) {
        let name = name.into();
        debug!(middleware = %name, "Registered middleware");
        self.middleware.insert(name, middleware);
    }

    /// Register middleware (builder pattern)
    pub fn with<M: Middleware + 'static>(mut self, name: impl Into<String>, middleware: M) -> Self {
        self.register(name, middleware);
        self
    }

    /// Define a named group of middleware
    pub fn group<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .insert(name.into(), members.into_iter().map(Into::into).collect());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.middleware.contains_key(name) || self.groups.contains_key(name)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Middleware>, MiddlewareError> {
        self.middleware
            .get(name)
            .cloned()
            .ok_or_else(|| MiddlewareError::Unknown(name.to_string()))
    }
}

impl MiddlewareContainer for MiddlewareRegistry {
    fn parse(&self, specs: &[MiddlewareSpec]) -> Result<Vec<Arc<dyn Middleware>>, MiddlewareError> {
        let mut steps = Vec::with_capacity(specs.len());

        for spec in specs {
            match spec {
                MiddlewareSpec::Inline(middleware) => steps.push(middleware.clone()),
                MiddlewareSpec::Named(name) => {
                    if let Some(members) = self.groups.get(name) {
                        for member in members {
                            steps.push(self.lookup(member)?);
                        }
                    } else {
                        steps.push(self.lookup(name)?);
                    }
                }
            }
        }

        Ok(steps)
    }
}
