//! Middleware system
//!
//! A middleware step receives the [`PipelineContext`] for a matched route
//! and either hands back a (possibly modified) context or fails. Failure
//! aborts the chain: later steps and the handler never run.

pub mod context;
pub mod pipeline;
pub mod registry;

pub use context::PipelineContext;
pub use pipeline::{PipelineExecutor, SequentialPipeline};
pub use registry::{MiddlewareContainer, MiddlewareRegistry};

use crate::foundation::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors a middleware step, or the pipeline around it, can report
#[derive(Error, Debug)]
pub enum MiddlewareError {
    #[error("{middleware}: {message}")]
    Rejected { middleware: String, message: String },

    #[error("Unknown middleware '{0}'")]
    Unknown(String),

    #[error("Middleware pipeline timed out after {0:?}")]
    TimedOut(Duration),

    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for MiddlewareError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        MiddlewareError::Custom(err)
    }
}

impl MiddlewareError {
    /// Create a rejection raised by the named middleware
    pub fn reject<N: Into<String>, M: Into<String>>(middleware: N, message: M) -> Self {
        MiddlewareError::Rejected {
            middleware: middleware.into(),
            message: message.into(),
        }
    }
}

/// Future returned by a middleware step
pub type MiddlewareFuture = BoxFuture<'static, Result<PipelineContext, MiddlewareError>>;

/// A single step of the middleware pipeline
pub trait Middleware: Send + Sync + fmt::Debug {
    /// Process the context, returning it for the next step or failing
    fn handle(&self, context: PipelineContext) -> MiddlewareFuture;

    /// Optional middleware name for debugging
    fn name(&self) -> &str {
        "Middleware"
    }
}

/// Identifier for middleware attached to a route
#[derive(Clone)]
pub enum MiddlewareSpec {
    /// Resolved by name through the middleware container
    Named(String),
    /// Used as-is
    Inline(Arc<dyn Middleware>),
}

impl MiddlewareSpec {
    pub fn inline<M: Middleware + 'static>(middleware: M) -> Self {
        MiddlewareSpec::Inline(Arc::new(middleware))
    }

    /// Name for listings and logs
    pub fn label(&self) -> &str {
        match self {
            MiddlewareSpec::Named(name) => name,
            MiddlewareSpec::Inline(middleware) => middleware.name(),
        }
    }
}

impl fmt::Debug for MiddlewareSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            MiddlewareSpec::Inline(middleware) => {
                f.debug_tuple("Inline").field(&middleware.name()).finish()
            }
        }
    }
}

impl From<&str> for MiddlewareSpec {
    fn from(name: &str) -> Self {
        MiddlewareSpec::Named(name.to_string())
    }
}

impl From<String> for MiddlewareSpec {
    fn from(name: String) -> Self {
        MiddlewareSpec::Named(name)
    }
}

impl From<Arc<dyn Middleware>> for MiddlewareSpec {
    fn from(middleware: Arc<dyn Middleware>) -> Self {
        MiddlewareSpec::Inline(middleware)
    }
}

/// Middleware built from an async closure
pub struct FnMiddleware<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMiddleware")
            .field("name", &self.name)
            .finish()
    }
}

impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(PipelineContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PipelineContext, MiddlewareError>> + Send + 'static,
{
    fn handle(&self, context: PipelineContext) -> MiddlewareFuture {
        Box::pin((self.f)(context))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap an async closure as a named middleware
///
/// ```ignore
/// let stamp = middleware_fn("stamp", |mut ctx: PipelineContext| async move {
///     ctx.route.params.insert("stamped", "yes");
///     Ok(ctx)
/// });
/// ```
pub fn middleware_fn<F, Fut>(name: impl Into<String>, f: F) -> FnMiddleware<F>
where
    F: Fn(PipelineContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PipelineContext, MiddlewareError>> + Send + 'static,
{
    FnMiddleware {
        name: name.into(),
        f,
    }
}
