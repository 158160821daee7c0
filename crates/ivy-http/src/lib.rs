//! # ivy-http
//!
//! Routing and dispatch core for the ivy web framework.
//!
//! This crate provides:
//! - Per-method route tables with `:param` and `*splat` segments
//! - A [`Router`] that resolves a method and path into a handler call
//! - An ordered middleware pipeline that can rewrite or reject a request
//! - Encoding of handler results as text or indented JSON
//!
//! Connection handling is left to the transport, which hands the router a
//! method, a path and a [`ResponseSink`].
//!
//! ```ignore
//! let mut router = Router::new();
//! router.get("/ping", sync_handler(|_| "pong"), RouteOptions::new())?;
//!
//! let sink = BufferedResponse::shared();
//! router.resolve("GET", "/ping", sink.clone()).await;
//! assert_eq!(sink.body(), "pong");
//! ```

pub mod config;
pub mod errors;
pub mod foundation;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routing;

pub use config::{RouterConfig, RouterDefaults};
pub use errors::{HttpError, HttpResult};
pub use foundation::BoxFuture;

pub use handlers::{sync_handler, Handler, SyncHandler};
pub use logging::{init_logging, LoggingConfig, LoggingError};

pub use routing::{
    DispatchOutcome, HttpMethod, ParamError, PathParams, RouteBinding, RouteMatch, RouteOptions,
    RoutePattern, RoutePatternError, RouteRecord, RouteTable, Router, RouterBuilder,
};

pub use middleware::{
    middleware_fn, Middleware, MiddlewareContainer, MiddlewareError, MiddlewareRegistry,
    MiddlewareSpec, PipelineContext, PipelineExecutor, SequentialPipeline,
};

pub use response::{
    BufferedResponse, EncodedBody, HandlerResult, ResponseEncoder, ResponseSink, SharedSink,
    StructuredBody,
};

pub use http::StatusCode;
