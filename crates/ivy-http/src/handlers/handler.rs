//! Handler abstraction
//!
//! A handler receives the parameters extracted from the request path and
//! produces a [`HandlerResult`]. Async closures implement [`Handler`]
//! directly; plain closures go through [`sync_handler`].

use crate::foundation::BoxFuture;
use crate::response::HandlerResult;
use crate::routing::PathParams;
use std::fmt;
use std::future::Future;

/// Trait for route handlers
pub trait Handler: Send + Sync + 'static {
    fn call(&self, params: PathParams) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: Into<HandlerResult>,
{
    fn call(&self, params: PathParams) -> BoxFuture<'static, HandlerResult> {
        let fut = self(params);
        Box::pin(async move { fut.await.into() })
    }
}

/// Handler wrapping a synchronous closure
pub struct SyncHandler<F> {
    f: F,
}

impl<F> fmt::Debug for SyncHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncHandler").finish_non_exhaustive()
    }
}

impl<F, R> Handler for SyncHandler<F>
where
    F: Fn(PathParams) -> R + Send + Sync + 'static,
    R: Into<HandlerResult>,
{
    fn call(&self, params: PathParams) -> BoxFuture<'static, HandlerResult> {
        let result = (self.f)(params).into();
        Box::pin(async move { result })
    }
}

/// Use a synchronous closure as a handler
///
/// ```ignore
/// router.get("/ping", sync_handler(|_| "pong"), RouteOptions::new())?;
/// ```
pub fn sync_handler<F, R>(f: F) -> SyncHandler<F>
where
    F: Fn(PathParams) -> R + Send + Sync + 'static,
    R: Into<HandlerResult>,
{
    SyncHandler { f }
}
