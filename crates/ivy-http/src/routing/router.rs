//! Request router
//!
//! Owns one [`RouteTable`] per supported method. Registration happens on a
//! `&mut Router` during bootstrap; once shared (typically as `Arc<Router>`)
//! the router only resolves requests, so the tables need no locking.
//!
//! Resolution never returns an error. Every failure is written to the
//! response sink and reported through [`DispatchOutcome`].

use super::options::{RouteOptions, RouteRecord};
use super::params::PathParams;
use super::table::RouteTable;
use super::HttpMethod;
use crate::config::RouterConfig;
use crate::errors::{HttpError, HttpResult};
use crate::handlers::Handler;
use crate::middleware::{
    MiddlewareContainer, MiddlewareError, MiddlewareRegistry, PipelineContext, PipelineExecutor,
    SequentialPipeline,
};
use crate::response::{ResponseEncoder, ResponseSink, SharedSink};
use ivy_core::AppConfigTrait;
use std::fmt;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// A handler together with the options it was registered with.
/// Immutable once registered.
pub struct RouteBinding {
    handler: Arc<dyn Handler>,
    options: RouteOptions,
}

impl RouteBinding {
    pub fn new<H: Handler>(handler: H, options: RouteOptions) -> Self {
        Self {
            handler: Arc::new(handler),
            options,
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn options(&self) -> &RouteOptions {
        &self.options
    }
}

impl fmt::Debug for RouteBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBinding")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A matched route: the binding and the parameters pulled from the path
#[derive(Clone)]
pub struct RouteMatch {
    pub binding: Arc<RouteBinding>,
    pub params: PathParams,
    /// Pattern the request matched, as registered
    pub pattern: String,
}

impl RouteMatch {
    #[cfg(test)]
    pub(crate) fn for_test(pattern: &str) -> Self {
        Self {
            binding: Arc::new(RouteBinding::new(
                crate::handlers::sync_handler(|_| ""),
                RouteOptions::new(),
            )),
            params: PathParams::new(),
            pattern: pattern.to_string(),
        }
    }
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .field("binding", &self.binding)
            .finish()
    }
}

/// How a call to [`Router::resolve`] ended. The sink has been terminated
/// exactly once in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran and its result was written
    Responded,
    /// A middleware ended the response itself; the handler was skipped
    EndedByMiddleware,
    /// No route for this method and path, or the method is unsupported
    NotFound,
    /// Middleware could not be resolved, rejected the request or timed out
    MiddlewareFailed,
    /// The handler result could not be serialized
    EncodingFailed,
    /// The handler did not finish in time
    HandlerTimedOut,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::Responded | DispatchOutcome::EndedByMiddleware
        )
    }
}

/// Per-method route tables plus the collaborators used during dispatch
pub struct Router {
    get_routes: RouteTable<Arc<RouteBinding>>,
    post_routes: RouteTable<Arc<RouteBinding>>,
    put_routes: RouteTable<Arc<RouteBinding>>,
    delete_routes: RouteTable<Arc<RouteBinding>>,
    routes_list: Vec<RouteRecord>,
    container: Arc<dyn MiddlewareContainer>,
    pipeline: Arc<dyn PipelineExecutor>,
    encoder: ResponseEncoder,
    config: RouterConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes_list.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Router with an empty [`MiddlewareRegistry`] and a [`SequentialPipeline`]
    pub fn new() -> Self {
        Self::with_collaborators(
            Arc::new(MiddlewareRegistry::new()),
            Arc::new(SequentialPipeline::new()),
        )
    }

    /// Router using the given middleware container and pipeline executor
    pub fn with_collaborators(
        container: Arc<dyn MiddlewareContainer>,
        pipeline: Arc<dyn PipelineExecutor>,
    ) -> Self {
        let config = RouterConfig::default();
        Self {
            get_routes: RouteTable::new(),
            post_routes: RouteTable::new(),
            put_routes: RouteTable::new(),
            delete_routes: RouteTable::new(),
            routes_list: Vec::new(),
            container,
            pipeline,
            encoder: ResponseEncoder::new(config.json_indent),
            config,
        }
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// Replace the router configuration after validating it
    pub fn with_config(mut self, config: RouterConfig) -> HttpResult<Self> {
        if let Err(err) = config.validate() {
            error!(field = err.field(), error = %err, "Rejected router configuration");
            return Err(err.into());
        }
        self.encoder = ResponseEncoder::new(config.json_indent);
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register a handler for `method` and `path`.
    ///
    /// Registering a pattern that is already present replaces its binding.
    pub fn register_route<H: Handler>(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler: H,
        options: RouteOptions,
    ) -> HttpResult<()> {
        let binding = Arc::new(RouteBinding::new(handler, options.clone()));
        let replaced = self.table_mut(method).insert(path, binding)?;

        if replaced.is_some() {
            debug!(method = %method, path, "Replaced existing route");
        } else {
            debug!(method = %method, path, "Registered route");
        }

        self.routes_list.push(RouteRecord {
            method,
            path: path.to_string(),
            options,
        });
        Ok(())
    }

    pub fn get<H: Handler>(
        &mut self,
        path: &str,
        handler: H,
        options: RouteOptions,
    ) -> HttpResult<()> {
        self.register_route(HttpMethod::GET, path, handler, options)
    }

    pub fn post<H: Handler>(
        &mut self,
        path: &str,
        handler: H,
        options: RouteOptions,
    ) -> HttpResult<()> {
        self.register_route(HttpMethod::POST, path, handler, options)
    }

    pub fn put<H: Handler>(
        &mut self,
        path: &str,
        handler: H,
        options: RouteOptions,
    ) -> HttpResult<()> {
        self.register_route(HttpMethod::PUT, path, handler, options)
    }

    pub fn delete<H: Handler>(
        &mut self,
        path: &str,
        handler: H,
        options: RouteOptions,
    ) -> HttpResult<()> {
        self.register_route(HttpMethod::DELETE, path, handler, options)
    }

    /// Every registration, in order. Re-registrations appear again.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes_list
    }

    pub fn routes_for(&self, method: HttpMethod) -> Vec<&RouteRecord> {
        self.routes_list
            .iter()
            .filter(|record| record.method == method)
            .collect()
    }

    pub fn table(&self, method: HttpMethod) -> &RouteTable<Arc<RouteBinding>> {
        match method {
            HttpMethod::GET => &self.get_routes,
            HttpMethod::POST => &self.post_routes,
            HttpMethod::PUT => &self.put_routes,
            HttpMethod::DELETE => &self.delete_routes,
        }
    }

    fn table_mut(&mut self, method: HttpMethod) -> &mut RouteTable<Arc<RouteBinding>> {
        match method {
            HttpMethod::GET => &mut self.get_routes,
            HttpMethod::POST => &mut self.post_routes,
            HttpMethod::PUT => &mut self.put_routes,
            HttpMethod::DELETE => &mut self.delete_routes,
        }
    }

    /// Match `url` against the table for `method`
    pub fn find_matching_route(&self, method: HttpMethod, url: &str) -> Option<RouteMatch> {
        self.table(method).lookup(url).map(|found| RouteMatch {
            binding: Arc::clone(found.value),
            params: found.params,
            pattern: found.pattern.to_string(),
        })
    }

    /// Handle one request: match, run middleware, call the handler and
    /// write the result to `response`.
    pub async fn resolve(&self, method: &str, url: &str, response: SharedSink) -> DispatchOutcome {
        let method = match method.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(err) => {
                warn!(method, path = url, "Unsupported HTTP method, treating as route not found");
                self.fail(&err, response.as_ref());
                return DispatchOutcome::NotFound;
            }
        };

        let Some(route) = self.find_matching_route(method, url) else {
            debug!(method = %method, path = url, "No route matched");
            self.fail(&HttpError::not_found(method.as_str(), url), response.as_ref());
            return DispatchOutcome::NotFound;
        };

        debug!(method = %method, path = url, pattern = %route.pattern, "Route matched");

        if route.binding.options().has_middleware() {
            self.go_through_middleware(route, response).await
        } else {
            self.dispatch_route(route, response).await
        }
    }

    async fn go_through_middleware(
        &self,
        route: RouteMatch,
        response: SharedSink,
    ) -> DispatchOutcome {
        let steps = match self.container.parse(&route.binding.options().middleware) {
            Ok(steps) => steps,
            Err(err) => return self.middleware_failed(err, response.as_ref()),
        };

        let context = PipelineContext::new(route, Arc::clone(&response));
        let run = self.pipeline.run(context, &steps);
        let result = match self.config.pipeline_timeout() {
            Some(limit) => match timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => Err(MiddlewareError::TimedOut(limit)),
            },
            None => run.await,
        };

        match result {
            Ok(context) if context.response.is_ended() => {
                debug!(
                    pattern = %context.route.pattern,
                    "Response ended by middleware, skipping handler"
                );
                DispatchOutcome::EndedByMiddleware
            }
            Ok(context) => self.dispatch_route(context.route, context.response).await,
            Err(err) => self.middleware_failed(err, response.as_ref()),
        }
    }

    async fn dispatch_route(&self, route: RouteMatch, response: SharedSink) -> DispatchOutcome {
        let call = route.binding.handler().call(route.params);
        let result = match self.config.handler_timeout() {
            Some(limit) => match timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    let err = HttpError::HandlerTimeout(limit);
                    error!(pattern = %route.pattern, error = %err, "Handler timed out");
                    self.fail(&err, response.as_ref());
                    return DispatchOutcome::HandlerTimedOut;
                }
            },
            None => call.await,
        };

        match self.encoder.write(result, response.as_ref()) {
            Ok(()) => DispatchOutcome::Responded,
            Err(err) => {
                error!(error = %err, "Error while trying to stringify JSON object.");
                self.fail(&err, response.as_ref());
                DispatchOutcome::EncodingFailed
            }
        }
    }

    fn middleware_failed(&self, err: MiddlewareError, sink: &dyn ResponseSink) -> DispatchOutcome {
        error!(error = ?err, message = %err, "Error piping through middleware");
        self.fail(&HttpError::from(err), sink);
        DispatchOutcome::MiddlewareFailed
    }

    fn fail(&self, err: &HttpError, sink: &dyn ResponseSink) {
        sink.write_head(err.status_code());
        sink.end(Some(&err.response_body()));
    }
}

/// Builder for [`Router`]
#[derive(Default)]
pub struct RouterBuilder {
    container: Option<Arc<dyn MiddlewareContainer>>,
    pipeline: Option<Arc<dyn PipelineExecutor>>,
    config: Option<RouterConfig>,
}

impl RouterBuilder {
    pub fn container(mut self, container: Arc<dyn MiddlewareContainer>) -> Self {
        self.container = Some(container);
        self
    }

    /// Use a [`MiddlewareRegistry`] as the container
    pub fn registry(self, registry: MiddlewareRegistry) -> Self {
        self.container(Arc::new(registry))
    }

    pub fn pipeline(mut self, pipeline: Arc<dyn PipelineExecutor>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the router, validating the configuration if one was given
    pub fn build(self) -> HttpResult<Router> {
        let router = Router::with_collaborators(
            self.container
                .unwrap_or_else(|| Arc::new(MiddlewareRegistry::new())),
            self.pipeline
                .unwrap_or_else(|| Arc::new(SequentialPipeline::new())),
        );
        match self.config {
            Some(config) => router.with_config(config),
            None => Ok(router),
        }
    }
}
