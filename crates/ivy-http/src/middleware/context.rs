//! Payload threaded through the middleware pipeline

use crate::response::SharedSink;
use crate::routing::RouteMatch;
use http::Extensions;
use std::fmt;

/// Per-request payload: the matched route plus the response it writes to.
///
/// Middleware may replace either part or stash typed values in
/// `extensions` for later steps.
pub struct PipelineContext {
    pub route: RouteMatch,
    pub response: SharedSink,
    pub extensions: Extensions,
}

impl PipelineContext {
    pub fn new(route: RouteMatch, response: SharedSink) -> Self {
        Self {
            route,
            response,
            extensions: Extensions::new(),
        }
    }
}

impl fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineContext")
            .field("route", &self.route)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}
