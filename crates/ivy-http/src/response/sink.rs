//! Response sink abstraction
//!
//! The router never owns a connection. It writes to a [`ResponseSink`],
//! a handle to the in-flight response that the transport layer provides.

use http::{Response, StatusCode};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

/// Handle to an in-flight response.
///
/// Methods take `&self` because the handle is shared between the router
/// and the pipeline context; implementations use interior mutability.
pub trait ResponseSink: Send + Sync {
    /// Set the status code
    fn write_head(&self, status: StatusCode);

    /// Set a header, replacing any previous value with the same name
    fn set_header(&self, name: &str, value: &str);

    /// Write the body, if any, and terminate the response
    fn end(&self, body: Option<&str>);

    /// Whether `end` has already been called
    fn is_ended(&self) -> bool;
}

/// Shared sink handle passed through the pipeline
pub type SharedSink = Arc<dyn ResponseSink>;

#[derive(Debug, Default)]
struct ResponseState {
    status: Option<StatusCode>,
    headers: Vec<(String, String)>,
    body: Option<String>,
    end_calls: usize,
}

/// In-memory response sink.
///
/// Records everything written to it. Only the first `end` takes effect;
/// writes after the response ended are ignored and logged.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    state: Mutex<ResponseState>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared handle ready to pass to the router
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn state(&self) -> MutexGuard<'_, ResponseState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Status written so far, `200 OK` when none was set
    pub fn status(&self) -> StatusCode {
        self.state().status.unwrap_or(StatusCode::OK)
    }

    /// Whether a status was explicitly written
    pub fn status_written(&self) -> bool {
        self.state().status.is_some()
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<String> {
        self.state()
            .headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        self.state().headers.clone()
    }

    /// Body text, empty when the response ended without one
    pub fn body(&self) -> String {
        self.state().body.clone().unwrap_or_default()
    }

    /// How many times `end` was called, including ignored calls
    pub fn end_calls(&self) -> usize {
        self.state().end_calls
    }

    /// Build an `http::Response` from what was recorded
    pub fn to_http_response(&self) -> Result<Response<String>, http::Error> {
        let state = self.state();
        let mut builder = Response::builder().status(state.status.unwrap_or(StatusCode::OK));
        for (name, value) in &state.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(state.body.clone().unwrap_or_default())
    }
}

impl ResponseSink for BufferedResponse {
    fn write_head(&self, status: StatusCode) {
        let mut state = self.state();
        if state.end_calls > 0 {
            warn!(status = %status, "Ignoring status written after response ended");
            return;
        }
        state.status = Some(status);
    }

    fn set_header(&self, name: &str, value: &str) {
        let mut state = self.state();
        if state.end_calls > 0 {
            warn!(header = name, "Ignoring header written after response ended");
            return;
        }
        state.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        state.headers.push((name.to_string(), value.to_string()));
    }

    fn end(&self, body: Option<&str>) {
        let mut state = self.state();
        state.end_calls += 1;
        if state.end_calls > 1 {
            warn!(calls = state.end_calls, "Response already ended");
            return;
        }
        state.body = body.map(str::to_string);
    }

    fn is_ended(&self) -> bool {
        self.state().end_calls > 0
    }
}
