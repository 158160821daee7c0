//! Handler result encoding
//!
//! Text is written as-is, convertible values through `Display`, and
//! structured values as indented JSON under `application/json`.

use super::{HandlerResult, ResponseSink};
use crate::foundation::constants::{CONTENT_TYPE_JSON, DEFAULT_JSON_INDENT, HEADER_CONTENT_TYPE};
use crate::errors::HttpResult;

/// A wire-ready body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// Content type to set, `None` leaves the transport default
    pub content_type: Option<&'static str>,
    pub body: String,
}

/// Converts handler results into response bodies
#[derive(Debug, Clone)]
pub struct ResponseEncoder {
    indent: Vec<u8>,
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JSON_INDENT)
    }
}

impl ResponseEncoder {
    /// Encoder indenting structured output by `indent` spaces per level
    pub fn new(indent: usize) -> Self {
        Self {
            indent: vec![b' '; indent],
        }
    }

    /// Encode a result without touching any response
    pub fn encode(&self, result: HandlerResult) -> Result<EncodedBody, serde_json::Error> {
        match result {
            HandlerResult::Text(body) => Ok(EncodedBody {
                content_type: None,
                body,
            }),
            HandlerResult::Convertible(value) => Ok(EncodedBody {
                content_type: None,
                body: value.to_string(),
            }),
            HandlerResult::Structured(value) => Ok(EncodedBody {
                content_type: Some(CONTENT_TYPE_JSON),
                body: value.to_json(&self.indent)?,
            }),
        }
    }

    /// Encode and write to `sink`, terminating the response.
    ///
    /// On failure nothing is written; the caller owns the error response.
    pub fn write(&self, result: HandlerResult, sink: &dyn ResponseSink) -> HttpResult<()> {
        let encoded = self.encode(result)?;
        if let Some(content_type) = encoded.content_type {
            sink.set_header(HEADER_CONTENT_TYPE, content_type);
        }
        sink.end(Some(&encoded.body));
        Ok(())
    }
}
