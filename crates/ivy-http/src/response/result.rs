//! Values produced by route handlers

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fmt;

/// A value that can be rendered as JSON text
pub trait StructuredBody: Send {
    /// Serialize with `indent` per nesting level; an empty indent gives compact output
    fn to_json(&self, indent: &[u8]) -> Result<String, serde_json::Error>;
}

impl<T: Serialize + Send> StructuredBody for T {
    fn to_json(&self, indent: &[u8]) -> Result<String, serde_json::Error> {
        if indent.is_empty() {
            return serde_json::to_string(self);
        }

        let mut buf = Vec::with_capacity(128);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// What a handler returns, encoded by [`ResponseEncoder`](super::ResponseEncoder)
pub enum HandlerResult {
    /// Written verbatim, no content type set
    Text(String),
    /// Converted with `Display` and written as text
    Convertible(Box<dyn fmt::Display + Send>),
    /// Serialized as pretty-printed JSON
    Structured(Box<dyn StructuredBody>),
}

impl HandlerResult {
    pub fn text(text: impl Into<String>) -> Self {
        HandlerResult::Text(text.into())
    }

    pub fn display<D: fmt::Display + Send + 'static>(value: D) -> Self {
        HandlerResult::Convertible(Box::new(value))
    }

    pub fn json<T: Serialize + Send + 'static>(value: T) -> Self {
        HandlerResult::Structured(Box::new(value))
    }
}

impl fmt::Debug for HandlerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerResult::Text(text) => f.debug_tuple("Text").field(text).finish(),
            HandlerResult::Convertible(value) => {
                f.debug_tuple("Convertible").field(&value.to_string()).finish()
            }
            HandlerResult::Structured(_) => f.write_str("Structured(..)"),
        }
    }
}

impl From<String> for HandlerResult {
    fn from(text: String) -> Self {
        HandlerResult::Text(text)
    }
}

impl From<&str> for HandlerResult {
    fn from(text: &str) -> Self {
        HandlerResult::Text(text.to_string())
    }
}

impl From<serde_json::Value> for HandlerResult {
    fn from(value: serde_json::Value) -> Self {
        HandlerResult::Structured(Box::new(value))
    }
}
