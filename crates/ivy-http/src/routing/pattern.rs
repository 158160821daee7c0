//! Route pattern parsing
//!
//! Patterns are `/`-separated segments. A segment is one of:
//! - static text, matched exactly (`users`)
//! - a parameter, `:name`, capturing exactly one non-empty segment
//! - a splat, `*` or `*name`, capturing one or more trailing segments
//!
//! Empty segments are ignored, so `/users/` and `users` parse the same as `/users`.

use crate::foundation::constants::DEFAULT_SPLAT_NAME;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur while parsing a route pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutePatternError {
    #[error("Invalid pattern syntax: {0}")]
    InvalidSyntax(String),
    #[error("Parameter name cannot be empty")]
    EmptyParameterName,
    #[error("Duplicate parameter name: {0}")]
    DuplicateParameter(String),
    #[error("Splat must be the last segment")]
    SplatNotLast,
}

/// A single path segment in a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Static text segment
    Static(String),
    /// Named parameter segment
    Param(String),
    /// Trailing splat (must be last)
    Splat(String),
}

/// Parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    /// The original path string
    pub original_path: String,
    /// Parsed path segments
    pub segments: Vec<PathSegment>,
    /// Parameter and splat names in order of appearance
    pub param_names: Vec<String>,
}

impl RoutePattern {
    /// Parse a route pattern from a path string
    pub fn parse(path: &str) -> Result<Self, RoutePatternError> {
        if path.contains(['?', '#']) {
            return Err(RoutePatternError::InvalidSyntax(format!(
                "query or fragment not allowed in pattern '{}'",
                path
            )));
        }

        let raw: Vec<&str> = split_segments(path).collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut param_names = Vec::new();
        let mut seen = HashSet::new();

        for (index, segment) in raw.iter().enumerate() {
            let parsed = if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RoutePatternError::EmptyParameterName);
                }
                PathSegment::Param(name.to_string())
            } else if let Some(name) = segment.strip_prefix('*') {
                if index != raw.len() - 1 {
                    return Err(RoutePatternError::SplatNotLast);
                }
                let name = if name.is_empty() { DEFAULT_SPLAT_NAME } else { name };
                PathSegment::Splat(name.to_string())
            } else {
                PathSegment::Static(segment.to_string())
            };

            if let PathSegment::Param(name) | PathSegment::Splat(name) = &parsed {
                if !seen.insert(name.clone()) {
                    return Err(RoutePatternError::DuplicateParameter(name.clone()));
                }
                param_names.push(name.clone());
            }
            segments.push(parsed);
        }

        Ok(RoutePattern {
            original_path: path.to_string(),
            segments,
            param_names,
        })
    }
}

/// Split a path into its non-empty segments
pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Strip the query string and fragment from a request URL, leaving the path
pub fn request_path(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(end) => &url[..end],
        None => url,
    }
}
