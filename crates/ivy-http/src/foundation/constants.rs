pub const DEFAULT_PIPELINE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HANDLER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_JSON_INDENT: usize = 4;
pub const MAX_JSON_INDENT: usize = 16;

pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const BODY_ROUTE_NOT_FOUND: &str = "Route not found";
pub const BODY_SERVER_ERROR: &str = "Server error.";
pub const MIDDLEWARE_ERROR_PREFIX: &str = "Error piping through middleware. ";

/// Parameter name used for an unnamed `*` splat segment
pub const DEFAULT_SPLAT_NAME: &str = "splat";
