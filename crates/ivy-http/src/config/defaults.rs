//! Default configuration values

use crate::foundation::constants::*;

pub struct RouterDefaults;

impl RouterDefaults {
    pub const PIPELINE_TIMEOUT_SECS: u64 = DEFAULT_PIPELINE_TIMEOUT_SECS;
    pub const HANDLER_TIMEOUT_SECS: u64 = DEFAULT_HANDLER_TIMEOUT_SECS;
    pub const JSON_INDENT: usize = DEFAULT_JSON_INDENT;
    /// Upper bound accepted for either timeout, one day
    pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;
}
