pub mod defaults;
pub mod router_config;

pub use defaults::*;
pub use router_config::*;
