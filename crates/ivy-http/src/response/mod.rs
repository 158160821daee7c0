//! Response sink, handler results and encoding

pub mod encoder;
pub mod result;
pub mod sink;

pub use encoder::{EncodedBody, ResponseEncoder};
pub use result::{HandlerResult, StructuredBody};
pub use sink::{BufferedResponse, ResponseSink, SharedSink};
