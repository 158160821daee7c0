//! Route handlers

pub mod handler;

pub use handler::{sync_handler, Handler, SyncHandler};
