//! HTTP server lifecycle.
//!
//! Binds the configured address, serves the router, and drains open
//! connections on SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{bind_addr, start_server, ServerError};
