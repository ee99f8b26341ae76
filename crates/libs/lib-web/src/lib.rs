//! # Web Library
//!
//! HTTP handlers, middleware, frontend serving, and server startup.

pub mod frontend;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{create_router, start_server, AppState, ServerConfig};
