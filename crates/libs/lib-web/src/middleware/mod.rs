//! # Middleware
//!
//! Axum middleware for the mobile origin gate, request stamping, and logging.
//!
//! ## Modules
//!
//! - **[`mw_origin_gate`]**: CORS for mobile shell origins behind the remote-access flag
//! - **[`mw_req_stamp`]**: Request ID and timestamp stamping
//! - **[`mw_logging`]**: Request/response logging

// region: --- Modules
pub mod mw_logging;
pub mod mw_origin_gate;
pub mod mw_req_stamp;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_logging::log_requests;
pub use mw_origin_gate::{origin_gate, MOBILE_ORIGINS, REMOTE_ACCESS_DISABLED};
pub use mw_req_stamp::{stamp_req, RequestStamp};
// endregion: --- Re-exports
