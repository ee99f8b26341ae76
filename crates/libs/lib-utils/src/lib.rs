//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, and validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, EnvSource, ProcessEnv};
pub use time::{format_time, now_timestamp, now_utc};
pub use validation::{validate_email, validate_not_empty};
