//! # Core Library
//!
//! Core models, database, configuration, settings, and lifecycle hooks.

pub mod config;
pub mod dto;
pub mod error;
pub mod hooks;
pub mod mailer;
pub mod model;
pub mod settings;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use hooks::{HookOutcome, Hooks, RecordCreateEvent};
pub use model::store::{create_pool, ConfigStore, DbPool, MIGRATOR};
pub use settings::Settings;
