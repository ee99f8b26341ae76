//! # Config Store
//!
//! Read access to `admin_config` values, behind a trait so request-path code
//! (the origin gate) can be exercised against stores that fail or count calls.

use super::{AdminConfigRepository, DbPool};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use tracing::warn;

/// `admin_config` key of the remote-access flag.
pub const REMOTE_ACCESS_KEY: &str = "enable_remote_access";

/// Lookup of persisted configuration values.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Value stored under `key`. A missing row is an error.
    async fn config_value(&self, key: &str) -> Result<String>;
}

#[async_trait]
impl ConfigStore for DbPool {
    async fn config_value(&self, key: &str) -> Result<String> {
        AdminConfigRepository::find_by_key(self, key)
            .await?
            .map(|row| row.value)
            .ok_or_else(|| AppError::NotFound(format!("No admin_config row for '{key}'")))
    }
}

/// Whether mobile-shell origins may reach the API.
///
/// Only the exact string `"true"` enables access. A missing row and a failed
/// lookup both count as disabled.
pub async fn remote_access_enabled(store: &dyn ConfigStore) -> bool {
    match store.config_value(REMOTE_ACCESS_KEY).await {
        Ok(value) => value == "true",
        Err(err) => {
            warn!(error = %err, "Remote access lookup failed, treating as disabled");
            false
        }
    }
}
