//! # Application Configuration
//!
//! Server configuration loaded from environment variables. Mail settings are
//! not part of this struct; they are produced by the bootstrap hooks (see
//! [`crate::settings`]).
//!
//! The config is loaded once at startup, validated, and then passed by value
//! into the router state. There is no global instance.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite:pb_data/data.db` |
//! | `BIND_ADDRESS` | `127.0.0.1:8090` |
//! | `FRONTEND_DIR` | `.` |
//! | `CORS_ALLOWED_ORIGINS` | empty (permissive, no credentials) |
//! | `APP_NAME` | `ShoppingList` |

use crate::error::{AppError, Result};
use lib_utils::envs::get_env_or;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Address the HTTP server binds to
    pub bind_address: String,

    /// Directory holding the frontend bundle (`web/dist` or `dist` beneath it)
    pub frontend_dir: PathBuf,

    /// Origins granted CORS by the default policy.
    ///
    /// Mobile shell origins are handled by the origin gate, not by this list.
    pub cors_allowed_origins: Vec<String>,

    /// Display name used as the default mail sender name
    pub app_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:pb_data/data.db".to_string(),
            bind_address: "127.0.0.1:8090".to_string(),
            frontend_dir: PathBuf::from("."),
            cors_allowed_origins: Vec::new(),
            app_name: "ShoppingList".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let cors_allowed_origins = parse_origin_list(&get_env_or("CORS_ALLOWED_ORIGINS", ""));

        Ok(Self {
            database_url: get_env_or("DATABASE_URL", &defaults.database_url),
            bind_address: get_env_or("BIND_ADDRESS", &defaults.bind_address),
            frontend_dir: PathBuf::from(get_env_or("FRONTEND_DIR", ".")),
            cors_allowed_origins,
            app_name: get_env_or("APP_NAME", &defaults.app_name),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.parse::<SocketAddr>().is_err() {
            return Err(AppError::Config(format!(
                "BIND_ADDRESS must be a socket address, got '{}'",
                self.bind_address
            )));
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(AppError::Config("DATABASE_URL must be a sqlite: URL".to_string()));
        }

        Ok(())
    }

    /// Filesystem path of the SQLite database, if the URL points at a file.
    pub fn database_path(&self) -> Option<PathBuf> {
        let path = self.database_url.strip_prefix("sqlite:")?;
        let path = path.trim_start_matches("//");
        let path = path.split('?').next().unwrap_or(path);
        if path.is_empty() || path.starts_with(":memory:") {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let config = Config {
            bind_address: "localhost".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn non_sqlite_url_is_rejected() {
        let config = Config {
            database_url: "postgres://localhost/app".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn origin_list_skips_blanks() {
        assert_eq!(
            parse_origin_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(parse_origin_list("").is_empty());
    }

    #[test]
    fn database_path_handles_memory_and_files() {
        let memory = Config {
            database_url: "sqlite::memory:".to_string(),
            ..Config::default()
        };
        assert_eq!(memory.database_path(), None);

        assert_eq!(
            Config::default().database_path(),
            Some(PathBuf::from("pb_data/data.db"))
        );

        let with_query = Config {
            database_url: "sqlite://data/app.db?mode=rwc".to_string(),
            ..Config::default()
        };
        assert_eq!(with_query.database_path(), Some(PathBuf::from("data/app.db")));
    }
}
