//! # Database Store
//!
//! SQLite connection pool, embedded migrations, and repository implementations.

// region: --- Modules
pub mod admin_config_repository;
pub mod config_store;
pub mod models;
pub mod shopping_list_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use admin_config_repository::AdminConfigRepository;
pub use config_store::{remote_access_enabled, ConfigStore, REMOTE_ACCESS_KEY};
pub use shopping_list_repository::ShoppingListRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use rand::Rng;
use sqlx::migrate::Migrator;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema and seed rows, embedded at compile time from `migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Length of generated record ids.
pub const RECORD_ID_LEN: usize = 15;

const RECORD_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Create a new SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Generate a record id: 15 lowercase alphanumerics.
pub fn new_record_id() -> String {
    let mut rng = rand::thread_rng();
    (0..RECORD_ID_LEN)
        .map(|_| RECORD_ID_ALPHABET[rng.gen_range(0..RECORD_ID_ALPHABET.len())] as char)
        .collect()
}

/// Migrated single-connection in-memory database.
///
/// One connection only: every new `sqlite::memory:` connection would open a
/// separate, empty database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn test_pool() -> DbPool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");

    pool
}
// endregion: --- Types and Functions
