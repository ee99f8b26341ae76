//! # Admin Config Repository
//!
//! Database access for `admin_config` rows.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, AdminConfigRepository};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite:pb_data/data.db").await?;
//!
//! AdminConfigRepository::upsert(&pool, "enable_remote_access", "true").await?;
//!
//! let row = AdminConfigRepository::find_by_key(&pool, "enable_remote_access").await?;
//! assert_eq!(row.map(|r| r.value).as_deref(), Some("true"));
//! # Ok(())
//! # }
//! ```

use super::models::{AdminConfig, AdminConfigForCreate, AdminConfigForUpdate};
use super::{new_record_id, DbPool};
use crate::error::{AppError, Result};
use lib_utils::time::now_timestamp;
use sqlx::query_as;

/// Repository for `admin_config` rows.
pub struct AdminConfigRepository;

impl AdminConfigRepository {
    /// List rows, optionally only the one matching `key` exactly.
    pub async fn list(pool: &DbPool, key: Option<&str>) -> Result<Vec<AdminConfig>> {
        let rows = query_as::<_, AdminConfig>(
            "SELECT * FROM admin_config WHERE (?1 IS NULL OR key = ?1) ORDER BY key",
        )
        .bind(key)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Find the row stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(AdminConfig))` - row found
    /// * `Ok(None)` - no row with that key
    /// * `Err(AppError)` - database error
    pub async fn find_by_key(pool: &DbPool, key: &str) -> Result<Option<AdminConfig>> {
        let row = query_as::<_, AdminConfig>("SELECT * FROM admin_config WHERE key = ? LIMIT 1")
            .bind(key)
            .fetch_optional(pool)
            .await?;

        Ok(row)
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<AdminConfig> {
        query_as::<_, AdminConfig>("SELECT * FROM admin_config WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Insert a new row under a pre-assigned id.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`] when `key` already exists.
    pub async fn create(pool: &DbPool, id: &str, data: &AdminConfigForCreate) -> Result<AdminConfig> {
        let now = now_timestamp();
        let row = query_as::<_, AdminConfig>(
            "INSERT INTO admin_config (id, key, value, created, updated) VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(id)
        .bind(&data.key)
        .bind(&data.value)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    pub async fn update(pool: &DbPool, id: &str, data: &AdminConfigForUpdate) -> Result<AdminConfig> {
        query_as::<_, AdminConfig>(
            "UPDATE admin_config SET value = ?, updated = ? WHERE id = ? RETURNING *",
        )
        .bind(&data.value)
        .bind(now_timestamp())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Set `key` to `value`, creating the row if it does not exist.
    pub async fn upsert(pool: &DbPool, key: &str, value: &str) -> Result<AdminConfig> {
        let now = now_timestamp();
        let row = query_as::<_, AdminConfig>(
            r#"
            INSERT INTO admin_config (id, key, value, created, updated)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated
            RETURNING *
            "#,
        )
        .bind(new_record_id())
        .bind(key)
        .bind(value)
        .bind(&now)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(pool: &DbPool, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM admin_config WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("admin_config record '{id}' wasn't found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::test_pool;

    fn payload(key: &str, value: &str) -> AdminConfigForCreate {
        AdminConfigForCreate {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn list_filters_by_exact_key() {
        let pool = test_pool().await;

        let all = AdminConfigRepository::list(&pool, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filtered = AdminConfigRepository::list(&pool, Some("server_name")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].value, "ShoppingList");

        let none = AdminConfigRepository::list(&pool, Some("server")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn duplicate_key_is_a_conflict() {
        let pool = test_pool().await;
        let err = AdminConfigRepository::create(&pool, &new_record_id(), &payload("server_name", "Other"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let pool = test_pool().await;

        let created = AdminConfigRepository::upsert(&pool, "password", "hunter2").await.unwrap();
        assert_eq!(created.value, "hunter2");

        let updated = AdminConfigRepository::upsert(&pool, "password", "correct-horse").await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.value, "correct-horse");
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_are_not_found() {
        let pool = test_pool().await;
        let update = AdminConfigForUpdate { value: "x".to_string() };

        assert!(matches!(
            AdminConfigRepository::update(&pool, "missing", &update).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            AdminConfigRepository::delete(&pool, "missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_changes_value_and_timestamp() {
        let pool = test_pool().await;
        let row = AdminConfigRepository::create(&pool, &new_record_id(), &payload("theme", "light"))
            .await
            .unwrap();

        let updated = AdminConfigRepository::update(&pool, &row.id, &AdminConfigForUpdate { value: "dark".to_string() })
            .await
            .unwrap();

        assert_eq!(updated.value, "dark");
        assert!(updated.updated >= row.updated);
    }
}
