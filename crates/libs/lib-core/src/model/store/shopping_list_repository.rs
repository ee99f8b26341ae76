//! # Shopping List Repository
//!
//! Database access for `shopping_lists`. The list document is stored as JSON
//! text and decoded on the way out.

use super::models::{ShoppingList, ShoppingListForCreate, ShoppingListForUpdate, ShoppingListRow};
use super::DbPool;
use crate::error::{AppError, Result};
use lib_utils::time::now_timestamp;
use sqlx::query_as;

/// Repository for `shopping_lists` rows.
pub struct ShoppingListRepository;

impl ShoppingListRepository {
    /// List shopping lists, most recently updated first.
    ///
    /// When `list_code` is given only the list with exactly that code is returned.
    pub async fn list(pool: &DbPool, list_code: Option<&str>) -> Result<Vec<ShoppingList>> {
        let rows = query_as::<_, ShoppingListRow>(
            "SELECT * FROM shopping_lists WHERE (?1 IS NULL OR list_code = ?1) ORDER BY updated DESC, id",
        )
        .bind(list_code)
        .fetch_all(pool)
        .await?;

        rows.into_iter()
            .map(|row| ShoppingList::try_from(row).map_err(AppError::from))
            .collect()
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<ShoppingList> {
        let row = query_as::<_, ShoppingListRow>("SELECT * FROM shopping_lists WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(ShoppingList::try_from(row)?)
    }

    /// Insert a list under an id assigned before the create hooks ran.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`] when `list_code` is already taken.
    pub async fn create(pool: &DbPool, id: &str, data: &ShoppingListForCreate) -> Result<ShoppingList> {
        let now = now_timestamp();
        let row = query_as::<_, ShoppingListRow>(
            "INSERT INTO shopping_lists (id, list_code, data, created, updated) VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(id)
        .bind(data.list_code.trim())
        .bind(serde_json::to_string(&data.data)?)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await?;

        Ok(ShoppingList::try_from(row)?)
    }

    /// Apply the fields present in `data` and bump `updated`.
    pub async fn update(pool: &DbPool, id: &str, data: &ShoppingListForUpdate) -> Result<ShoppingList> {
        let document = data.data.as_ref().map(serde_json::to_string).transpose()?;
        let list_code = data.list_code.as_deref().map(str::trim);

        let row = query_as::<_, ShoppingListRow>(
            r#"
            UPDATE shopping_lists
            SET list_code = COALESCE(?1, list_code),
                data = COALESCE(?2, data),
                updated = ?3
            WHERE id = ?4
            RETURNING *
            "#,
        )
        .bind(list_code)
        .bind(document)
        .bind(now_timestamp())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        Ok(ShoppingList::try_from(row)?)
    }

    pub async fn delete(pool: &DbPool, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM shopping_lists WHERE id = ?")
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
    AppError::NotFound(format!("shopping_lists record '{id}' wasn't found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::{new_record_id, test_pool};
    use serde_json::json;

    fn payload(code: &str) -> ShoppingListForCreate {
        ShoppingListForCreate {
            list_code: code.to_string(),
            data: json!({ "items": [{ "name": "milk" }], "categories": [] }),
        }
    }

    #[tokio::test]
    async fn create_round_trips_the_document() {
        let pool = test_pool().await;
        let id = new_record_id();

        let created = ShoppingListRepository::create(&pool, &id, &payload("weekly")).await.unwrap();
        assert_eq!(created.id, id);
        assert_eq!(created.data["items"][0]["name"], "milk");

        let found = ShoppingListRepository::find_by_id(&pool, &id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn duplicate_list_code_is_a_conflict() {
        let pool = test_pool().await;
        ShoppingListRepository::create(&pool, &new_record_id(), &payload("weekly")).await.unwrap();

        let err = ShoppingListRepository::create(&pool, &new_record_id(), &payload("weekly"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_filters_by_code() {
        let pool = test_pool().await;
        ShoppingListRepository::create(&pool, &new_record_id(), &payload("weekly")).await.unwrap();
        ShoppingListRepository::create(&pool, &new_record_id(), &payload("party")).await.unwrap();

        assert_eq!(ShoppingListRepository::list(&pool, None).await.unwrap().len(), 2);

        let party = ShoppingListRepository::list(&pool, Some("party")).await.unwrap();
        assert_eq!(party.len(), 1);
        assert_eq!(party[0].list_code, "party");
    }

    #[tokio::test]
    async fn update_keeps_fields_that_are_not_sent() {
        let pool = test_pool().await;
        let id = new_record_id();
        ShoppingListRepository::create(&pool, &id, &payload("weekly")).await.unwrap();

        let update = ShoppingListForUpdate {
            list_code: None,
            data: Some(json!({ "items": [], "categories": ["dairy"] })),
        };
        let updated = ShoppingListRepository::update(&pool, &id, &update).await.unwrap();

        assert_eq!(updated.list_code, "weekly");
        assert_eq!(updated.data["categories"][0], "dairy");
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let pool = test_pool().await;
        let id = new_record_id();
        ShoppingListRepository::create(&pool, &id, &payload("weekly")).await.unwrap();

        ShoppingListRepository::delete(&pool, &id).await.unwrap();

        assert!(matches!(
            ShoppingListRepository::find_by_id(&pool, &id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            ShoppingListRepository::delete(&pool, &id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
