//! # Shopping List Handlers
//!
//! ## Endpoints
//!
//! - `GET    /api/collections/shopping_lists/records[?list_code=CODE]`
//! - `POST   /api/collections/shopping_lists/records`
//! - `GET    /api/collections/shopping_lists/records/{id}`
//! - `PATCH  /api/collections/shopping_lists/records/{id}`
//! - `DELETE /api/collections/shopping_lists/records/{id}`
//!
//! ## Request Examples
//!
//! ```bash
//! # Join a shared list by its code
//! curl "http://localhost:8090/api/collections/shopping_lists/records?list_code=weekly"
//!
//! # Same lookup in the PocketBase form the web client uses
//! curl -G http://localhost:8090/api/collections/shopping_lists/records \
//!   --data-urlencode 'filter=list_code="weekly"' -d perPage=1
//!
//! # Share a new list
//! curl -X POST http://localhost:8090/api/collections/shopping_lists/records \
//!   -H 'Content-Type: application/json' \
//!   -d '{"list_code":"weekly","data":{"items":[],"categories":[]}}'
//! ```


use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use lib_core::dto::{RecordList, ShoppingListQuery};
use lib_core::model::store::models::{ShoppingList, ShoppingListForCreate, ShoppingListForUpdate};
use lib_core::model::store::{new_record_id, ShoppingListRepository};
use lib_core::{AppError, DbPool, Hooks, RecordCreateEvent, Result};
use lib_utils::validation::validate_not_empty;
use std::sync::Arc;
use tracing::{debug, info};

/// Collection name the before-create hooks are keyed by.
pub const COLLECTION: &str = "shopping_lists";

/// **Route**: `GET /api/collections/shopping_lists/records`
///
/// Newest `updated` first. `list_code` (or `filter=list_code="..."`)
/// filters by exact code.
///
/// Error (400): unsupported filter, sort, or query parameter.
pub async fn list_shopping_lists(
    State(db): State<DbPool>,
    Query(query): Query<ShoppingListQuery>,
) -> Result<Json<RecordList<ShoppingList>>> {
    let list_code = query.list_code_filter()?;
    let lists = ShoppingListRepository::list(&db, list_code.as_deref()).await?;
    debug!(count = lists.len(), list_code = ?list_code, "Listed shopping lists");
    Ok(Json(RecordList::paged(lists, query.page, query.per_page)))
}

/// **Route**: `POST /api/collections/shopping_lists/records`
///
/// # Returns
///
/// Success (200): the stored list.
/// Error (400): blank or duplicate `list_code`, or a hook rejected the record.
pub async fn create_shopping_list(
    State(db): State<DbPool>,
    State(hooks): State<Arc<Hooks>>,
    Json(mut payload): Json<ShoppingListForCreate>,
) -> Result<Json<ShoppingList>> {
    payload.list_code = payload.list_code.trim().to_string();
    validate_not_empty(&payload.list_code, "list_code").map_err(AppError::InvalidInput)?;

    let id = new_record_id();
    let record = serde_json::to_value(&payload)?;
    hooks.trigger_record_before_create(&RecordCreateEvent {
        collection: COLLECTION,
        id: &id,
        record: &record,
    })?;

    let list = ShoppingListRepository::create(&db, &id, &payload).await?;
    info!(id = %list.id, list_code = %list.list_code, "Shopping list created");

    Ok(Json(list))
}

/// **Route**: `GET /api/collections/shopping_lists/records/{id}`
pub async fn get_shopping_list(
    State(db): State<DbPool>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingList>> {
    Ok(Json(ShoppingListRepository::find_by_id(&db, &id).await?))
}

/// **Route**: `PATCH /api/collections/shopping_lists/records/{id}`
///
/// Only the fields present in the body change.
pub async fn update_shopping_list(
    State(db): State<DbPool>,
    Path(id): Path<String>,
    Json(payload): Json<ShoppingListForUpdate>,
) -> Result<Json<ShoppingList>> {
    if let Some(code) = &payload.list_code {
        validate_not_empty(code, "list_code").map_err(AppError::InvalidInput)?;
    }

    let list = ShoppingListRepository::update(&db, &id, &payload).await?;
    debug!(id = %list.id, "Shopping list updated");

    Ok(Json(list))
}

/// **Route**: `DELETE /api/collections/shopping_lists/records/{id}`
pub async fn delete_shopping_list(
    State(db): State<DbPool>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    ShoppingListRepository::delete(&db, &id).await?;
    info!(id = %id, "Shopping list deleted");
    Ok(StatusCode::NO_CONTENT)
}
