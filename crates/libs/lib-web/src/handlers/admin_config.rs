//! # Admin Config Handlers
//!
//! Key/value server settings. `enable_remote_access` lives here and is read by
//! the origin gate on every mobile request, so a PATCH takes effect without a
//! restart.
//!
//! ## Endpoints
//!
//! - `GET    /api/collections/admin_config/records[?key=KEY | ?filter=key="KEY"]`
//! - `POST   /api/collections/admin_config/records`
//! - `GET    /api/collections/admin_config/records/{id}`
//! - `PATCH  /api/collections/admin_config/records/{id}`
//! - `DELETE /api/collections/admin_config/records/{id}`

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use lib_core::dto::{AdminConfigQuery, RecordList};
use lib_core::model::store::models::{AdminConfig, AdminConfigForCreate, AdminConfigForUpdate};
use lib_core::model::store::{new_record_id, AdminConfigRepository};
use lib_core::{AppError, DbPool, Hooks, RecordCreateEvent, Result};
use lib_utils::validation::validate_not_empty;
use std::sync::Arc;
use tracing::info;

pub const COLLECTION: &str = "admin_config";

/// **Route**: `GET /api/collections/admin_config/records`
///
/// `key` (or `filter=key="..."`) filters by exact key.
pub async fn list_admin_config(
    State(db): State<DbPool>,
    Query(query): Query<AdminConfigQuery>,
) -> Result<Json<RecordList<AdminConfig>>> {
    let key = query.key_filter()?;
    let rows = AdminConfigRepository::list(&db, key.as_deref()).await?;
    Ok(Json(RecordList::paged(rows, query.page, query.per_page)))
}

/// **Route**: `POST /api/collections/admin_config/records`
///
/// Error (400): blank or duplicate `key`, or a hook rejected the record.
pub async fn create_admin_config(
    State(db): State<DbPool>,
    State(hooks): State<Arc<Hooks>>,
    Json(mut payload): Json<AdminConfigForCreate>,
) -> Result<Json<AdminConfig>> {
    payload.key = payload.key.trim().to_string();
    validate_not_empty(&payload.key, "key").map_err(AppError::InvalidInput)?;

    let id = new_record_id();
    let record = serde_json::to_value(&payload)?;
    hooks.trigger_record_before_create(&RecordCreateEvent {
        collection: COLLECTION,
        id: &id,
        record: &record,
    })?;

    let row = AdminConfigRepository::create(&db, &id, &payload).await?;
    info!(key = %row.key, "Admin config created");

    Ok(Json(row))
}

/// **Route**: `GET /api/collections/admin_config/records/{id}`
pub async fn get_admin_config(
    State(db): State<DbPool>,
    Path(id): Path<String>,
) -> Result<Json<AdminConfig>> {
    Ok(Json(AdminConfigRepository::find_by_id(&db, &id).await?))
}

/// **Route**: `PATCH /api/collections/admin_config/records/{id}`
pub async fn update_admin_config(
    State(db): State<DbPool>,
    Path(id): Path<String>,
    Json(payload): Json<AdminConfigForUpdate>,
) -> Result<Json<AdminConfig>> {
    let row = AdminConfigRepository::update(&db, &id, &payload).await?;
    info!(key = %row.key, value = %row.value, "Admin config updated");
    Ok(Json(row))
}

/// **Route**: `DELETE /api/collections/admin_config/records/{id}`
pub async fn delete_admin_config(
    State(db): State<DbPool>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    AdminConfigRepository::delete(&db, &id).await?;
    info!(id = %id, "Admin config deleted");
    Ok(StatusCode::NO_CONTENT)
}

// region:    --- Tests
#[cfg(test)]
mod tests {
    use crate::handlers::api_routes;
    use crate::server::AppState;
    use axum::{body::Body, http, http::StatusCode, Router};
    use lib_core::model::store::{test_pool, REMOTE_ACCESS_KEY};
    use lib_core::{Config, Hooks, Settings};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const RECORDS: &str = "/api/collections/admin_config/records";

    async fn app() -> Router {
        let state = AppState::new(test_pool().await, Config::default(), Settings::default(), Hooks::new());
        api_routes().with_state(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let req = http::Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    #[tokio::test]
    async fn filter_by_key_returns_seed_row() {
        let app = app().await;

        let (status, body) = send(&app, "GET", &format!("{RECORDS}?key={REMOTE_ACCESS_KEY}"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_items"], 1);
        assert_eq!(body["items"][0]["value"], "false");
    }

    #[tokio::test]
    async fn equality_filter_selects_one_key() {
        let app = app().await;

        let (status, body) =
            send(&app, "GET", &format!("{RECORDS}?filter=key%3D%22server_name%22"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_items"], 1);
        assert_eq!(body["items"][0]["key"], "server_name");
    }

    #[tokio::test]
    async fn patch_flips_remote_access() {
        let app = app().await;
        let (_, body) = send(&app, "GET", &format!("{RECORDS}?key={REMOTE_ACCESS_KEY}"), None).await;
        let id = body["items"][0]["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, "PATCH", &format!("{RECORDS}/{id}"), Some(json!({ "value": "true" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "true");
    }

    #[tokio::test]
    async fn duplicate_key_is_rejected() {
        let app = app().await;

        let (status, body) = send(
            &app,
            "POST",
            RECORDS,
            Some(json!({ "key": REMOTE_ACCESS_KEY, "value": "true" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "Conflict");
    }

    #[tokio::test]
    async fn create_then_delete() {
        let app = app().await;

        let (status, body) =
            send(&app, "POST", RECORDS, Some(json!({ "key": "motd", "value": "hi" }))).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, _) = send(&app, "DELETE", &format!("{RECORDS}/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("{RECORDS}/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
// endregion: --- Tests
