//! # HTTP Request Handlers
//!
//! Axum handlers grouped by collection.
//!
//! ## Handler Modules
//!
//! - **[`health`]**: `GET /api/health`
//! - **[`shopping_lists`]**: CRUD on `/api/collections/shopping_lists/records`
//!   (creation runs the registered before-create hooks)
//! - **[`admin_config`]**: CRUD on `/api/collections/admin_config/records`
//! - **[`settings`]**: `GET /api/settings`, `POST /api/settings/test/email`
//!
//! ## Error Handling
//!
//! Handlers return `lib_core::Result<T>`; [`AppError`](lib_core::AppError)
//! renders itself as `{"error": ..., "code": ...}` with the matching status.

pub mod admin_config;
pub mod health;
pub mod settings;
pub mod shopping_lists;

use crate::server::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// All API routes, without middleware or the frontend fallback.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/collections/shopping_lists/records",
            get(shopping_lists::list_shopping_lists).post(shopping_lists::create_shopping_list),
        )
        .route(
            "/api/collections/shopping_lists/records/{id}",
            get(shopping_lists::get_shopping_list)
                .patch(shopping_lists::update_shopping_list)
                .delete(shopping_lists::delete_shopping_list),
        )
        .route(
            "/api/collections/admin_config/records",
            get(admin_config::list_admin_config).post(admin_config::create_admin_config),
        )
        .route(
            "/api/collections/admin_config/records/{id}",
            get(admin_config::get_admin_config)
                .patch(admin_config::update_admin_config)
                .delete(admin_config::delete_admin_config),
        )
        .route("/api/settings", get(settings::get_settings))
        .route("/api/settings/test/email", post(settings::send_test_email))
}
