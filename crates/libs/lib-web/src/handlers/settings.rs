//! # Settings Handlers
//!
//! Read-only view of the boot-time settings and a mail round-trip check.
//!
//! The SMTP password is never serialized.

use axum::{extract::State, http::StatusCode, Json};
use lib_core::dto::TestEmailRequest;
use lib_core::mailer::Mailer;
use lib_core::{AppError, Result, Settings};
use lib_utils::validation::validate_email;
use std::sync::Arc;
use tracing::info;

/// **Route**: `GET /api/settings`
pub async fn get_settings(State(settings): State<Arc<Settings>>) -> Json<Settings> {
    Json(settings.as_ref().clone())
}

/// **Route**: `POST /api/settings/test/email`
///
/// # Returns
///
/// Success (204): the message was accepted by the relay.
/// Error (400): invalid address or mail is disabled.
/// Error (502): the relay refused or could not be reached.
pub async fn send_test_email(
    State(settings): State<Arc<Settings>>,
    Json(req): Json<TestEmailRequest>,
) -> Result<StatusCode> {
    validate_email(&req.email).map_err(AppError::InvalidInput)?;

    let mailer = Mailer::from_settings(&settings)?;
    let subject = format!("{} test email", settings.meta.app_name);
    let body = format!(
        "This is a test email from {}. Your mail settings are working.",
        settings.meta.app_name
    );

    mailer.send(&req.email, &subject, &body).await?;
    info!(to = %req.email, "Test email sent");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http, routing::{get, post}, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(settings: Settings) -> Router {
        Router::new()
            .route("/api/settings", get(get_settings))
            .route("/api/settings/test/email", post(send_test_email))
            .with_state(Arc::new(settings))
    }

    fn post_email(email: &str) -> http::Request<Body> {
        http::Request::builder()
            .method("POST")
            .uri("/api/settings/test/email")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "email": email }).to_string()))
            .unwrap()
    }

    async fn json_body(res: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_email_rejected_when_smtp_disabled() {
        let res = app(Settings::new("ShoppingList"))
            .oneshot(post_email("me@example.com"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["code"], "InvalidInput");
    }

    #[tokio::test]
    async fn test_email_rejects_bad_address_first() {
        let mut settings = Settings::new("ShoppingList");
        settings.smtp.enabled = true;
        settings.smtp.host = "smtp.example.com".to_string();

        let res = app(settings).oneshot(post_email("not-an-address")).await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn settings_view_hides_password() {
        let mut settings = Settings::new("ShoppingList");
        settings.smtp.password = "hunter2".to_string();

        let res = app(settings)
            .oneshot(http::Request::builder().uri("/api/settings").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["meta"]["app_name"], "ShoppingList");
        assert!(body["smtp"].get("password").is_none());
        assert!(!body.to_string().contains("hunter2"));
    }
}
