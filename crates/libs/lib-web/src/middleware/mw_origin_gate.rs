//! # Origin Gate Middleware
//!
//! CORS for the packaged mobile app, switched on and off by the persisted
//! `enable_remote_access` flag.
//!
//! The mobile shell always sends one of two fixed origins. Requests carrying
//! any other origin (or none) pass through untouched and never hit the
//! database. For the mobile origins the flag is read on every request:
//!
//! | Flag | Method | Result |
//! |---|---|---|
//! | `"true"` | `OPTIONS` | `204`, CORS headers, handler not called |
//! | `"true"` | other | handler response plus CORS headers |
//! | anything else, missing, lookup error | any | `403` "Remote access disabled from this server" |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, Router};
//! use lib_web::middleware::origin_gate;
//!
//! let app = Router::new()
//!     .route("/api/health", get(health))
//!     .layer(middleware::from_fn_with_state(config_store, origin_gate));
//! ```

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use lib_core::model::store::remote_access_enabled;
use lib_core::{AppError, ConfigStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Origins used by the mobile app shell.
pub const MOBILE_ORIGINS: [&str; 2] = ["capacitor://localhost", "http://localhost"];

/// Message of the 403 sent while remote access is disabled.
pub const REMOTE_ACCESS_DISABLED: &str = "Remote access disabled from this server";

const ALLOW_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";

/// Origin gate middleware. Use with `axum::middleware::from_fn_with_state`.
pub async fn origin_gate(
    State(store): State<Arc<dyn ConfigStore>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(origin) = mobile_origin(req.headers()) else {
        return next.run(req).await;
    };

    if !remote_access_enabled(store.as_ref()).await {
        warn!(origin = ?origin, path = %req.uri().path(), "[ORIGIN GATE] Rejected mobile origin");
        return AppError::Forbidden(REMOTE_ACCESS_DISABLED.to_string()).into_response();
    }

    debug!(origin = ?origin, method = %req.method(), "[ORIGIN GATE] Allowed mobile origin");

    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    apply_cors_headers(res.headers_mut(), origin);
    res
}

/// The request's `Origin` if it is one of [`MOBILE_ORIGINS`].
fn mobile_origin(headers: &HeaderMap) -> Option<HeaderValue> {
    let origin = headers.get(ORIGIN)?;
    let value = origin.to_str().ok()?;
    MOBILE_ORIGINS.contains(&value).then(|| origin.clone())
}

fn apply_cors_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
}

// endregion: --- Tests
