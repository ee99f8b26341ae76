//! # Request Stamping Middleware
//!
//! Tags each request with an id and arrival time, and echoes the id back in
//! the `X-Request-ID` response header so client reports can be matched with
//! server logs.
//!
//! Handlers and later middleware read it via `Extension<RequestStamp>`.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::SystemTime;
use uuid::Uuid;

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
    /// Request timestamp
    pub timestamp: SystemTime,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: SystemTime::now(),
        }
    }
}

/// Request stamping middleware. Must wrap [`log_requests`](super::log_requests)
/// so the logger can see the stamp.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();

    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Extension, http, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn handler_sees_the_id_sent_back_in_the_header() {
        let app = Router::new()
            .route("/", get(|Extension(stamp): Extension<RequestStamp>| async move { stamp.id }))
            .layer(middleware::from_fn(stamp_req));

        let res = app
            .oneshot(http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = res.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(header.as_bytes(), &body[..]);
        assert!(Uuid::parse_str(&header).is_ok());
    }
}
