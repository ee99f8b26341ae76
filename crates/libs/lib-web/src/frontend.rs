//! # Frontend Bundle
//!
//! Serves the pre-built web app for every route the API does not claim.
//!
//! The bundle is looked up under the configured frontend directory, first at
//! `web/dist` (the layout of a source checkout) and then at `dist` (a bare
//! release archive). Paths that match a file are served as-is; anything else
//! gets `index.html` so the client-side router can take over.
//!
//! A missing bundle does not stop the server. Unmatched routes then answer
//! `404 Frontend bundle not found` and the API keeps working.

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{any, MethodRouter},
};
use std::path::{Path, PathBuf};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

/// Candidate bundle locations, in order of preference.
pub const DEFAULT_DIST_SUBPATHS: &[&str] = &["web/dist", "dist"];

/// Return the first candidate under `base` that is a directory.
pub fn resolve_dist_root(base: &Path, subpaths: &[&str]) -> Option<PathBuf> {
    let root = subpaths
        .iter()
        .map(|sub| base.join(sub))
        .find(|candidate| candidate.is_dir());

    match &root {
        Some(root) => info!("Serving frontend from {}", root.display()),
        None => warn!(
            base = %base.display(),
            candidates = ?subpaths,
            "Frontend bundle not found, static routes will return 404"
        ),
    }

    root
}

/// Static file service with SPA fallback to `index.html`.
pub fn frontend_service(root: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(root).fallback(ServeFile::new(root.join("index.html")))
}

/// Fallback route for the router: the bundle if one was found, a 404 otherwise.
pub fn frontend_fallback(root: Option<&Path>) -> MethodRouter {
    match root {
        Some(root) => MethodRouter::new().fallback_service(frontend_service(root)),
        None => any(|| async { (StatusCode::NOT_FOUND, "Frontend bundle not found").into_response() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http, Router};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn bundle(dir: &Path, marker: &str) {
        fs::create_dir_all(dir.join("assets")).unwrap();
        fs::write(dir.join("index.html"), format!("<html>{marker}</html>")).unwrap();
        fs::write(dir.join("assets/app.js"), "console.log('app')").unwrap();
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let res = app
            .oneshot(http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn prefers_web_dist_over_dist() {
        let tmp = TempDir::new().unwrap();
        bundle(&tmp.path().join("web/dist"), "web");
        bundle(&tmp.path().join("dist"), "bare");

        let root = resolve_dist_root(tmp.path(), DEFAULT_DIST_SUBPATHS).unwrap();
        assert_eq!(root, tmp.path().join("web/dist"));
    }

    #[test]
    fn falls_back_to_dist() {
        let tmp = TempDir::new().unwrap();
        bundle(&tmp.path().join("dist"), "bare");

        let root = resolve_dist_root(tmp.path(), DEFAULT_DIST_SUBPATHS).unwrap();
        assert_eq!(root, tmp.path().join("dist"));
    }

    #[test]
    fn nothing_found_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(resolve_dist_root(tmp.path(), DEFAULT_DIST_SUBPATHS).is_none());
    }

    #[tokio::test]
    async fn serves_files_and_spa_fallback() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("dist");
        bundle(&root, "spa");

        let app: Router = Router::new().fallback_service(frontend_fallback(Some(&root)));

        let (status, body) = get(app.clone(), "/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('app')");

        let (status, body) = get(app.clone(), "/lists/weekly").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>spa</html>");

        let (status, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>spa</html>");
    }

    #[tokio::test]
    async fn missing_bundle_answers_404() {
        let app: Router = Router::new().fallback_service(frontend_fallback(None));

        let (status, body) = get(app, "/anything").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Frontend bundle not found");
    }
}
