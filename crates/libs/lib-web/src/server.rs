//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! ## Boot Sequence
//!
//! 1. Tracing subscriber from `LOG_LEVEL`
//! 2. `.env` and [`Config::from_env`], then validation
//! 3. SQLite pool and embedded migrations
//! 4. Bootstrap hooks fold the environment into [`Settings`]
//! 5. Frontend bundle lookup (missing bundle is logged, not fatal)
//! 6. Router, bind, serve until Ctrl+C or SIGTERM
//!
//! ## Middleware Order
//!
//! Outermost first: request stamp, request logging, trace span, origin gate,
//! CORS. The origin gate sits outside the CORS layer so mobile preflights are
//! answered by the gate and never by the generic policy.

// region: --- Imports
use crate::frontend::{frontend_fallback, resolve_dist_root, DEFAULT_DIST_SUBPATHS};
use crate::handlers;
use crate::middleware::{log_requests, origin_gate, stamp_req, RequestStamp};
use axum::{
    extract::FromRef,
    http::{HeaderValue, Method},
    middleware, Router,
};
use lib_core::{create_pool, Config, ConfigStore, DbPool, Hooks, Settings, MIGRATOR};
use lib_utils::envs::ProcessEnv;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    /// Frozen after the bootstrap hooks ran.
    pub settings: Arc<Settings>,
    pub hooks: Arc<Hooks>,
    /// Lookup used by the origin gate; the pool itself in production.
    pub config_store: Arc<dyn ConfigStore>,
}

impl AppState {
    pub fn new(db: DbPool, config: Config, settings: Settings, hooks: Hooks) -> Self {
        Self {
            config_store: Arc::new(db.clone()),
            db,
            config,
            settings: Arc::new(settings),
            hooks: Arc::new(hooks),
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

impl FromRef<AppState> for Arc<Hooks> {
    fn from_ref(state: &AppState) -> Self {
        state.hooks.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ConfigStore> {
    fn from_ref(state: &AppState) -> Self {
        state.config_store.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration supplied by the binary.
pub struct ServerConfig {
    /// Hooks registered before boot
    pub hooks: Hooks,
    /// Frontend bundle locations under `FRONTEND_DIR`, in order of preference
    pub dist_subpaths: &'static [&'static str],
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hooks: Hooks::new(),
            dist_subpaths: DEFAULT_DIST_SUBPATHS,
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - The tracing subscriber cannot be installed
/// - Configuration loading or validation fails
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = init_tracing()?;

    info!("SHOPPING LIST SERVER STARTING");
    info!("Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;

    info!("Database URL: {}", app_config.database_url);

    // Ensure data directory exists for SQLite database
    if let Some(db_path) = app_config.database_path() {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
        info!("Database file will be at: {}", db_path.display());
    }

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!("Running embedded database migrations");
    MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    let settings = config
        .hooks
        .run_bootstrap(&ProcessEnv, Settings::new(app_config.app_name.clone()));
    info!(
        smtp_enabled = settings.smtp.enabled,
        sender = %settings.meta.sender_address,
        "Settings ready"
    );

    let frontend_root = resolve_dist_root(&app_config.frontend_dir, config.dist_subpaths);

    let bind_address = app_config.bind_address.clone();
    let state = AppState::new(pool, app_config, settings, config.hooks);
    let app = create_router(state, frontend_root.as_deref());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Install the global subscriber. Returns the effective level directive.
fn init_tracing() -> anyhow::Result<String> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {e}"))?;

    Ok(log_level)
}

/// Create the application router with all routes and middleware.
///
/// `frontend_root` is the resolved bundle directory, or `None` when no
/// bundle was found.
pub fn create_router(state: AppState, frontend_root: Option<&Path>) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);
    let config_store = state.config_store.clone();

    info!("[ROUTE SETUP] Registering HTTP routes...");
    handlers::api_routes()
        .fallback_service(frontend_fallback(frontend_root))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn_with_state(config_store, origin_gate))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(log_requests))
        // Outermost so every inner layer sees the stamp
        .layer(middleware::from_fn(stamp_req))
}

/// CORS policy for non-mobile origins.
///
/// An empty allow-list means any origin, without credentials.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Log server information
fn log_server_info() {
    info!(" HEALTH:");
    info!("   • GET    /api/health");
    info!(" SHOPPING LISTS:");
    info!("   • GET    /api/collections/shopping_lists/records?list_code={{code}}");
    info!("   • POST   /api/collections/shopping_lists/records");
    info!("   • GET    /api/collections/shopping_lists/records/{{id}}");
    info!("   • PATCH  /api/collections/shopping_lists/records/{{id}}");
    info!("   • DELETE /api/collections/shopping_lists/records/{{id}}");
    info!(" ADMIN CONFIG:");
    info!("   • GET    /api/collections/admin_config/records?key={{key}}");
    info!("   • POST   /api/collections/admin_config/records");
    info!("   • PATCH  /api/collections/admin_config/records/{{id}}");
    info!("   • DELETE /api/collections/admin_config/records/{{id}}");
    info!(" SETTINGS:");
    info!("   • GET    /api/settings");
    info!("   • POST   /api/settings/test/email");
}
// endregion: --- Server Setup

// endregion: --- Tests
