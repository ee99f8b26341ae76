//! # Shopping List Server
//!
//! Thin entry point: registers the hooks and delegates to lib-web for server
//! setup. Any startup error is logged and the process exits with status 1.

use lib_core::hooks::{Hooks, ShoppingListCreateLogger};
use lib_core::settings::SmtpEnvHook;
use lib_web::handlers::shopping_lists::COLLECTION as SHOPPING_LISTS;
use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() {
    let mut hooks = Hooks::new();
    hooks
        .on_bootstrap(SmtpEnvHook)
        .on_record_before_create(SHOPPING_LISTS, ShoppingListCreateLogger);

    let config = ServerConfig {
        hooks,
        ..Default::default()
    };

    if let Err(e) = start_server(config).await {
        tracing::error!("Server failed: {e:#}");
        // The subscriber may not be installed yet if startup failed early
        eprintln!("Server failed: {e:#}");
        std::process::exit(1);
    }
}
