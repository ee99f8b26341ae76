//! # Runtime Settings
//!
//! The settings value handed to the mail subsystem. It is produced once at
//! boot by folding the registered bootstrap hooks over [`Settings::new`],
//! wrapped in an `Arc`, and never mutated afterwards.
//!
//! ## SMTP from the environment
//!
//! [`SmtpEnvHook`] fills the SMTP fields when `SMTP_ENABLED=true`:
//!
//! ```text
//! SMTP_ENABLED=true
//! SMTP_HOST=smtp.example.com
//! SMTP_PORT=465            # default 587; 465 forces implicit TLS
//! SMTP_USER=mailer
//! SMTP_PASSWORD=secret
//! SMTP_SENDER_NAME=ShoppingList
//! SMTP_SENDER_ADDRESS=noreply@example.com
//! ```

use crate::hooks::BootstrapHook;
use lib_utils::envs::EnvSource;
use serde::Serialize;
use tracing::info;

/// Port used when `SMTP_PORT` is unset, zero, or not a number.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Port that implies implicit TLS instead of STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP transport settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SmtpSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Implicit TLS. When false the transport negotiates STARTTLS.
    pub tls: bool,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: String::new(),
            tls: false,
        }
    }
}

/// Application identity used in outgoing mail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetaSettings {
    pub app_name: String,
    pub sender_name: String,
    pub sender_address: String,
}

/// Settings produced at boot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub smtp: SmtpSettings,
    pub meta: MetaSettings,
}

impl Settings {
    /// Default settings carrying the application name.
    pub fn new(app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            smtp: SmtpSettings::default(),
            meta: MetaSettings {
                sender_name: app_name.clone(),
                app_name,
                sender_address: String::new(),
            },
        }
    }
}

/// Resolve the SMTP port the same way for every caller.
///
/// Anything that does not parse as a port counts as zero, and zero means
/// "use the default". That includes numbers outside `u16` such as `70000`
/// or `-1`: they cannot name a TCP port, so they resolve to 587 instead of
/// being carried into the transport.
pub fn resolve_smtp_port(raw: Option<&str>) -> u16 {
    let port = raw.and_then(|value| value.parse::<u16>().ok()).unwrap_or(0);
    if port == 0 {
        DEFAULT_SMTP_PORT
    } else {
        port
    }
}

/// Bootstrap hook that reads `SMTP_*` variables into [`Settings`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SmtpEnvHook;

impl BootstrapHook for SmtpEnvHook {
    fn name(&self) -> &'static str {
        "smtp-env"
    }

    fn apply(&self, env: &dyn EnvSource, mut settings: Settings) -> Settings {
        if env.var("SMTP_ENABLED").as_deref() != Some("true") {
            return settings;
        }

        let var = |name: &str| env.var(name).unwrap_or_default();

        settings.smtp.enabled = true;
        settings.smtp.host = var("SMTP_HOST");

        let port = resolve_smtp_port(env.var("SMTP_PORT").as_deref());
        settings.smtp.port = port;

        settings.smtp.username = var("SMTP_USER");
        settings.smtp.password = var("SMTP_PASSWORD");

        settings.meta.sender_name = var("SMTP_SENDER_NAME");
        settings.meta.sender_address = var("SMTP_SENDER_ADDRESS");

        if port == IMPLICIT_TLS_PORT {
            settings.smtp.tls = true;
        }

        info!(host = %settings.smtp.host, port, tls = settings.smtp.tls, "SMTP configured via environment variables");

        settings
    }
}

// endregion: --- Tests
