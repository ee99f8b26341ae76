//! # Mailer
//!
//! Builds an async SMTP transport from the boot-time [`Settings`].
//!
//! - `tls = true` (port 465): implicit TLS relay
//! - `tls = false`: opportunistic STARTTLS. The connection is upgraded when
//!   the server advertises STARTTLS and stays plain otherwise, so local relays
//!   without TLS still deliver.
//!
//! Credentials are attached only when a username is configured.

use crate::error::{AppError, Result};
use crate::settings::Settings;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// An SMTP transport plus the sender identity from settings.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Build a mailer, or fail if mail is disabled or misconfigured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let smtp = &settings.smtp;
        if !smtp.enabled {
            return Err(AppError::InvalidInput("SMTP is not enabled on this server".to_string()));
        }
        if smtp.host.is_empty() {
            return Err(AppError::Config("SMTP_HOST is empty".to_string()));
        }

        let from = sender_mailbox(settings)?;

        let builder = if smtp.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
                .map_err(|e| AppError::Config(format!("SMTP relay error: {e}")))?
        } else {
            let params = TlsParameters::new(smtp.host.clone())
                .map_err(|e| AppError::Config(format!("SMTP TLS parameters error: {e}")))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
                .tls(Tls::Opportunistic(params))
        }
        .port(smtp.port);

        let builder = if smtp.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(smtp.username.clone(), smtp.password.clone()))
        };

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Send a plain-text message.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let to: Address = to
            .parse()
            .map_err(|e| AppError::InvalidInput(format!("Invalid recipient '{to}': {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, to.clone()))
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        info!(to = %to, "Email sent");
        Ok(())
    }
}

fn sender_mailbox(settings: &Settings) -> Result<Mailbox> {
    let address: Address = settings.meta.sender_address.parse().map_err(|e| {
        AppError::Config(format!(
            "SMTP_SENDER_ADDRESS '{}' is not a valid address: {e}",
            settings.meta.sender_address
        ))
    })?;

    let name = Some(settings.meta.sender_name.clone()).filter(|n| !n.is_empty());
    Ok(Mailbox::new(name, address))
}
