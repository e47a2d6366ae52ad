//! SMTP mailer

use std::time::Duration;

use asesoria_common::MailConfig;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::templates::{render_email, EmailTemplate};

/// Upper bound for a single SMTP conversation. A relay slower than this is
/// treated as a failed (and logged) delivery.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// How the SMTP session is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Plain connection upgraded via STARTTLS (port 587)
    #[default]
    StartTls,
    /// TLS from the first byte (port 465)
    Implicit,
}

/// SMTP connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub tls: TlsMode,
}

impl From<&MailConfig> for SmtpConfig {
    fn from(config: &MailConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.password.clone(),
            from: config.from.clone(),
            tls: if config.port == 465 {
                TlsMode::Implicit
            } else {
                TlsMode::StartTls
            },
        }
    }
}

/// Mailer errors
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid email address: {0}")]
    Address(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("Send timed out after {0:?}")]
    Timeout(Duration),
}

/// Asynchronous SMTP mailer. Cloning is cheap; clones share the underlying
/// connection pool.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    frontend_url: String,
}

impl Mailer {
    /// Create a mailer from SMTP settings
    ///
    /// # Errors
    /// Returns an error for an unusable relay host or malformed from address
    pub fn new(config: &SmtpConfig, frontend_url: impl Into<String>) -> Result<Self, MailerError> {
        let builder = match config.tls {
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host),
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
        }
        .map_err(|e| MailerError::Transport(e.to_string()))?;

        let mut builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| MailerError::Address(format!("{}: {e}", config.from)))?;

        Ok(Self {
            transport: builder.build(),
            from,
            frontend_url: frontend_url.into(),
        })
    }

    /// Base URL of the public frontend, used when rendering links
    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    /// Send one message and wait for the relay's answer
    ///
    /// # Errors
    /// Returns an error on bad addresses or transport failures
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html: String,
    ) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| MailerError::Address(format!("{to}: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| MailerError::Message(e.to_string()))?;

        let result = tokio::time::timeout(SEND_TIMEOUT, self.transport.send(message))
            .await
            .map_err(|_| MailerError::Timeout(SEND_TIMEOUT))?;

        result.map_err(|e| MailerError::Transport(e.to_string()))?;
        Ok(())
    }

    /// Render a template and send it to one recipient
    pub async fn send_template(
        &self,
        to: &str,
        template: &EmailTemplate<'_>,
    ) -> Result<(), MailerError> {
        let (subject, html) = render_email(template, &self.frontend_url);
        self.send(to, &subject, html).await
    }

    /// Dispatch a template off the request path.
    ///
    /// Failures are logged, never surfaced: the HTTP response reporting
    /// record creation does not wait for (or depend on) the relay.
    pub fn spawn_send(&self, to: String, template: EmailTemplate<'_>) {
        let mailer = self.clone();
        let (subject, html) = render_email(&template, &self.frontend_url);

        tokio::spawn(async move {
            match mailer.send(&to, &subject, html).await {
                Ok(()) => info!(%to, %subject, "Email sent"),
                Err(e) => warn!(%to, %subject, error = %e, "Email delivery failed"),
            }
        });
    }
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "user".to_string(),
            password: "pass".to_string(),
            from: "Asesoria <no-reply@example.com>".to_string(),
            tls: TlsMode::StartTls,
        }
    }

    #[tokio::test]
    async fn test_mailer_construction() {
        let mailer = Mailer::new(&config(), "https://example.com").unwrap();
        assert_eq!(mailer.frontend_url(), "https://example.com");
    }

    #[test]
    fn test_bad_from_address_rejected() {
        let mut bad = config();
        bad.from = "definitely not an address".to_string();
        assert!(matches!(
            Mailer::new(&bad, "https://example.com"),
            Err(MailerError::Address(_))
        ));
    }

    #[test]
    fn test_tls_mode_from_mail_config_port() {
        let mail = MailConfig {
            host: "smtp.example.com".to_string(),
            port: 465,
            username: String::new(),
            password: String::new(),
            from: "no-reply@example.com".to_string(),
        };
        assert_eq!(SmtpConfig::from(&mail).tls, TlsMode::Implicit);
    }
}
