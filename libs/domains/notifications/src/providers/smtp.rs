//! SMTP delivery via lettre.
//!
//! The endpoint (host/port) is process configuration read once; the sender
//! credential comes from Settings and is supplied per send, so an in-flight
//! send uses whatever credential was read at send-start.

use super::{EmailContent, Mailer};
use crate::error::DeliveryError;
use crate::models::SenderCredentials;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;
use tracing::{debug, error, info};

/// SMTP endpoint configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server host.
    pub host: String,
    /// Submission port (STARTTLS).
    pub port: u16,
}

impl SmtpConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Read the endpoint from `SMTP_HOST`/`SMTP_PORT`, defaulting to the
    /// Gmail submission endpoint the office accounts use.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
        }
    }
}

/// SMTP mailer: STARTTLS submission, authenticated per send, single attempt.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Build a credentialed transport for one send.
    fn build_transport(
        &self,
        sender: &SenderCredentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| DeliveryError::Transport(format!("Failed to create SMTP relay: {}", e)))?
            .port(self.config.port)
            .credentials(Credentials::new(
                sender.email.clone(),
                sender.password.expose_secret().to_string(),
            ))
            .build();

        Ok(transport)
    }

    /// Build a lettre multipart message from EmailContent.
    fn build_message(
        &self,
        sender: &SenderCredentials,
        email: &EmailContent,
    ) -> Result<Message, DeliveryError> {
        let from: Mailbox = sender
            .email
            .parse()
            .map_err(|_| DeliveryError::InvalidAddress(sender.email.clone()))?;

        let to: Mailbox = if email.to_name.is_empty() {
            email.to_email.parse()
        } else {
            format!("{} <{}>", email.to_name, email.to_email).parse()
        }
        .map_err(|_| DeliveryError::InvalidAddress(email.to_email.clone()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| DeliveryError::Transport(format!("Failed to build email message: {}", e)))
    }
}

/// Map a lettre SMTP error onto the domain taxonomy: credential rejections
/// (530/534/535) are authentication failures, everything else is transport.
fn classify(err: lettre::transport::smtp::Error) -> DeliveryError {
    let code = err.status().map(|c| c.to_string());
    match code.as_deref() {
        Some("530") | Some("534") | Some("535") => DeliveryError::Authentication,
        _ => DeliveryError::Transport(err.to_string()),
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        sender: &SenderCredentials,
        email: &EmailContent,
    ) -> Result<(), DeliveryError> {
        debug!(
            to = %email.to_email,
            subject = %email.subject,
            host = %self.config.host,
            port = %self.config.port,
            "Sending email via SMTP"
        );

        let message = self.build_message(sender, email)?;
        let transport = self.build_transport(sender)?;

        transport.send(message).await.map_err(|e| {
            error!(to = %email.to_email, error = %e, "Failed to send email via SMTP");
            classify(e)
        })?;

        info!(to = %email.to_email, "Email sent via SMTP");
        Ok(())
    }
}
