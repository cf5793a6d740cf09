//! Mail delivery gateway.
//!
//! The `Mailer` trait is the seam between composition and the actual
//! transport; `SmtpMailer` is the production implementation. Sender
//! credentials are passed per call because they live in the editable
//! Settings row, not in process configuration.

mod smtp;

pub use smtp::{SmtpConfig, SmtpMailer};

use crate::error::DeliveryError;
use crate::models::SenderCredentials;
use async_trait::async_trait;

/// Email content ready for sending.
#[derive(Debug, Clone, Default)]
pub struct EmailContent {
    /// Recipient email address.
    pub to_email: String,
    /// Recipient name (for the mailbox display name).
    pub to_name: String,
    /// Email subject.
    pub subject: String,
    /// Plain text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

/// Trait for mail transports.
///
/// One synchronous best-effort attempt per call: no retries, no queueing.
/// Persisting the outcome is the caller's responsibility.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one multipart (plain + HTML) message from the given sender.
    async fn send(
        &self,
        sender: &SenderCredentials,
        email: &EmailContent,
    ) -> Result<(), DeliveryError>;
}
