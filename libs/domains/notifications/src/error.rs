//! Error types for the notifications domain.

use thiserror::Error;
use uuid::Uuid;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors from the mail delivery gateway.
///
/// Authentication failures are kept distinct so the settings-test path can
/// tell a bad credential apart from a flaky transport.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The SMTP server rejected the sender credential.
    #[error("SMTP authentication failed; check the sender email and app password")]
    Authentication,

    /// A mailbox could not be parsed into a valid address.
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    /// Any other connection, handshake or submission failure.
    #[error("Mail transport error: {0}")]
    Transport(String),
}

/// Errors that can occur in the notifications domain.
///
/// None of these ever abort the case/hearing mutation that triggered a
/// notification: dispatch entry points catch them and degrade to a warning.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Notification audit row not found.
    #[error("Notification not found: {0}")]
    NotFound(Uuid),

    /// Settings exist but carry no usable sender credential.
    #[error("Settings are missing sender email or password")]
    MissingCredentials,

    /// Delivery gateway failure.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Template rendering error.
    #[error("Template rendering error: {0}")]
    Template(String),

    /// Backing store error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<handlebars::RenderError> for NotificationError {
    fn from(err: handlebars::RenderError) -> Self {
        NotificationError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for NotificationError {
    fn from(err: handlebars::TemplateError) -> Self {
        NotificationError::Template(err.to_string())
    }
}
