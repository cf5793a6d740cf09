//! Data models for the notifications domain.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable audit record of one email successfully sent to a client.
///
/// Rows are appended only after the delivery gateway reports success, are
/// never updated or deleted, and deliberately survive deletion of their case
/// (audit retention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub case_id: Uuid,
    pub email_to: String,
    pub subject: String,
    /// Plain-text body as sent; the HTML variant is re-derived on resend.
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(case_id: Uuid, email_to: String, subject: String, body: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            case_id,
            email_to,
            subject,
            body,
            sent_at: Utc::now(),
        }
    }
}

/// Singleton configuration record: lawyer identity, sender credential, and
/// the global notification switch.
///
/// The credential is only reachable through [`Settings::sender_credentials`],
/// so a future secret store can replace the repository without touching call
/// sites.
#[derive(Debug, Clone)]
pub struct Settings {
    pub lawyer_name: String,
    pub lawyer_email: String,
    email_password: SecretString,
    pub email_notifications_enabled: bool,
}

impl Settings {
    pub fn new(
        lawyer_name: String,
        lawyer_email: String,
        email_password: SecretString,
        email_notifications_enabled: bool,
    ) -> Self {
        Self {
            lawyer_name,
            lawyer_email,
            email_password,
            email_notifications_enabled,
        }
    }

    /// The sender credential, or `None` when either half is blank.
    pub fn sender_credentials(&self) -> Option<SenderCredentials> {
        if self.lawyer_email.trim().is_empty() || self.email_password.expose_secret().is_empty() {
            return None;
        }
        Some(SenderCredentials {
            email: self.lawyer_email.clone(),
            password: self.email_password.clone(),
        })
    }
}

/// Sender identity handed to the delivery gateway for one send.
///
/// Captured at send-start; a concurrent settings update does not affect an
/// in-flight send.
#[derive(Debug, Clone)]
pub struct SenderCredentials {
    pub email: String,
    pub password: SecretString,
}

/// Defaults used to lazily create the Settings row when none exists.
#[derive(Debug, Clone)]
pub struct SettingsSeed {
    pub lawyer_name: String,
    pub lawyer_email: String,
    pub email_password: SecretString,
    pub email_notifications_enabled: bool,
}

impl Default for SettingsSeed {
    fn default() -> Self {
        Self {
            lawyer_name: "Your Name".to_string(),
            lawyer_email: String::new(),
            email_password: SecretString::from(String::new()),
            email_notifications_enabled: false,
        }
    }
}

impl SettingsSeed {
    /// Seed derived from process configuration (the `EMAIL_USER`/`EMAIL_PASS`
    /// sender identity). The lawyer name stays at its placeholder and the
    /// global switch stays off until the settings form is saved.
    pub fn from_app_config(config: &core_config::app::AppConfig) -> Self {
        Self {
            lawyer_email: config.default_sender.email.clone(),
            email_password: config.default_sender.password.clone(),
            ..Self::default()
        }
    }

    pub fn into_settings(self) -> Settings {
        Settings {
            lawyer_name: self.lawyer_name,
            lawyer_email: self.lawyer_email,
            email_password: self.email_password,
            email_notifications_enabled: self.email_notifications_enabled,
        }
    }
}

/// Full-replacement update from the settings form (every field is posted).
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub lawyer_name: String,
    pub lawyer_email: String,
    pub email_password: SecretString,
    pub email_notifications_enabled: bool,
}

impl UpdateSettings {
    pub fn into_settings(self) -> Settings {
        Settings {
            lawyer_name: self.lawyer_name,
            lawyer_email: self.lawyer_email,
            email_password: self.email_password,
            email_notifications_enabled: self.email_notifications_enabled,
        }
    }
}
