//! Notifications Domain
//!
//! Best-effort client email notifications for case events, with a
//! successes-only audit log: policy decides whether to send, templates
//! compose the message, the SMTP gateway delivers it, and only then is a
//! row recorded. Also owns the Settings singleton (lawyer identity, sender
//! credential, global switch) and the spreadsheet export of a case's log.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Dispatch, resend, test email, settings
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐     ┌─────────────┐
//! │   Policy    │     │  Templates  │     │  Providers  │
//! │ (send/skip) │     │ (compose)   │     │ (SMTP send) │
//! └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                │
//! ┌─────────────┐                                │
//! │ Repository  │  ← Audit log + settings        │
//! └──────┬──────┘    (recorded only on ──────────┘
//!        │            delivery success)
//! ┌──────▼──────┐
//! │   Models    │  ← Notification, Settings
//! └─────────────┘
//! ```
//!
//! A failed or skipped notification never propagates as an error to the
//! case mutation that triggered it; see [`DispatchOutcome`].

pub mod error;
pub mod export;
pub mod models;
pub mod policy;
pub mod providers;
pub mod repository;
pub mod service;
pub mod templates;

// Re-export commonly used types
pub use error::{DeliveryError, NotificationError, NotificationResult};
pub use export::{ExportSheet, EXPORT_HEADER, EXPORT_SHEET_TITLE};
pub use models::{Notification, SenderCredentials, Settings, SettingsSeed, UpdateSettings};
pub use policy::{should_notify, skip_reason, SkipReason};
pub use providers::{EmailContent, Mailer, SmtpConfig, SmtpMailer};
pub use repository::{
    InMemoryNotificationRepository, InMemorySettingsRepository, NotificationRepository,
    SettingsRepository,
};
pub use service::{DispatchOutcome, NotificationService};
pub use templates::{RenderedEmail, TemplateEngine};
