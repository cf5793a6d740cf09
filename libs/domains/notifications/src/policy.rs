//! Notification policy: the pure decision of whether a case mutation should
//! trigger a client email.
//!
//! A negative answer is a silent no-op: notification is best-effort and must
//! never block or fail the mutation that asked about it.

use crate::models::Settings;
use domain_cases::Case;

/// Why a notification was skipped. Informational only, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No settings row exists yet.
    SettingsMissing,
    /// The global notification switch is off.
    GloballyDisabled,
    /// The case has not opted in to client notifications.
    CaseOptedOut,
    /// The case has no client email address on file.
    NoClientEmail,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::SettingsMissing => write!(f, "no settings record"),
            SkipReason::GloballyDisabled => write!(f, "email notifications disabled globally"),
            SkipReason::CaseOptedOut => write!(f, "notifications disabled for this case"),
            SkipReason::NoClientEmail => write!(f, "case has no client email"),
        }
    }
}

/// The reason this case would be skipped, or `None` if a notification should
/// be sent. Conditions are checked in gating order: settings row, global
/// switch, per-case opt-in, recipient address.
pub fn skip_reason(settings: Option<&Settings>, case: &Case) -> Option<SkipReason> {
    let Some(settings) = settings else {
        return Some(SkipReason::SettingsMissing);
    };
    if !settings.email_notifications_enabled {
        return Some(SkipReason::GloballyDisabled);
    }
    if !case.notify_client {
        return Some(SkipReason::CaseOptedOut);
    }
    if case.client_email.trim().is_empty() {
        return Some(SkipReason::NoClientEmail);
    }
    None
}

/// True iff a settings row exists, the global switch is on, the case opted in,
/// and a client email is on file.
pub fn should_notify(settings: Option<&Settings>, case: &Case) -> bool {
    skip_reason(settings, case).is_none()
}
