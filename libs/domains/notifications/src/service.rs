//! Notification service: policy, composition, delivery and the audit log,
//! behind one facade.

use std::sync::Arc;

use domain_cases::{Case, Hearing};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{NotificationError, NotificationResult};
use crate::models::{Notification, Settings, SettingsSeed, UpdateSettings};
use crate::policy::{skip_reason, SkipReason};
use crate::providers::{EmailContent, Mailer};
use crate::repository::{NotificationRepository, SettingsRepository};
use crate::templates::{HearingAddedEmail, RenderedEmail, StatusUpdateEmail, TemplateEngine};

/// Outcome of a best-effort dispatch attempt.
///
/// Dispatch never returns `Err`: the case mutation that triggered it has
/// already committed and must stand whatever happens here. Failures are
/// carried as a value so callers can surface them without propagating.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Delivery succeeded and an audit row was recorded.
    Sent(Notification),
    /// Policy said no; nothing was sent or recorded.
    Skipped(SkipReason),
    /// Delivery or recording failed; no usable audit row exists.
    Failed(NotificationError),
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent(_))
    }
}

/// Service facade for client notifications and the settings record.
pub struct NotificationService<N, S, M>
where
    N: NotificationRepository,
    S: SettingsRepository,
    M: Mailer,
{
    notifications: Arc<N>,
    settings: Arc<S>,
    mailer: Arc<M>,
    templates: TemplateEngine,
    seed: SettingsSeed,
}

impl<N, S, M> NotificationService<N, S, M>
where
    N: NotificationRepository,
    S: SettingsRepository,
    M: Mailer,
{
    pub fn new(
        notifications: Arc<N>,
        settings: Arc<S>,
        mailer: Arc<M>,
        seed: SettingsSeed,
    ) -> NotificationResult<Self> {
        Ok(Self {
            notifications,
            settings,
            mailer,
            templates: TemplateEngine::new()?,
            seed,
        })
    }

    /// Notify the client that their case was edited (status update email).
    /// Best-effort: the edit has already committed.
    #[instrument(skip(self, case), fields(case_id = %case.id, case_number = %case.case_number))]
    pub async fn notify_status_updated(&self, case: &Case) -> DispatchOutcome {
        let settings = match self.load_settings().await {
            Ok(settings) => settings,
            Err(e) => return self.failed(case, e),
        };
        if let Some(reason) = skip_reason(settings.as_ref(), case) {
            return self.skipped(case, reason);
        }
        // skip_reason returned None, so settings exist
        let settings = settings.unwrap_or_else(|| self.seed.clone().into_settings());

        let email = StatusUpdateEmail::from_case(case);
        let rendered = match self.templates.render_status_update(&email, &settings.lawyer_name) {
            Ok(rendered) => rendered,
            Err(e) => return self.failed(case, e),
        };

        self.deliver_and_record(case, &settings, rendered).await
    }

    /// Notify the client that a hearing was added to their case. Runs after
    /// any status write-back, so the message reflects the post-hearing status.
    #[instrument(skip(self, case, hearing), fields(case_id = %case.id, hearing_id = %hearing.id))]
    pub async fn notify_hearing_added(&self, case: &Case, hearing: &Hearing) -> DispatchOutcome {
        let settings = match self.load_settings().await {
            Ok(settings) => settings,
            Err(e) => return self.failed(case, e),
        };
        if let Some(reason) = skip_reason(settings.as_ref(), case) {
            return self.skipped(case, reason);
        }
        let settings = settings.unwrap_or_else(|| self.seed.clone().into_settings());

        let email = HearingAddedEmail::new(case, hearing);
        let rendered = match self.templates.render_hearing_added(&email, &settings.lawyer_name) {
            Ok(rendered) => rendered,
            Err(e) => return self.failed(case, e),
        };

        self.deliver_and_record(case, &settings, rendered).await
    }

    /// Re-send a logged notification verbatim to its original recipient and
    /// append a fresh audit row. Bypasses the notification policy: the
    /// original send already passed it, and resend is an explicit request.
    #[instrument(skip(self))]
    pub async fn resend(&self, notification_id: Uuid) -> NotificationResult<Notification> {
        let original = self
            .notifications
            .get(notification_id)
            .await?
            .ok_or(NotificationError::NotFound(notification_id))?;

        let settings = self.settings.get_or_init(&self.seed).await?;
        let sender = settings
            .sender_credentials()
            .ok_or(NotificationError::MissingCredentials)?;

        let rendered =
            self.templates
                .render_stored(&original.subject, &original.body, &settings.lawyer_name)?;

        let content = EmailContent {
            to_email: original.email_to.clone(),
            to_name: String::new(),
            subject: rendered.subject.clone(),
            text_body: rendered.text.clone(),
            html_body: rendered.html,
        };
        self.mailer.send(&sender, &content).await?;

        let record = Notification::new(
            original.case_id,
            original.email_to.clone(),
            rendered.subject,
            rendered.text,
        );
        let record = self.notifications.record(record).await?;

        info!(
            original_id = %original.id,
            notification_id = %record.id,
            to = %record.email_to,
            "Resent notification"
        );
        Ok(record)
    }

    /// Send the fixed test email to the lawyer's own address to verify the
    /// stored credential. Not recorded in the audit log (it is not a client
    /// notification), and authentication failures are surfaced distinctly.
    #[instrument(skip(self))]
    pub async fn send_test_email(&self) -> NotificationResult<()> {
        let settings = self.settings.get_or_init(&self.seed).await?;
        let sender = settings
            .sender_credentials()
            .ok_or(NotificationError::MissingCredentials)?;

        let rendered = self.templates.render_test_email(&settings.lawyer_name)?;
        let content = EmailContent {
            to_email: settings.lawyer_email.clone(),
            to_name: settings.lawyer_name.clone(),
            subject: rendered.subject,
            text_body: rendered.text,
            html_body: rendered.html,
        };

        self.mailer.send(&sender, &content).await?;
        info!(to = %settings.lawyer_email, "Test email sent");
        Ok(())
    }

    /// The settings record, lazily created from seed defaults on first read.
    pub async fn settings(&self) -> NotificationResult<Settings> {
        self.settings.get_or_init(&self.seed).await
    }

    /// Full-replacement settings update.
    pub async fn update_settings(&self, update: UpdateSettings) -> NotificationResult<Settings> {
        self.settings.update(update).await
    }

    /// Audit rows for a case, most recent first. Works for deleted cases too,
    /// since rows are never cascaded.
    pub async fn list_for_case(&self, case_id: Uuid) -> NotificationResult<Vec<Notification>> {
        self.notifications.list_for_case(case_id).await
    }

    pub async fn get(&self, notification_id: Uuid) -> NotificationResult<Notification> {
        self.notifications
            .get(notification_id)
            .await?
            .ok_or(NotificationError::NotFound(notification_id))
    }

    async fn load_settings(&self) -> NotificationResult<Option<Settings>> {
        self.settings.get().await
    }

    async fn deliver_and_record(
        &self,
        case: &Case,
        settings: &Settings,
        rendered: RenderedEmail,
    ) -> DispatchOutcome {
        let Some(sender) = settings.sender_credentials() else {
            return self.failed(case, NotificationError::MissingCredentials);
        };

        let content = EmailContent {
            to_email: case.client_email.clone(),
            to_name: case.client_name.clone(),
            subject: rendered.subject.clone(),
            text_body: rendered.text.clone(),
            html_body: rendered.html,
        };
        if let Err(e) = self.mailer.send(&sender, &content).await {
            return self.failed(case, e.into());
        }

        let record = Notification::new(
            case.id,
            case.client_email.clone(),
            rendered.subject,
            rendered.text,
        );
        match self.notifications.record(record).await {
            Ok(record) => {
                info!(
                    notification_id = %record.id,
                    to = %record.email_to,
                    subject = %record.subject,
                    "Notification sent"
                );
                DispatchOutcome::Sent(record)
            }
            Err(e) => self.failed(case, e),
        }
    }

    fn skipped(&self, case: &Case, reason: SkipReason) -> DispatchOutcome {
        info!(case_number = %case.case_number, reason = %reason, "Notification skipped");
        DispatchOutcome::Skipped(reason)
    }

    fn failed(&self, case: &Case, error: NotificationError) -> DispatchOutcome {
        warn!(case_number = %case.case_number, error = %error, "Notification failed");
        DispatchOutcome::Failed(error)
    }
}
