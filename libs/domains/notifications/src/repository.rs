use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::NotificationResult;
use crate::models::{Notification, Settings, SettingsSeed, UpdateSettings};

/// Append-only store for notification audit rows.
///
/// Rows are written only after a successful send, so the log is a record of
/// successes, not a complete delivery history. Rows are never updated or
/// deleted; deleting a case leaves its rows behind as orphans.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append one audit row.
    async fn record(&self, notification: Notification) -> NotificationResult<Notification>;

    /// Get one row by ID.
    async fn get(&self, id: Uuid) -> NotificationResult<Option<Notification>>;

    /// All rows for a case, most recent first.
    async fn list_for_case(&self, case_id: Uuid) -> NotificationResult<Vec<Notification>>;
}

/// Store for the Settings singleton (exactly one row expected).
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// The settings row, if one has been created.
    async fn get(&self) -> NotificationResult<Option<Settings>>;

    /// The settings row, lazily created from the seed when absent.
    async fn get_or_init(&self, seed: &SettingsSeed) -> NotificationResult<Settings>;

    /// Full-replacement update; creates the row if it does not exist yet.
    async fn update(&self, update: UpdateSettings) -> NotificationResult<Settings>;
}

/// In-memory implementation of `NotificationRepository`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn record(&self, notification: Notification) -> NotificationResult<Notification> {
        let mut notifications = self.notifications.write().await;
        notifications.push(notification.clone());

        tracing::info!(
            notification_id = %notification.id,
            case_id = %notification.case_id,
            to = %notification.email_to,
            "Recorded notification"
        );
        Ok(notification)
    }

    async fn get(&self, id: Uuid) -> NotificationResult<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn list_for_case(&self, case_id: Uuid) -> NotificationResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;

        // Reverse insertion order first so the stable sort leaves the later
        // of two same-timestamp rows in front.
        let mut result: Vec<Notification> = notifications
            .iter()
            .rev()
            .filter(|n| n.case_id == case_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));

        Ok(result)
    }
}

/// In-memory implementation of `SettingsRepository`.
#[derive(Debug, Default, Clone)]
pub struct InMemorySettingsRepository {
    settings: Arc<RwLock<Option<Settings>>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get(&self) -> NotificationResult<Option<Settings>> {
        let settings = self.settings.read().await;
        Ok(settings.clone())
    }

    async fn get_or_init(&self, seed: &SettingsSeed) -> NotificationResult<Settings> {
        let mut settings = self.settings.write().await;

        if let Some(existing) = settings.as_ref() {
            return Ok(existing.clone());
        }

        let created = seed.clone().into_settings();
        *settings = Some(created.clone());

        tracing::info!("Created settings row from seed defaults");
        Ok(created)
    }

    async fn update(&self, update: UpdateSettings) -> NotificationResult<Settings> {
        let mut settings = self.settings.write().await;

        let updated = update.into_settings();
        *settings = Some(updated.clone());

        tracing::info!("Updated settings");
        Ok(updated)
    }
}
