//! Notification Application Service
//!
//! Orchestrates one inbound notification through the ports: raw audit log,
//! classification, entity resolution, dispatch and forwarding.
//! Contains NO infrastructure logic.

use notifications_types::{
    AppError, BANK_NAME, EntityDirectory, NormalizedNotification, Notification,
    NotificationPublisher, NotificationStore, OutboundMessage, RawNotification,
    RawNotificationLog, RepoError, StoredNotification,
};

use crate::dispatch;
use crate::resolver::resolve_entity;

/// Application service for the notification pipeline.
///
/// Generic over the repository `R` and the outbound publisher `P`; both are
/// injected at compile time.
pub struct NotificationService<R, P>
where
    R: EntityDirectory + NotificationStore + RawNotificationLog,
    P: NotificationPublisher,
{
    repo: R,
    publisher: P,
}

impl<R, P> NotificationService<R, P>
where
    R: EntityDirectory + NotificationStore + RawNotificationLog,
    P: NotificationPublisher,
{
    pub fn new(repo: R, publisher: P) -> Self {
        Self { repo, publisher }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Processes one inbound queue body end to end.
    ///
    /// The body is written to the raw log before anything else; a failure to
    /// log is reported but does not stop processing.
    #[tracing::instrument(skip_all, fields(source_id, event_type))]
    pub async fn handle_message(&self, body: &[u8]) -> Result<StoredNotification, AppError> {
        if let Err(e) = self.repo.log_raw(RawNotification::new(BANK_NAME, body)).await {
            tracing::warn!(error = %e, "Failed to write raw notification");
        }

        let notification = Notification::from_slice(body)?;
        tracing::Span::current().record("source_id", notification.notification_id.as_str());

        self.process(notification).await
    }

    /// Classifies, resolves, dispatches and forwards a decoded notification.
    pub async fn process(
        &self,
        mut notification: Notification,
    ) -> Result<StoredNotification, AppError> {
        notification.classify()?;
        if let Some(c) = notification.classification() {
            tracing::Span::current().record("event_type", c.event_literal.as_str());
        }

        let entity = resolve_entity(&self.repo, &notification.customer_id).await?;
        let normalized = dispatch::route(&notification, &entity)?;

        tracing::debug!(
            entity_id = %normalized.entity_id,
            notification_type = %normalized.notification_type,
            action = %normalized.action,
            "Notification normalized"
        );

        self.forward(normalized).await
    }

    /// Persists (or recovers) a normalized notification, publishes it and
    /// bumps its send counter.
    ///
    /// A duplicate `(source_id, bank_name)` reuses the stored record, so a
    /// redelivered notification is published again without a second row.
    pub async fn forward(
        &self,
        normalized: NormalizedNotification,
    ) -> Result<StoredNotification, AppError> {
        let source_id = normalized.source_id.clone();
        let bank_name = normalized.bank_name.clone();

        let mut stored = match self.repo.create_notification(normalized).await {
            Ok(stored) => stored,
            Err(RepoError::Duplicate(_)) => {
                tracing::info!(%source_id, "Duplicate notification, reusing stored record");
                self.repo
                    .get_by_source_id(&source_id, &bank_name)
                    .await?
                    .ok_or(RepoError::NotFound)?
            }
            Err(e) => return Err(e.into()),
        };

        let message = OutboundMessage {
            group_id: stored.notification.entity_id.clone(),
            body: serde_json::to_string(&stored)?,
        };
        self.publisher.send_messages(vec![message]).await?;

        self.repo.increment_send(stored.id).await?;
        stored.send_count += 1;

        tracing::info!(
            %source_id,
            notification_id = %stored.id,
            send_count = stored.send_count,
            "Notification forwarded"
        );

        Ok(stored)
    }
}
