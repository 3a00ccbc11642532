//! Repository port traits.
//!
//! The Postgres and SQLite adapters implement all three.

use uuid::Uuid;

use crate::domain::{NormalizedNotification, NotificationEntity, RawNotification, StoredNotification};
use crate::error::RepoError;

/// Looks up internal entities by their bank-assigned ID.
#[async_trait::async_trait]
pub trait EntityDirectory: Send + Sync + 'static {
    async fn find_consumer(&self, bank_id: &str) -> Result<Option<NotificationEntity>, RepoError>;

    async fn find_business(&self, bank_id: &str) -> Result<Option<NotificationEntity>, RepoError>;

    async fn find_member(&self, bank_id: &str) -> Result<Option<NotificationEntity>, RepoError>;
}

/// Persistence for normalized notifications.
///
/// `(source_id, bank_name)` is unique.
#[async_trait::async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Inserts a new notification.
    ///
    /// Returns `RepoError::Duplicate` when the uniqueness constraint rejects it.
    async fn create_notification(
        &self,
        notification: NormalizedNotification,
    ) -> Result<StoredNotification, RepoError>;

    async fn get_by_source_id(
        &self,
        source_id: &str,
        bank_name: &str,
    ) -> Result<Option<StoredNotification>, RepoError>;

    /// Bumps the delivery counter after a successful publish.
    async fn increment_send(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Audit trail of inbound bodies, written before any processing.
#[async_trait::async_trait]
pub trait RawNotificationLog: Send + Sync + 'static {
    async fn log_raw(&self, raw: RawNotification) -> Result<(), RepoError>;
}
