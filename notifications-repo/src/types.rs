//! Database row structs shared by the SQLite and PostgreSQL adapters.
//!
//! IDs and the notification body are stored as text in both backends;
//! timestamps decode through sqlx's chrono support.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use notifications_types::{
    EntityType, KycStatus, NormalizedNotification, NotificationEntity, RepoError,
    StoredNotification,
};

/// Consumer, business or business member row.
#[derive(FromRow)]
pub struct DbEntity {
    pub id: String,
    pub bank_id: String,
    pub kyc_status: Option<String>,
}

impl DbEntity {
    pub fn into_domain(self, entity_type: EntityType) -> Result<NotificationEntity, RepoError> {
        let kyc_status = self
            .kyc_status
            .as_deref()
            .map(str::parse::<KycStatus>)
            .transpose()
            .map_err(RepoError::Database)?;

        Ok(NotificationEntity {
            entity_id: self.id,
            entity_type,
            bank_id: self.bank_id,
            kyc_status,
        })
    }
}

/// Normalized notification row.
#[derive(FromRow)]
pub struct DbNotification {
    pub id: String,
    pub entity_id: String,
    pub entity_type: String,
    pub bank_name: String,
    pub source_id: String,
    pub notification_type: String,
    pub attribute: Option<String>,
    pub action: String,
    pub version: String,
    pub created: DateTime<Utc>,
    pub data: String,
    pub send_count: i64,
    pub stored_at: DateTime<Utc>,
}

impl DbNotification {
    pub fn into_domain(self) -> Result<StoredNotification, RepoError> {
        let id = uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?;
        let data: serde_json::Value =
            serde_json::from_str(&self.data).map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(StoredNotification {
            id,
            notification: NormalizedNotification {
                entity_id: self.entity_id,
                entity_type: self.entity_type.parse().map_err(RepoError::Database)?,
                bank_name: self.bank_name,
                source_id: self.source_id,
                notification_type: self.notification_type.parse().map_err(RepoError::Database)?,
                attribute: self.attribute,
                action: self.action.parse().map_err(RepoError::Database)?,
                version: self.version,
                created: self.created,
                data,
            },
            send_count: self.send_count,
            stored_at: self.stored_at,
        })
    }
}

/// Maps an insert failure, surfacing unique-constraint violations as `Duplicate`.
pub fn insert_error(err: sqlx::Error, key: &str) -> RepoError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Duplicate(key.into()),
        other => RepoError::Database(other.to_string()),
    }
}
