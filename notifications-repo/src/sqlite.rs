//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

use notifications_types::{
    EntityDirectory, EntityType, NormalizedNotification, NotificationEntity, NotificationStore,
    RawNotification, RawNotificationLog, RepoError, StoredNotification,
};

use crate::types::{DbEntity, DbNotification, insert_error};

const MIGRATIONS: [(&str, &str); 2] = [
    ("0001", include_str!("../migrations/0001_create_entities.sql")),
    ("0002", include_str!("../migrations/0002_create_notifications.sql")),
];

const NOTIFICATION_COLUMNS: &str = "id, entity_id, entity_type, bank_name, source_id, \
     notification_type, attribute, action, version, created, data, send_count, stored_at";

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        // Every connection to an in-memory database sees its own empty schema.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.create_schema().await?;

        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        for (name, ddl) in MIGRATIONS {
            sqlx::raw_sql(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::Database(format!("Migration {} failed: {}", name, e)))?;
        }
        Ok(())
    }

    async fn find_entity(
        &self,
        table: &str,
        bank_id: &str,
        entity_type: EntityType,
    ) -> Result<Option<NotificationEntity>, RepoError> {
        let row: Option<DbEntity> = sqlx::query_as(&format!(
            "SELECT id, bank_id, kyc_status FROM {} WHERE bank_id = ?",
            table
        ))
        .bind(bank_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(|r| r.into_domain(entity_type)).transpose()
    }
}

#[async_trait]
impl EntityDirectory for SqliteRepo {
    async fn find_consumer(&self, bank_id: &str) -> Result<Option<NotificationEntity>, RepoError> {
        self.find_entity("consumers", bank_id, EntityType::Consumer)
            .await
    }

    async fn find_business(&self, bank_id: &str) -> Result<Option<NotificationEntity>, RepoError> {
        self.find_entity("businesses", bank_id, EntityType::Business)
            .await
    }

    async fn find_member(&self, bank_id: &str) -> Result<Option<NotificationEntity>, RepoError> {
        self.find_entity("business_members", bank_id, EntityType::Member)
            .await
    }
}

#[async_trait]
impl NotificationStore for SqliteRepo {
    async fn create_notification(
        &self,
        notification: NormalizedNotification,
    ) -> Result<StoredNotification, RepoError> {
        let stored = StoredNotification::new(notification);
        let n = &stored.notification;
        let data =
            serde_json::to_string(&n.data).map_err(|e| RepoError::Database(e.to_string()))?;

        sqlx::query(&format!(
            "INSERT INTO notifications ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            NOTIFICATION_COLUMNS
        ))
        .bind(stored.id.to_string())
        .bind(&n.entity_id)
        .bind(n.entity_type.to_string())
        .bind(&n.bank_name)
        .bind(&n.source_id)
        .bind(n.notification_type.to_string())
        .bind(&n.attribute)
        .bind(n.action.to_string())
        .bind(&n.version)
        .bind(n.created)
        .bind(data)
        .bind(stored.send_count)
        .bind(stored.stored_at)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, &n.source_id))?;

        Ok(stored)
    }

    async fn get_by_source_id(
        &self,
        source_id: &str,
        bank_name: &str,
    ) -> Result<Option<StoredNotification>, RepoError> {
        let row: Option<DbNotification> = sqlx::query_as(&format!(
            "SELECT {} FROM notifications WHERE source_id = ? AND bank_name = ?",
            NOTIFICATION_COLUMNS
        ))
        .bind(source_id)
        .bind(bank_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbNotification::into_domain).transpose()
    }

    async fn increment_send(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE notifications SET send_count = send_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RawNotificationLog for SqliteRepo {
    async fn log_raw(&self, raw: RawNotification) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO raw_notifications (id, bank_name, body, received_at) VALUES (?, ?, ?, ?)",
        )
        .bind(raw.id.to_string())
        .bind(&raw.bank_name)
        .bind(&raw.body)
        .bind(raw.received_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}
