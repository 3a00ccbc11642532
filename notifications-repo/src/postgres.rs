//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use notifications_types::{
    EntityDirectory, EntityType, NormalizedNotification, NotificationEntity, NotificationStore,
    RawNotification, RawNotificationLog, RepoError, StoredNotification,
};

use crate::types::{DbEntity, DbNotification, insert_error};

const NOTIFICATION_COLUMNS: &str = "id, entity_id, entity_type, bank_name, source_id, \
     notification_type, attribute, action, version, created, data, send_count, stored_at";

/// PostgreSQL repository.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_entities_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_notifications_pg.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn find_entity(
        &self,
        table: &str,
        bank_id: &str,
        entity_type: EntityType,
    ) -> Result<Option<NotificationEntity>, RepoError> {
        let row: Option<DbEntity> = sqlx::query_as(&format!(
            "SELECT id, bank_id, kyc_status FROM {} WHERE bank_id = $1",
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
impl EntityDirectory for PostgresRepo {
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
impl NotificationStore for PostgresRepo {
    async fn create_notification(
        &self,
        notification: NormalizedNotification,
    ) -> Result<StoredNotification, RepoError> {
        let stored = StoredNotification::new(notification);
        let n = &stored.notification;
        let data =
            serde_json::to_string(&n.data).map_err(|e| RepoError::Database(e.to_string()))?;

        sqlx::query(&format!(
            "INSERT INTO notifications ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
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
            "SELECT {} FROM notifications WHERE source_id = $1 AND bank_name = $2",
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
        let result =
            sqlx::query("UPDATE notifications SET send_count = send_count + 1 WHERE id = $1")
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
impl RawNotificationLog for PostgresRepo {
    async fn log_raw(&self, raw: RawNotification) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO raw_notifications (id, bank_name, body, received_at) \
             VALUES ($1, $2, $3, $4)",
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
