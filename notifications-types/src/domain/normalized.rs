//! Normalized notifications: the provider-independent schema forwarded downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::entity::{EntityType, NotificationEntity};
use crate::error::DomainError;

/// Coarse notification category. Also the `type` of a normalized notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Consumer,
    Business,
    Account,
    Card,
    MoveMoney,
    Transaction,
}

impl AsRef<str> for NotificationType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Consumer => "consumer",
            Self::Business => "business",
            Self::Account => "account",
            Self::Card => "card",
            Self::MoveMoney => "move_money",
            Self::Transaction => "transaction",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consumer" => Ok(Self::Consumer),
            "business" => Ok(Self::Business),
            "account" => Ok(Self::Account),
            "card" => Ok(Self::Card),
            "move_money" => Ok(Self::MoveMoney),
            "transaction" => Ok(Self::Transaction),
            other => Err(format!("unknown notification type `{}`", other)),
        }
    }
}

/// What happened to the resource a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
    Add,
    Remove,
    Open,
    Activate,
    Block,
    Unblock,
    Reissue,
    Cancel,
    Authorize,
    Decline,
    Reverse,
    Hold,
    Release,
    Post,
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Open => "open",
            Self::Activate => "activate",
            Self::Block => "block",
            Self::Unblock => "unblock",
            Self::Reissue => "reissue",
            Self::Cancel => "cancel",
            Self::Authorize => "authorize",
            Self::Decline => "decline",
            Self::Reverse => "reverse",
            Self::Hold => "hold",
            Self::Release => "release",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "add" => Self::Add,
            "remove" => Self::Remove,
            "open" => Self::Open,
            "activate" => Self::Activate,
            "block" => Self::Block,
            "unblock" => Self::Unblock,
            "reissue" => Self::Reissue,
            "cancel" => Self::Cancel,
            "authorize" => Self::Authorize,
            "decline" => Self::Decline,
            "reverse" => Self::Reverse,
            "hold" => Self::Hold,
            "release" => Self::Release,
            "post" => Self::Post,
            other => return Err(format!("unknown action `{}`", other)),
        };
        Ok(action)
    }
}

/// A provider notification mapped onto the internal schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedNotification {
    pub entity_id: String,
    pub entity_type: EntityType,
    pub bank_name: String,
    /// Provider notification ID; `(source_id, bank_name)` is unique.
    pub source_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    pub action: Action,
    pub version: String,
    pub created: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl NormalizedNotification {
    pub fn new(
        entity: &NotificationEntity,
        bank_name: impl Into<String>,
        source_id: impl Into<String>,
        notification_type: NotificationType,
        action: Action,
    ) -> Self {
        Self {
            entity_id: entity.entity_id.clone(),
            entity_type: entity.entity_type,
            bank_name: bank_name.into(),
            source_id: source_id.into(),
            notification_type,
            attribute: None,
            action,
            version: String::new(),
            created: Utc::now(),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Serializes the typed event body into the opaque `data` field.
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Result<Self, DomainError> {
        self.data = serde_json::to_value(data)
            .map_err(|e| DomainError::MalformedPayload(e.to_string()))?;
        Ok(self)
    }
}

/// A normalized notification as persisted by the notification store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNotification {
    pub id: Uuid,
    #[serde(flatten)]
    pub notification: NormalizedNotification,
    pub send_count: i64,
    pub stored_at: DateTime<Utc>,
}

impl StoredNotification {
    pub fn new(notification: NormalizedNotification) -> Self {
        Self {
            id: Uuid::new_v4(),
            notification,
            send_count: 0,
            stored_at: Utc::now(),
        }
    }
}

/// An inbound body exactly as received, kept for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNotification {
    pub id: Uuid,
    pub bank_name: String,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

impl RawNotification {
    pub fn new(bank_name: impl Into<String>, body: &[u8]) -> Self {
        Self {
            id: Uuid::new_v4(),
            bank_name: bank_name.into(),
            body: String::from_utf8_lossy(body).into_owned(),
            received_at: Utc::now(),
        }
    }
}
