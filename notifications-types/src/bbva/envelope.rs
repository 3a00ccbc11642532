//! Inbound webhook envelope and event classification.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::NotificationType;
use crate::error::DomainError;

/// Provider name stamped on every normalized notification.
pub const BANK_NAME: &str = "bbva";

/// Namespace BBVA puts in front of every event type.
pub const EVENT_TYPE_PREFIX: &str = "com.bbva.openplatform.";

/// Every event type BBVA is known to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    ConsumerProfile,
    ConsumerKyc,
    BusinessProfile,
    BusinessKyc,
    AccountStatus,
    CardStatus,
    CardLimit,
    MoveMoneyStatus,
    TransactionAuthorization,
    TransactionHold,
    TransactionPosted,
}

impl EventType {
    pub const ALL: [EventType; 11] = [
        EventType::ConsumerProfile,
        EventType::ConsumerKyc,
        EventType::BusinessProfile,
        EventType::BusinessKyc,
        EventType::AccountStatus,
        EventType::CardStatus,
        EventType::CardLimit,
        EventType::MoveMoneyStatus,
        EventType::TransactionAuthorization,
        EventType::TransactionHold,
        EventType::TransactionPosted,
    ];

    /// The event type as it appears after the prefix.
    pub fn literal(&self) -> &'static str {
        match self {
            Self::ConsumerProfile => "consumer_profile",
            Self::ConsumerKyc => "consumer_kyc",
            Self::BusinessProfile => "business_profile",
            Self::BusinessKyc => "business_kyc",
            Self::AccountStatus => "account_status",
            Self::CardStatus => "card_status",
            Self::CardLimit => "card_limit",
            Self::MoveMoneyStatus => "move_money_status",
            Self::TransactionAuthorization => "transaction_authorization",
            Self::TransactionHold => "transaction_hold",
            Self::TransactionPosted => "transaction_posted",
        }
    }

    pub fn category(&self) -> NotificationType {
        match self {
            Self::ConsumerProfile | Self::ConsumerKyc => NotificationType::Consumer,
            Self::BusinessProfile | Self::BusinessKyc => NotificationType::Business,
            Self::AccountStatus => NotificationType::Account,
            Self::CardStatus | Self::CardLimit => NotificationType::Card,
            Self::MoveMoneyStatus => NotificationType::MoveMoney,
            Self::TransactionAuthorization | Self::TransactionHold | Self::TransactionPosted => {
                NotificationType::Transaction
            }
        }
    }

    /// Strips [`EVENT_TYPE_PREFIX`] and looks the remainder up.
    pub fn classify(raw: &str) -> Result<Self, DomainError> {
        let literal = raw.trim().strip_prefix(EVENT_TYPE_PREFIX).ok_or_else(|| {
            DomainError::InvalidNotificationFormat(format!("unprefixed event type `{}`", raw))
        })?;

        Self::ALL
            .iter()
            .copied()
            .find(|event| event.literal() == literal)
            .ok_or_else(|| {
                DomainError::InvalidNotificationFormat(format!("unknown event type `{}`", raw))
            })
    }
}

/// BBVA sends the timestamp as either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Timestamp {
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, DomainError> {
        let millis = match self {
            Timestamp::Millis(ms) => *ms,
            Timestamp::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                DomainError::InvalidNotificationFormat(format!("non-numeric timestamp `{}`", s))
            })?,
        };

        DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            DomainError::InvalidNotificationFormat(format!("timestamp out of range: {}", millis))
        })
    }
}

/// Fields derived by [`Notification::classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub event_type: EventType,
    pub category: NotificationType,
    pub event_literal: String,
    pub version: String,
    pub created: DateTime<Utc>,
}

/// The raw webhook envelope.
///
/// Read-only after [`Notification::classify`] has backfilled the derived fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    #[serde(alias = "eventId")]
    pub notification_id: String,

    #[serde(alias = "event_type", alias = "eventType")]
    pub notification_type: String,

    #[serde(default, alias = "version")]
    pub notification_version: Option<String>,

    #[serde(default, alias = "reason")]
    pub notification_reason: Option<String>,

    #[serde(default, alias = "created")]
    pub timestamp: Option<Timestamp>,

    #[serde(default, alias = "customerId")]
    pub customer_id: Value,

    #[serde(default)]
    pub notification_data: Option<Value>,

    #[serde(default)]
    pub payload: Option<Value>,

    #[serde(skip)]
    classification: Option<Classification>,
}

impl Notification {
    /// Decodes an inbound queue body.
    pub fn from_slice(body: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(body).map_err(|e| DomainError::MalformedPayload(e.to_string()))
    }

    /// Classifies the event type and backfills the derived fields.
    ///
    /// Idempotent; a second call returns the stored category.
    pub fn classify(&mut self) -> Result<NotificationType, DomainError> {
        if let Some(c) = &self.classification {
            return Ok(c.category);
        }

        let event_type = EventType::classify(&self.notification_type)?;
        let created = match &self.timestamp {
            Some(ts) => ts.to_datetime()?,
            None => Utc::now(),
        };

        let classification = Classification {
            event_type,
            category: event_type.category(),
            event_literal: event_type.literal().to_string(),
            version: self
                .notification_version
                .clone()
                .unwrap_or_default()
                .trim()
                .to_string(),
            created,
        };
        let category = classification.category;
        self.classification = Some(classification);

        Ok(category)
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    pub fn version(&self) -> &str {
        self.classification
            .as_ref()
            .map(|c| c.version.as_str())
            .unwrap_or_default()
    }

    /// Creation time from the envelope, or receive time when BBVA omitted it.
    pub fn created(&self) -> DateTime<Utc> {
        self.classification
            .as_ref()
            .map(|c| c.created)
            .unwrap_or_else(Utc::now)
    }

    /// The reason/sub-event field used by several dispatchers.
    pub fn reason(&self) -> Result<&str, DomainError> {
        self.notification_reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                DomainError::InvalidNotificationFormat(format!(
                    "notification {} has no reason",
                    self.notification_id
                ))
            })
    }

    /// `notification_data` when populated, otherwise `payload`.
    pub fn data(&self) -> Result<&Value, DomainError> {
        [&self.notification_data, &self.payload]
            .into_iter()
            .flatten()
            .find(|v| !v.is_null())
            .ok_or_else(|| {
                DomainError::MalformedPayload(format!(
                    "notification {} has neither notification_data nor payload",
                    self.notification_id
                ))
            })
    }

    /// Decodes the payload into a category-specific shape.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        T::deserialize(self.data()?).map_err(|e| DomainError::MalformedPayload(e.to_string()))
    }
}
