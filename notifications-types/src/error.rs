//! Error types for the notification pipeline.

use std::fmt;

use crate::ports::QueueError;

/// Stable error codes attached to every pipeline failure.
///
/// These end up in logs and in the dead-letter reason, so the string forms
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidNotificationFormat,
    InvalidNotificationAction,
    InvalidNotificationType,
    InvalidEntityId,
    InvalidStatus,
    InvalidCountry,
    InvalidDocumentType,
    InvalidCurrency,
    InvalidCode,
    InvalidDate,
    InvalidAmount,
    MalformedPayload,
    Persistence,
    Publish,
    Serialization,
}

impl AsRef<str> for ErrorCode {
    fn as_ref(&self) -> &str {
        match self {
            Self::InvalidNotificationFormat => "invalid_notification_format",
            Self::InvalidNotificationAction => "invalid_notification_action",
            Self::InvalidNotificationType => "invalid_notification_type",
            Self::InvalidEntityId => "invalid_entity_id",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidCountry => "invalid_country",
            Self::InvalidDocumentType => "invalid_document_type",
            Self::InvalidCurrency => "invalid_currency",
            Self::InvalidCode => "invalid_code",
            Self::InvalidDate => "invalid_date",
            Self::InvalidAmount => "invalid_amount",
            Self::MalformedPayload => "malformed_payload",
            Self::Persistence => "persistence",
            Self::Publish => "publish",
            Self::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Domain-level errors: the inbound notification cannot be routed or mapped.
///
/// None of these are retryable; redelivering the same body yields the same error.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid notification format: {0}")]
    InvalidNotificationFormat(String),

    #[error("Invalid notification action: {0}")]
    InvalidNotificationAction(String),

    #[error("Invalid notification type: {0}")]
    InvalidNotificationType(String),

    #[error("Invalid entity ID: {0}")]
    InvalidEntityId(String),

    #[error("Invalid {field} status: {value}")]
    InvalidStatus { field: &'static str, value: String },

    #[error("Invalid country code: {0}")]
    InvalidCountry(String),

    #[error("Invalid document type: {0}")]
    InvalidDocumentType(String),

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("Invalid {field} code: {value}")]
    InvalidCode { field: &'static str, value: String },

    #[error("Invalid {field} date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl DomainError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidNotificationFormat(_) => ErrorCode::InvalidNotificationFormat,
            Self::InvalidNotificationAction(_) => ErrorCode::InvalidNotificationAction,
            Self::InvalidNotificationType(_) => ErrorCode::InvalidNotificationType,
            Self::InvalidEntityId(_) => ErrorCode::InvalidEntityId,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::InvalidCountry(_) => ErrorCode::InvalidCountry,
            Self::InvalidDocumentType(_) => ErrorCode::InvalidDocumentType,
            Self::InvalidCurrency(_) => ErrorCode::InvalidCurrency,
            Self::InvalidCode { .. } => ErrorCode::InvalidCode,
            Self::InvalidDate { .. } => ErrorCode::InvalidDate,
            Self::InvalidAmount(_) => ErrorCode::InvalidAmount,
            Self::MalformedPayload(_) => ErrorCode::MalformedPayload,
        }
    }

    /// Shorthand for a required field that is absent from the payload.
    pub fn missing(field: &str) -> Self {
        Self::MalformedPayload(format!("missing required field `{}`", field))
    }
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    /// The uniqueness constraint on `(source_id, bank_name)` rejected an insert.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors returned to the queue consumer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(e) => e.code(),
            AppError::Repo(RepoError::Domain(e)) => e.code(),
            AppError::Repo(_) => ErrorCode::Persistence,
            AppError::Queue(_) => ErrorCode::Publish,
            AppError::Serialization(_) => ErrorCode::Serialization,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
