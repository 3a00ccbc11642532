//! # Notifications Types
//!
//! Domain types, BBVA webhook shapes and port traits for the partner-bank
//! notification pipeline. No IO lives here.
//!
//! ## Architecture
//!
//! - `domain/` - Internal types (entities, normalized notifications, event bodies)
//! - `bbva/` - Provider envelope, payload shapes, code tables, classifier
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Domain, repository and application error types

pub mod bbva;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use bbva::{BANK_NAME, EventType, Notification};
pub use domain::{
    Action, BankIdKind, EntityRef, EntityType, KycStatus, NormalizedNotification,
    NotificationEntity, NotificationType, RawNotification, StoredNotification,
};
pub use error::{AppError, DomainError, ErrorCode, RepoError};
pub use ports::{
    EntityDirectory, NotificationPublisher, NotificationStore, OutboundMessage, QueueError,
    RawNotificationLog,
};
