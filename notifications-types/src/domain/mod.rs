//! Domain models for the notification pipeline.

pub mod bank_id;
pub mod dates;
pub mod entity;
pub mod events;
pub mod money;
pub mod normalized;

pub use bank_id::{BankIdKind, EntityRef, parse_customer_id};
pub use dates::{parse_date, parse_optional_date};
pub use entity::{EntityType, KycStatus, NotificationEntity};
pub use money::{Currency, Money};
pub use normalized::{
    Action, NormalizedNotification, NotificationType, RawNotification, StoredNotification,
};
