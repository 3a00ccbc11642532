//! Category dispatchers and transform functions.
//!
//! [`route`] picks the category dispatcher; each dispatcher parses its closed
//! reason enum and calls exactly one transform. Transforms are pure: the
//! entity has already been resolved and nothing here touches IO.

mod account;
mod business;
mod card;
mod consumer;
mod move_money;
mod profile;
mod transaction;

use rust_decimal::Decimal;

use notifications_types::bbva::codes;
use notifications_types::domain::Money;
use notifications_types::{
    Action, BANK_NAME, DomainError, NormalizedNotification, Notification, NotificationEntity,
    NotificationType,
};

/// Routes a classified notification to its category dispatcher.
pub fn route(
    notification: &Notification,
    entity: &NotificationEntity,
) -> Result<NormalizedNotification, DomainError> {
    let category = notification
        .classification()
        .map(|c| c.category)
        .ok_or_else(|| {
            DomainError::InvalidNotificationFormat(format!(
                "notification {} routed before classification",
                notification.notification_id
            ))
        })?;

    match category {
        NotificationType::Consumer => consumer::dispatch(notification, entity),
        NotificationType::Business => business::dispatch(notification, entity),
        NotificationType::Account => account::dispatch(notification, entity),
        NotificationType::Card => card::dispatch(notification, entity),
        NotificationType::MoveMoney => move_money::dispatch(notification, entity),
        NotificationType::Transaction => transaction::dispatch(notification, entity),
    }
}

/// Envelope-derived fields every transform starts from.
fn base(
    notification: &Notification,
    entity: &NotificationEntity,
    notification_type: NotificationType,
    action: Action,
) -> NormalizedNotification {
    NormalizedNotification::new(
        entity,
        BANK_NAME,
        notification.notification_id.clone(),
        notification_type,
        action,
    )
    .with_version(notification.version())
    .with_created(notification.created())
}

/// A present, non-blank string field.
fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, DomainError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::missing(field))
}

/// Drops blank optional strings so they do not reach downstream as `""`.
fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn money(
    amount: Option<Decimal>,
    currency: &Option<String>,
    field: &str,
) -> Result<Money, DomainError> {
    let amount = amount.ok_or_else(|| DomainError::missing(field))?;
    let currency = codes::currency(required(currency, "currency")?)?;
    Money::from_major(amount, currency)
}
