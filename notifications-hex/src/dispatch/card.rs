//! Card status and limit notifications, routed on `data.status_change`.

use notifications_types::bbva::codes;
use notifications_types::bbva::{CardData, CardStatusChange};
use notifications_types::domain::bank_id;
use notifications_types::domain::events::{
    CardBlockReason, CardIssuedNotification, CardLimitNotification, CardReissuedNotification,
    CardStatus, CardStatusNotification,
};
use notifications_types::{
    Action, DomainError, NormalizedNotification, Notification, NotificationEntity,
    NotificationType,
};

use super::{base, money, optional, required};

const CATEGORY: NotificationType = NotificationType::Card;

pub(super) fn dispatch(
    notification: &Notification,
    entity: &NotificationEntity,
) -> Result<NormalizedNotification, DomainError> {
    let data: CardData = notification.decode_data()?;
    let status_change = data
        .status_change
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            DomainError::InvalidNotificationFormat(format!(
                "card notification {} has no status_change",
                notification.notification_id
            ))
        })?;
    let change = CardStatusChange::parse(status_change)?;
    let card_id = bank_id::card_id(required(&data.card_id, "card_id")?)?;
    let normalized = |action| base(notification, entity, CATEGORY, action);

    match change {
        CardStatusChange::New => {
            let event = CardIssuedNotification {
                card_id,
                account_id: bank_id::account_id(required(&data.account_id, "account_id")?)?,
                last_four: required(&data.last_four, "last_four")?.to_string(),
                expiration: optional(&data.expiration),
            };
            normalized(Action::Create).with_data(&event)
        }
        CardStatusChange::Activated => {
            status(normalized(Action::Activate), card_id, CardStatus::Active, None)
        }
        CardStatusChange::Blocked => {
            let reason = codes::card_block_reason(required(
                &data.status_change_reason,
                "status_change_reason",
            )?)?;
            status(normalized(Action::Block), card_id, CardStatus::Blocked, Some(reason))
        }
        CardStatusChange::Unblocked => {
            status(normalized(Action::Unblock), card_id, CardStatus::Active, None)
        }
        CardStatusChange::Canceled => {
            status(normalized(Action::Cancel), card_id, CardStatus::Canceled, None)
        }
        CardStatusChange::Reissued => {
            let event = CardReissuedNotification {
                card_id,
                new_card_id: bank_id::card_id(required(&data.new_card_id, "new_card_id")?)?,
                reason: codes::card_reissue_reason(required(
                    &data.status_change_reason,
                    "status_change_reason",
                )?)?,
            };
            normalized(Action::Reissue)
                .with_attribute("reissue")
                .with_data(&event)
        }
        CardStatusChange::LimitChanged => {
            let limits = data
                .limits
                .as_ref()
                .ok_or_else(|| DomainError::missing("limits"))?;
            if limits.daily_purchase.is_none() && limits.daily_withdrawal.is_none() {
                return Err(DomainError::missing("limits.daily_purchase"));
            }

            let event = CardLimitNotification {
                card_id,
                daily_purchase: limits
                    .daily_purchase
                    .map(|amount| money(Some(amount), &limits.currency, "daily_purchase"))
                    .transpose()?,
                daily_withdrawal: limits
                    .daily_withdrawal
                    .map(|amount| money(Some(amount), &limits.currency, "daily_withdrawal"))
                    .transpose()?,
            };
            normalized(Action::Update)
                .with_attribute("limits")
                .with_data(&event)
        }
    }
}

fn status(
    normalized: NormalizedNotification,
    card_id: String,
    status: CardStatus,
    reason: Option<CardBlockReason>,
) -> Result<NormalizedNotification, DomainError> {
    normalized.with_attribute("status").with_data(&CardStatusNotification {
        card_id,
        status,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::{entity, notification};
    use super::*;
    use notifications_types::EntityType;

    fn card(data: serde_json::Value) -> Result<NormalizedNotification, DomainError> {
        let n = notification("card_status", None, data);
        dispatch(&n, &entity(EntityType::Consumer))
    }

    #[test]
    fn test_card_new() {
        let out = card(json!({
            "card_id": "DC-1",
            "account_id": "AC-1",
            "status_change": "card_new",
            "last_4": "4242"
        }))
        .unwrap();

        assert_eq!(out.action, Action::Create);
        assert_eq!(out.notification_type, NotificationType::Card);
        assert_eq!(out.data["last_four"], "4242");
    }

    #[test]
    fn test_card_blocked_requires_known_reason() {
        let out = card(json!({
            "card_id": "RC-1",
            "status_change": "card_blocked",
            "status_change_reason": "STOLEN"
        }))
        .unwrap();
        assert_eq!(out.action, Action::Block);
        assert_eq!(out.data["status"], "blocked");
        assert_eq!(out.data["reason"], "stolen");

        let result = card(json!({
            "card_id": "RC-1",
            "status_change": "card_blocked",
            "status_change_reason": "BORED"
        }));
        assert!(matches!(
            result,
            Err(DomainError::InvalidCode { field: "card_block_reason", .. })
        ));
    }

    #[test]
    fn test_card_unblocked_is_active() {
        let out = card(json!({"card_id": "DC-1", "status_change": "card_unblocked"})).unwrap();
        assert_eq!(out.action, Action::Unblock);
        assert_eq!(out.data["status"], "active");
    }

    #[test]
    fn test_card_reissued() {
        let out = card(json!({
            "card_id": "DC-1",
            "status_change": "card_reissued",
            "replacement_card_id": "DC-2",
            "status_change_reason": "EXPIRED"
        }))
        .unwrap();

        assert_eq!(out.action, Action::Reissue);
        assert_eq!(out.data["new_card_id"], "DC-2");
        assert_eq!(out.data["reason"], "expired");
    }

    #[test]
    fn test_card_limit_changed() {
        let out = card(json!({
            "card_id": "DC-1",
            "status_change": "card_limit_changed",
            "limits": {"daily_purchase": 500, "daily_atm": "200.50", "currency": "USD"}
        }))
        .unwrap();

        assert_eq!(out.attribute.as_deref(), Some("limits"));
        assert_eq!(out.data["daily_purchase"]["amount"], 50000);
        assert_eq!(out.data["daily_withdrawal"]["amount"], 20050);
    }

    #[test]
    fn test_rejects_account_id_as_card() {
        let result = card(json!({"card_id": "AC-1", "status_change": "card_activated"}));
        assert!(matches!(result, Err(DomainError::InvalidEntityId(_))));
    }

    #[test]
    fn test_unknown_status_change() {
        let result = card(json!({"card_id": "DC-1", "status_change": "card_melted"}));
        assert!(matches!(
            result,
            Err(DomainError::InvalidNotificationAction(_))
        ));
    }

    #[test]
    fn test_card_activated() {
        let out = card(json!({"card_id": "DC-1", "status_change": "card_activated"})).unwrap();

        assert_eq!(out.action, Action::Activate);
        assert_eq!(out.attribute.as_deref(), Some("status"));
        assert_eq!(out.data["card_id"], "DC-1");
        assert_eq!(out.data["status"], "active");
    }

    #[test]
    fn test_card_canceled() {
        let out = card(json!({"card_id": "DC-1", "status_change": "card_canceled"})).unwrap();

        assert_eq!(out.action, Action::Cancel);
        assert_eq!(out.data["card_id"], "DC-1");
        assert_eq!(out.data["status"], "canceled");
    }

    #[test]
    fn test_card_reissued_unknown_reason() {
        let result = card(json!({
            "card_id": "DC-1",
            "status_change": "card_reissued",
            "replacement_card_id": "DC-2",
            "status_change_reason": "BORED"
        }));
        assert!(matches!(
            result,
            Err(DomainError::InvalidCode { field: "card_reissue_reason", .. })
        ));
    }

    #[test]
    fn test_card_limit_unknown_currency() {
        let result = card(json!({
            "card_id": "DC-1",
            "status_change": "card_limit_changed",
            "limits": {"daily_purchase": 500, "currency": "JPY"}
        }));
        assert!(matches!(result, Err(DomainError::InvalidCurrency(_))));
    }
}
