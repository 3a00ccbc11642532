//! Authorization, hold and posting notifications.

use notifications_types::bbva::codes;
use notifications_types::bbva::{BbvaMerchant, TransactionData, TransactionReason};
use notifications_types::domain::bank_id;
use notifications_types::domain::events::{
    AuthorizationStatus, Channel, HoldStatus, Merchant, TransactionAuthorizationNotification,
    TransactionHoldNotification, TransactionPostedNotification,
};
use notifications_types::domain::parse_date;
use notifications_types::{
    Action, DomainError, NormalizedNotification, Notification, NotificationEntity,
    NotificationType,
};

use super::{base, money, optional, required};

pub(super) fn dispatch(
    notification: &Notification,
    entity: &NotificationEntity,
) -> Result<NormalizedNotification, DomainError> {
    let reason = TransactionReason::parse(notification.reason()?)?;
    let data: TransactionData = notification.decode_data()?;
    let account_id = bank_id::account_id(required(&data.account_id, "account_id")?)?;
    let amount = money(data.amount, &data.currency, "amount")?;
    let normalized = |action| base(notification, entity, NotificationType::Transaction, action);

    match reason {
        TransactionReason::Authorization(status) => {
            let authorization_id = match required(&data.authorization_id, "authorization_id") {
                Ok(id) => id,
                Err(_) => required(&data.transaction_id, "authorization_id")?,
            };
            let event = TransactionAuthorizationNotification {
                authorization_id: authorization_id.to_string(),
                account_id,
                card_id: bank_id::card_id(required(&data.card_id, "card_id")?)?,
                amount,
                status,
                merchant: data.merchant.as_ref().map(merchant).transpose()?,
            };
            let action = match status {
                AuthorizationStatus::Approved => Action::Authorize,
                AuthorizationStatus::Declined => Action::Decline,
                AuthorizationStatus::Reversed => Action::Reverse,
            };
            normalized(action)
                .with_attribute("authorization")
                .with_data(&event)
        }
        TransactionReason::Hold(status) => {
            let event = TransactionHoldNotification {
                hold_id: required(&data.hold_id, "hold_id")?.to_string(),
                account_id,
                amount,
                status,
            };
            let action = match status {
                HoldStatus::Set => Action::Hold,
                HoldStatus::Released => Action::Release,
            };
            normalized(action).with_attribute("hold").with_data(&event)
        }
        TransactionReason::Posted { channel, direction } => {
            let card_id = match channel {
                Channel::Card => Some(bank_id::card_id(required(&data.card_id, "card_id")?)?),
                Channel::NonCard => None,
            };
            let event = TransactionPostedNotification {
                transaction_id: required(&data.transaction_id, "transaction_id")?.to_string(),
                account_id,
                card_id,
                amount,
                direction,
                channel,
                posted: parse_date("posted_date", required(&data.posted_date, "posted_date")?)?,
                description: optional(&data.description),
            };
            normalized(Action::Post).with_attribute("posted").with_data(&event)
        }
    }
}

fn merchant(merchant: &BbvaMerchant) -> Result<Merchant, DomainError> {
    Ok(Merchant {
        name: merchant.name.trim().to_string(),
        category_code: optional(&merchant.category_code),
        city: optional(&merchant.city),
        country: merchant
            .country_code
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(codes::country)
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::{entity, notification};
    use super::*;
    use notifications_types::EntityType;

    fn transaction(
        reason: &str,
        data: serde_json::Value,
    ) -> Result<NormalizedNotification, DomainError> {
        let literal = match reason.split('_').next() {
            Some("authorization") => "transaction_authorization",
            Some("hold") => "transaction_hold",
            _ => "transaction_posted",
        };
        let n = notification(literal, Some(reason), data);
        dispatch(&n, &entity(EntityType::Consumer))
    }

    #[test]
    fn test_authorization_declined() {
        let out = transaction(
            "authorization_declined",
            json!({
                "authorization_id": "AU-1",
                "account_id": "AC-1",
                "card_id": "DC-1",
                "amount": 12.5,
                "currency": "USD",
                "merchant": {"name": "Corner Shop", "mcc": "5411", "country_code": "MEX"}
            }),
        )
        .unwrap();

        assert_eq!(out.action, Action::Decline);
        assert_eq!(out.data["status"], "declined");
        assert_eq!(out.data["amount"]["amount"], 1250);
        assert_eq!(out.data["merchant"]["country"], "MX");
    }

    #[test]
    fn test_hold_released() {
        let out = transaction(
            "hold_released",
            json!({"hold_id": "H-1", "account_id": "AC-1", "amount": "3.00", "currency": "EUR"}),
        )
        .unwrap();

        assert_eq!(out.action, Action::Release);
        assert_eq!(out.data["status"], "released");
    }

    #[test]
    fn test_posted_non_card_credit() {
        let out = transaction(
            "posted_non_card_credit",
            json!({
                "transaction_id": "T-1",
                "account_id": "AC-1",
                "amount": 100,
                "currency": "USD",
                "posting_date": "2021-01-02T00:00:00Z"
            }),
        )
        .unwrap();

        assert_eq!(out.action, Action::Post);
        assert_eq!(out.data["channel"], "non_card");
        assert_eq!(out.data["direction"], "credit");
        assert_eq!(out.data["posted"], "2021-01-02T00:00:00Z");
        assert!(out.data["card_id"].is_null());
    }

    #[test]
    fn test_posted_card_requires_card_id() {
        let result = transaction(
            "posted_card_debit",
            json!({
                "transaction_id": "T-1",
                "account_id": "AC-1",
                "amount": 1,
                "currency": "USD",
                "posted_date": "2021-01-02"
            }),
        );
        assert!(matches!(result, Err(DomainError::MalformedPayload(_))));
    }

    #[test]
    fn test_negative_amount() {
        let result = transaction(
            "hold_set",
            json!({"hold_id": "H-1", "account_id": "AC-1", "amount": -5, "currency": "USD"}),
        );
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_unknown_currency() {
        let result = transaction(
            "hold_set",
            json!({"hold_id": "H-1", "account_id": "AC-1", "amount": 5, "currency": "BTC"}),
        );
        assert!(matches!(result, Err(DomainError::InvalidCurrency(_))));
    }

    #[test]
    fn test_unknown_reason() {
        let result = transaction("posted_by_pigeon", json!({}));
        assert!(matches!(
            result,
            Err(DomainError::InvalidNotificationAction(_))
        ));
    }

    #[test]
    fn test_authorization_approved_falls_back_to_transaction_id() {
        let out = transaction(
            "authorization_approved",
            json!({
                "transaction_id": "T-9",
                "account_id": "AC-1",
                "card_id": "DC-1",
                "amount": "20.00",
                "currency": "USD"
            }),
        )
        .unwrap();

        assert_eq!(out.action, Action::Authorize);
        assert_eq!(out.attribute.as_deref(), Some("authorization"));
        assert_eq!(out.data["authorization_id"], "T-9");
        assert_eq!(out.data["account_id"], "AC-1");
        assert_eq!(out.data["card_id"], "DC-1");
        assert_eq!(out.data["amount"]["amount"], 2000);
        assert_eq!(out.data["status"], "approved");
    }

    #[test]
    fn test_authorization_reversed() {
        let out = transaction(
            "authorization_reversed",
            json!({
                "authorization_id": "AU-1",
                "account_id": "AC-1",
                "card_id": "DC-1",
                "amount": 7,
                "currency": "MXN"
            }),
        )
        .unwrap();

        assert_eq!(out.action, Action::Reverse);
        assert_eq!(out.data["status"], "reversed");
        assert_eq!(out.data["amount"]["currency"], "MXN");
    }

    #[test]
    fn test_hold_set() {
        let out = transaction(
            "hold_set",
            json!({"hold_id": "H-1", "account_id": "AC-1", "amount": "3.50", "currency": "USD"}),
        )
        .unwrap();

        assert_eq!(out.action, Action::Hold);
        assert_eq!(out.attribute.as_deref(), Some("hold"));
        assert_eq!(out.data["hold_id"], "H-1");
        assert_eq!(out.data["status"], "set");
        assert_eq!(out.data["amount"]["amount"], 350);
    }

    #[test]
    fn test_posted_card_debit() {
        let out = transaction(
            "posted_card_debit",
            json!({
                "transaction_id": "T-1",
                "account_id": "AC-1",
                "card_id": "DC-1",
                "amount": 10,
                "currency": "USD",
                "posted_date": "2021-01-02"
            }),
        )
        .unwrap();

        assert_eq!(out.action, Action::Post);
        assert_eq!(out.data["channel"], "card");
        assert_eq!(out.data["direction"], "debit");
        assert_eq!(out.data["card_id"], "DC-1");
        assert_eq!(out.data["posted"], "2021-01-02T00:00:00Z");
    }

    #[test]
    fn test_posted_card_credit() {
        let out = transaction(
            "posted_card_credit",
            json!({
                "transaction_id": "T-2",
                "account_id": "AC-1",
                "card_id": "DC-1",
                "amount": 10,
                "currency": "USD",
                "posted_date": "2021-01-02"
            }),
        )
        .unwrap();

        assert_eq!(out.data["channel"], "card");
        assert_eq!(out.data["direction"], "credit");
        assert_eq!(out.data["transaction_id"], "T-2");
    }

    #[test]
    fn test_posted_non_card_debit() {
        let out = transaction(
            "posted_non_card_debit",
            json!({
                "transaction_id": "T-3",
                "account_id": "AC-1",
                "amount": 10,
                "currency": "EUR",
                "posted_date": "2021-01-02"
            }),
        )
        .unwrap();

        assert_eq!(out.data["channel"], "non_card");
        assert_eq!(out.data["direction"], "debit");
        assert!(out.data["card_id"].is_null());
    }

    #[test]
    fn test_amount_overflow_is_invalid_amount() {
        let result = transaction(
            "hold_set",
            json!({
                "hold_id": "H-1",
                "account_id": "AC-1",
                "amount": "79228162514264337593543950335",
                "currency": "USD"
            }),
        );
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }
}
