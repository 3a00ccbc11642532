//! Move-money (transfer) notifications.

use notifications_types::bbva::codes;
use notifications_types::bbva::{MoveMoneyData, MoveMoneyReason};
use notifications_types::domain::events::{
    Correction, MoveMoneyCorrectionNotification, MoveMoneyStatusNotification,
};
use notifications_types::{
    Action, DomainError, NormalizedNotification, Notification, NotificationEntity,
    NotificationType,
};

use super::{base, optional, required};

pub(super) fn dispatch(
    notification: &Notification,
    entity: &NotificationEntity,
) -> Result<NormalizedNotification, DomainError> {
    let reason = MoveMoneyReason::parse(notification.reason()?)?;
    let data: MoveMoneyData = notification.decode_data()?;
    let move_money_id = required(&data.move_money_id, "move_money_id")?.to_string();
    let normalized = base(
        notification,
        entity,
        NotificationType::MoveMoney,
        Action::Update,
    );

    match reason {
        MoveMoneyReason::StatusChange => {
            let event = MoveMoneyStatusNotification {
                move_money_id,
                status: codes::move_money_status(required(&data.status, "status")?)?,
                status_reason: optional(&data.status_reason),
            };
            normalized.with_attribute("status").with_data(&event)
        }
        MoveMoneyReason::CorrectedData => {
            if data.corrections.is_empty() {
                return Err(DomainError::missing("corrections"));
            }
            let event = MoveMoneyCorrectionNotification {
                move_money_id,
                corrections: data
                    .corrections
                    .iter()
                    .map(|c| Correction {
                        field: c.field.clone(),
                        previous: c.previous_value.clone(),
                        current: c.new_value.clone(),
                    })
                    .collect(),
            };
            normalized.with_attribute("corrected_data").with_data(&event)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::{entity, notification};
    use super::*;
    use notifications_types::EntityType;

    #[test]
    fn test_status_change() {
        let n = notification(
            "move_money_status",
            Some("status_change"),
            json!({"id": "MM-1", "status": "COMPLETED"}),
        );

        let out = dispatch(&n, &entity(EntityType::Consumer)).unwrap();
        assert_eq!(out.notification_type, NotificationType::MoveMoney);
        assert_eq!(out.attribute.as_deref(), Some("status"));
        assert_eq!(out.data["move_money_id"], "MM-1");
        assert_eq!(out.data["status"], "completed");
    }

    #[test]
    fn test_unknown_status() {
        let n = notification(
            "move_money_status",
            Some("status_change"),
            json!({"move_money_id": "MM-1", "status": "TELEPORTED"}),
        );
        assert!(matches!(
            dispatch(&n, &entity(EntityType::Consumer)),
            Err(DomainError::InvalidStatus { field: "move_money", .. })
        ));
    }

    #[test]
    fn test_corrected_data() {
        let n = notification(
            "move_money_status",
            Some("corrected_data"),
            json!({
                "move_money_id": "MM-1",
                "corrections": [{"field": "memo", "old_value": "rent", "value": "Rent May"}]
            }),
        );

        let out = dispatch(&n, &entity(EntityType::Consumer)).unwrap();
        assert_eq!(out.data["corrections"][0]["previous"], "rent");
        assert_eq!(out.data["corrections"][0]["current"], "Rent May");
    }

    #[test]
    fn test_unknown_reason() {
        let n = notification("move_money_status", Some("refund"), json!({"move_money_id": "MM-1"}));
        assert!(matches!(
            dispatch(&n, &entity(EntityType::Consumer)),
            Err(DomainError::InvalidNotificationAction(_))
        ));
    }
}
