//! Business profile, membership, indicator and KYC notifications.

use notifications_types::bbva::codes;
use notifications_types::bbva::{BusinessData, BusinessReason};
use notifications_types::domain::events::{
    BusinessActivity, BusinessIndicatorNotification, BusinessMemberNotification,
    BusinessProfileNotification,
};
use notifications_types::domain::parse_optional_date;
use notifications_types::{
    Action, BankIdKind, DomainError, EntityType, NormalizedNotification, Notification,
    NotificationEntity, NotificationType,
};

use super::{base, optional, profile, required};

const CATEGORY: NotificationType = NotificationType::Business;

pub(super) fn dispatch(
    notification: &Notification,
    entity: &NotificationEntity,
) -> Result<NormalizedNotification, DomainError> {
    if entity.entity_type != EntityType::Business {
        return Err(DomainError::InvalidNotificationType(format!(
            "business notification for {} entity {}",
            entity.entity_type, entity.bank_id
        )));
    }

    let reason = BusinessReason::parse(notification.reason()?)?;
    let data: BusinessData = notification.decode_data()?;

    match reason {
        BusinessReason::Created => business_profile(notification, entity, &data, Action::Create),
        BusinessReason::Updated => business_profile(notification, entity, &data, Action::Update),
        BusinessReason::OwnerAdded => member(notification, entity, &data, Action::Add),
        BusinessReason::OwnerRemoved => member(notification, entity, &data, Action::Remove),
        BusinessReason::IndicatorChanged => indicator(notification, entity, &data),
        BusinessReason::ContactChanged => {
            profile::contact(notification, entity, CATEGORY, data.contact.as_ref())
        }
        BusinessReason::AddressChanged => {
            profile::address(notification, entity, CATEGORY, data.address.as_ref())
        }
        BusinessReason::KycChanged => {
            profile::kyc(notification, entity, CATEGORY, data.kyc.as_ref())
        }
    }
}

fn business_profile(
    notification: &Notification,
    entity: &NotificationEntity,
    data: &BusinessData,
    action: Action,
) -> Result<NormalizedNotification, DomainError> {
    let event = BusinessProfileNotification {
        business_id: entity.bank_id.clone(),
        legal_name: required(&data.legal_name, "legal_name")?.to_string(),
        dba: optional(&data.dba),
        entity_type: codes::business_entity_type(required(&data.entity_type, "entity_type")?)?,
        formed: parse_optional_date("formation_date", data.formation_date.as_deref())?,
        legal_documents: profile::legal_documents(&data.legal_documents),
    };

    base(notification, entity, CATEGORY, action)
        .with_attribute("profile")
        .with_data(&event)
}

fn member(
    notification: &Notification,
    entity: &NotificationEntity,
    data: &BusinessData,
    action: Action,
) -> Result<NormalizedNotification, DomainError> {
    let member = data
        .member
        .as_ref()
        .ok_or_else(|| DomainError::missing("member"))?;

    let member_id = member.member_id.trim();
    if BankIdKind::of(member_id) != BankIdKind::Member {
        return Err(DomainError::InvalidEntityId(format!(
            "expected member ID, got `{}`",
            member_id
        )));
    }

    let ownership_percentage = member
        .ownership_percentage
        .map(|pct| match u8::try_from(pct) {
            Ok(pct) if pct <= 100 => Ok(pct),
            _ => Err(DomainError::InvalidCode {
                field: "ownership_percentage",
                value: pct.to_string(),
            }),
        })
        .transpose()?;

    let event = BusinessMemberNotification {
        business_id: entity.bank_id.clone(),
        member_id: member_id.to_string(),
        role: codes::member_role(required(&member.role, "member.role")?)?,
        ownership_percentage,
    };

    base(notification, entity, CATEGORY, action)
        .with_attribute("member")
        .with_data(&event)
}

fn indicator(
    notification: &Notification,
    entity: &NotificationEntity,
    data: &BusinessData,
) -> Result<NormalizedNotification, DomainError> {
    let event = BusinessIndicatorNotification {
        business_id: entity.bank_id.clone(),
        industry: codes::industry(required(&data.industry, "industry")?)?,
        activities: activities(&data.activities),
    };

    base(notification, entity, CATEGORY, Action::Update)
        .with_attribute("indicator")
        .with_data(&event)
}

fn activities(codes_in: &[String]) -> Vec<BusinessActivity> {
    codes_in
        .iter()
        .filter_map(|code| match codes::business_activity(code) {
            Ok(activity) => Some(activity),
            Err(e) => {
                tracing::debug!(code = %code, error_code = %e.code(), "Skipping business activity");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::{entity, notification};
    use super::*;

    #[test]
    fn test_created_profile_skips_unknown_legal_documents() {
        let n = notification(
            "business_profile",
            Some("created"),
            json!({
                "legal_name": "Acme LLC",
                "business_type": "LLC",
                "formation_date": "2015-03-01T00:00:00Z",
                "legal_documents": [
                    {"type": "EIN_LETTER", "id": "ein-1"},
                    {"type": "TREASURE_MAP", "id": "x"}
                ]
            }),
        );

        let out = dispatch(&n, &entity(EntityType::Business)).unwrap();
        assert_eq!(out.action, Action::Create);
        assert_eq!(out.data["business_id"], "NC-xyz");
        assert_eq!(out.data["entity_type"], "llc");
        assert_eq!(out.data["formed"], "2015-03-01T00:00:00Z");
        assert_eq!(out.data["legal_documents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_entity_type_is_hard_error() {
        let n = notification(
            "business_profile",
            Some("updated"),
            json!({"legal_name": "Acme", "entity_type": "GUILD"}),
        );
        assert!(matches!(
            dispatch(&n, &entity(EntityType::Business)),
            Err(DomainError::InvalidCode { field: "business_entity_type", .. })
        ));
    }

    #[test]
    fn test_consumer_entity_rejected() {
        let n = notification("business_profile", Some("created"), json!({}));
        assert!(matches!(
            dispatch(&n, &entity(EntityType::Consumer)),
            Err(DomainError::InvalidNotificationType(_))
        ));
    }

    #[test]
    fn test_owner_added() {
        let n = notification(
            "business_profile",
            Some("owner_added"),
            json!({"owner": {"owner_id": "OW-777", "role": "OWNER", "ownership_percentage": 40}}),
        );

        let out = dispatch(&n, &entity(EntityType::Business)).unwrap();
        assert_eq!(out.action, Action::Add);
        assert_eq!(out.attribute.as_deref(), Some("member"));
        assert_eq!(out.data["member_id"], "OW-777");
        assert_eq!(out.data["role"], "owner");
        assert_eq!(out.data["ownership_percentage"], 40);
    }

    #[test]
    fn test_owner_removed_requires_member_prefix() {
        let n = notification(
            "business_profile",
            Some("owner_removed"),
            json!({"member": {"member_id": "CO-1", "role": "OWNER"}}),
        );
        assert!(matches!(
            dispatch(&n, &entity(EntityType::Business)),
            Err(DomainError::InvalidEntityId(_))
        ));
    }

    #[test]
    fn test_indicator_skips_unknown_activities() {
        let n = notification(
            "business_profile",
            Some("indicator_changed"),
            json!({"industry": "RETAIL", "activities": ["CASH_INTENSIVE", "JUGGLING"]}),
        );

        let out = dispatch(&n, &entity(EntityType::Business)).unwrap();
        assert_eq!(out.data["industry"], "retail");
        assert_eq!(out.data["activities"], json!(["cash_intensive"]));
    }

    #[test]
    fn test_kyc_keeps_legal_documents() {
        let n = notification(
            "business_kyc",
            Some("kyc_changed"),
            json!({"kyc": {"status": "REVIEW", "legal_documents": [{"type": "BYLAWS", "reference": "b"}]}}),
        );

        let out = dispatch(&n, &entity(EntityType::Business)).unwrap();
        assert_eq!(out.data["status"], "review");
        assert_eq!(out.data["legal_documents"][0]["document_type"], "bylaws");
    }

    #[test]
    fn test_contact_changed() {
        let n = notification(
            "business_profile",
            Some("contact_changed"),
            json!({"contact": {"email": "ops@acme.test", "phone_number": "+15550100"}}),
        );

        let out = dispatch(&n, &entity(EntityType::Business)).unwrap();
        assert_eq!(out.action, Action::Update);
        assert_eq!(out.notification_type, NotificationType::Business);
        assert_eq!(out.attribute.as_deref(), Some("contact"));
        assert_eq!(out.data["bank_id"], "NC-xyz");
        assert_eq!(out.data["email"], "ops@acme.test");
        assert_eq!(out.data["phone"], "+15550100");
    }

    #[test]
    fn test_address_changed() {
        let n = notification(
            "business_profile",
            Some("address_changed"),
            json!({"address": {
                "line1": "9 Calle Mayor",
                "city": "Madrid",
                "state": "MD",
                "postal_code": "28013",
                "country": "ESP"
            }}),
        );

        let out = dispatch(&n, &entity(EntityType::Business)).unwrap();
        assert_eq!(out.attribute.as_deref(), Some("address"));
        assert_eq!(out.data["address"]["line1"], "9 Calle Mayor");
        assert_eq!(out.data["address"]["postal_code"], "28013");
        assert_eq!(out.data["address"]["country"], "ES");
    }

    #[test]
    fn test_owner_added_unknown_role() {
        let n = notification(
            "business_profile",
            Some("owner_added"),
            json!({"member": {"member_id": "OW-1", "role": "MASCOT"}}),
        );
        assert!(matches!(
            dispatch(&n, &entity(EntityType::Business)),
            Err(DomainError::InvalidCode { field: "member_role", .. })
        ));
    }

    #[test]
    fn test_ownership_over_hundred_rejected() {
        for pct in [101, 256, 1000] {
            let n = notification(
                "business_profile",
                Some("owner_added"),
                json!({"member": {"member_id": "OW-1", "role": "OWNER", "ownership_percentage": pct}}),
            );
            assert!(matches!(
                dispatch(&n, &entity(EntityType::Business)),
                Err(DomainError::InvalidCode { field: "ownership_percentage", .. })
            ));
        }
    }

    #[test]
    fn test_indicator_unknown_industry() {
        let n = notification(
            "business_profile",
            Some("indicator_changed"),
            json!({"industry": "PIRACY", "activities": []}),
        );
        assert!(matches!(
            dispatch(&n, &entity(EntityType::Business)),
            Err(DomainError::InvalidCode { field: "industry", .. })
        ));
    }
}
