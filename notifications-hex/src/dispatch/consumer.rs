//! Consumer profile and KYC notifications.

use notifications_types::bbva::codes;
use notifications_types::bbva::{ConsumerData, ConsumerReason};
use notifications_types::domain::events::{ConsumerProfileNotification, OccupationNotification};
use notifications_types::domain::parse_optional_date;
use notifications_types::{
    Action, DomainError, EntityType, NormalizedNotification, Notification, NotificationEntity,
    NotificationType,
};

use super::{base, optional, profile, required};

const CATEGORY: NotificationType = NotificationType::Consumer;

pub(super) fn dispatch(
    notification: &Notification,
    entity: &NotificationEntity,
) -> Result<NormalizedNotification, DomainError> {
    match entity.entity_type {
        EntityType::Consumer | EntityType::Member => {}
        EntityType::Business => {
            return Err(DomainError::InvalidNotificationType(format!(
                "consumer notification for {} entity {}",
                entity.entity_type, entity.bank_id
            )));
        }
    }

    let reason = ConsumerReason::parse(notification.reason()?)?;
    let data: ConsumerData = notification.decode_data()?;

    match reason {
        ConsumerReason::Created => consumer_profile(notification, entity, &data, Action::Create),
        ConsumerReason::Updated => consumer_profile(notification, entity, &data, Action::Update),
        ConsumerReason::ContactChanged => {
            profile::contact(notification, entity, CATEGORY, data.contact.as_ref())
        }
        ConsumerReason::AddressChanged => {
            profile::address(notification, entity, CATEGORY, data.address.as_ref())
        }
        ConsumerReason::OccupationChanged => occupation(notification, entity, &data),
        ConsumerReason::KycChanged => {
            profile::kyc(notification, entity, CATEGORY, data.kyc.as_ref())
        }
    }
}

fn consumer_profile(
    notification: &Notification,
    entity: &NotificationEntity,
    data: &ConsumerData,
    action: Action,
) -> Result<NormalizedNotification, DomainError> {
    let event = ConsumerProfileNotification {
        consumer_id: entity.bank_id.clone(),
        first_name: required(&data.first_name, "first_name")?.to_string(),
        middle_name: optional(&data.middle_name),
        last_name: required(&data.last_name, "last_name")?.to_string(),
        date_of_birth: parse_optional_date("date_of_birth", data.date_of_birth.as_deref())?,
    };

    base(notification, entity, CATEGORY, action)
        .with_attribute("profile")
        .with_data(&event)
}

fn occupation(
    notification: &Notification,
    entity: &NotificationEntity,
    data: &ConsumerData,
) -> Result<NormalizedNotification, DomainError> {
    let event = OccupationNotification {
        consumer_id: entity.bank_id.clone(),
        occupation: codes::occupation(required(&data.occupation, "occupation")?)?,
        employer: optional(&data.employer),
    };

    base(notification, entity, CATEGORY, Action::Update)
        .with_attribute("occupation")
        .with_data(&event)
}
