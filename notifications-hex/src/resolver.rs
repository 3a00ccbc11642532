//! Entity resolution from the envelope's customer ID.

use serde_json::Value;

use notifications_types::{
    AppError, DomainError, EntityDirectory, EntityRef, NotificationEntity,
    domain::parse_customer_id,
};

/// Parses the customer ID and looks the entity up by bank ID.
///
/// An unrecognized prefix and an unknown bank ID are both `InvalidEntityId`.
pub async fn resolve_entity<D>(directory: &D, customer_id: &Value) -> Result<NotificationEntity, AppError>
where
    D: EntityDirectory + ?Sized,
{
    let entity_ref = parse_customer_id(customer_id)?;

    let found = match &entity_ref {
        EntityRef::Consumer(id) => directory.find_consumer(id).await?,
        EntityRef::Business(id) => directory.find_business(id).await?,
        EntityRef::Member(id) => directory.find_member(id).await?,
        EntityRef::Unknown(id) => {
            return Err(DomainError::InvalidEntityId(id.clone()).into());
        }
    };

    found.ok_or_else(|| {
        DomainError::InvalidEntityId(format!("no entity for bank ID `{}`", entity_ref.bank_id()))
            .into()
    })
}
