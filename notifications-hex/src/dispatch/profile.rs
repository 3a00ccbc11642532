//! Transforms shared by consumer and business notifications.

use notifications_types::bbva::codes;
use notifications_types::bbva::{
    BbvaAddress, BbvaContact, BbvaDocument, BbvaKyc, BbvaLegalDocument,
};
use notifications_types::domain::events::{
    Address, AddressNotification, ContactNotification, IdentityDocument, KycNotification,
    LegalDocument,
};
use notifications_types::domain::parse_optional_date;
use notifications_types::{
    Action, DomainError, NormalizedNotification, Notification, NotificationEntity,
    NotificationType,
};

use super::{base, optional, required};

pub(super) fn contact(
    notification: &Notification,
    entity: &NotificationEntity,
    category: NotificationType,
    contact: Option<&BbvaContact>,
) -> Result<NormalizedNotification, DomainError> {
    let contact = contact.ok_or_else(|| DomainError::missing("contact"))?;
    let event = ContactNotification {
        bank_id: entity.bank_id.clone(),
        email: optional(&contact.email),
        phone: optional(&contact.phone),
    };
    if event.email.is_none() && event.phone.is_none() {
        return Err(DomainError::missing("contact.email"));
    }

    base(notification, entity, category, Action::Update)
        .with_attribute("contact")
        .with_data(&event)
}

pub(super) fn address(
    notification: &Notification,
    entity: &NotificationEntity,
    category: NotificationType,
    address: Option<&BbvaAddress>,
) -> Result<NormalizedNotification, DomainError> {
    let address = address.ok_or_else(|| DomainError::missing("address"))?;
    let event = AddressNotification {
        bank_id: entity.bank_id.clone(),
        address: map_address(address)?,
    };

    base(notification, entity, category, Action::Update)
        .with_attribute("address")
        .with_data(&event)
}

pub(super) fn kyc(
    notification: &Notification,
    entity: &NotificationEntity,
    category: NotificationType,
    kyc: Option<&BbvaKyc>,
) -> Result<NormalizedNotification, DomainError> {
    let kyc = kyc.ok_or_else(|| DomainError::missing("kyc"))?;
    let event = KycNotification {
        bank_id: entity.bank_id.clone(),
        status: codes::kyc_status(required(&kyc.status, "kyc.status")?)?,
        identity_documents: identity_documents(&kyc.documents),
        legal_documents: legal_documents(&kyc.legal_documents),
    };

    base(notification, entity, category, Action::Update)
        .with_attribute("kyc")
        .with_data(&event)
}

pub(super) fn map_address(address: &BbvaAddress) -> Result<Address, DomainError> {
    Ok(Address {
        line1: required(&address.line1, "address.line1")?.to_string(),
        line2: optional(&address.line2),
        city: required(&address.city, "address.city")?.to_string(),
        state: required(&address.state, "address.state")?.to_string(),
        postal_code: required(&address.zip_code, "address.zip_code")?.to_string(),
        country: codes::country(required(&address.country_code, "address.country_code")?)?,
    })
}

/// Maps identity documents, dropping any whose type or dates do not map.
pub(super) fn identity_documents(documents: &[BbvaDocument]) -> Vec<IdentityDocument> {
    documents
        .iter()
        .filter_map(|doc| match identity_document(doc) {
            Ok(mapped) => Some(mapped),
            Err(e) => {
                tracing::debug!(
                    document_type = %doc.document_type,
                    error_code = %e.code(),
                    "Skipping identity document"
                );
                None
            }
        })
        .collect()
}

fn identity_document(doc: &BbvaDocument) -> Result<IdentityDocument, DomainError> {
    let number = doc.number.trim();
    if number.is_empty() {
        return Err(DomainError::missing("number"));
    }

    Ok(IdentityDocument {
        document_type: codes::identity_document_type(&doc.document_type)?,
        number: number.to_string(),
        issuing_country: doc
            .issuing_country
            .as_deref()
            .map(codes::country)
            .transpose()?,
        expires: parse_optional_date("expiration_date", doc.expiration_date.as_deref())?,
    })
}

/// Maps legal documents, dropping any with an unknown type.
pub(super) fn legal_documents(documents: &[BbvaLegalDocument]) -> Vec<LegalDocument> {
    documents
        .iter()
        .filter_map(|doc| match codes::legal_document_type(&doc.document_type) {
            Ok(document_type) => Some(LegalDocument {
                document_type,
                reference: doc.reference.clone(),
            }),
            Err(e) => {
                tracing::debug!(
                    document_type = %doc.document_type,
                    error_code = %e.code(),
                    "Skipping legal document"
                );
                None
            }
        })
        .collect()
}
