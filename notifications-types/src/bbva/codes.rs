//! BBVA code tables.
//!
//! Each function maps one provider code onto its internal enum with an
//! exhaustive match. An unknown code is always an error here; callers that
//! aggregate auxiliary lists decide for themselves whether to skip it.

use crate::domain::events::{
    AccountStatus, BusinessActivity, BusinessEntityType, CardBlockReason, CardReissueReason,
    Country, IdentityDocumentType, Industry, LegalDocumentType, MemberRole, MoveMoneyStatus,
    Occupation, ParticipantRole,
};
use crate::domain::{Currency, KycStatus};
use crate::error::DomainError;

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn invalid_code(field: &'static str, value: &str) -> DomainError {
    DomainError::InvalidCode {
        field,
        value: value.to_string(),
    }
}

fn invalid_status(field: &'static str, value: &str) -> DomainError {
    DomainError::InvalidStatus {
        field,
        value: value.to_string(),
    }
}

pub fn kyc_status(code: &str) -> Result<KycStatus, DomainError> {
    match normalize(code).as_str() {
        "NOT_STARTED" => Ok(KycStatus::NotStarted),
        "PENDING" => Ok(KycStatus::Pending),
        "REVIEW" => Ok(KycStatus::Review),
        "APPROVED" => Ok(KycStatus::Approved),
        "DECLINED" => Ok(KycStatus::Declined),
        _ => Err(invalid_status("kyc", code)),
    }
}

pub fn identity_document_type(code: &str) -> Result<IdentityDocumentType, DomainError> {
    match normalize(code).as_str() {
        "SSN" => Ok(IdentityDocumentType::Ssn),
        "PASSPORT" => Ok(IdentityDocumentType::Passport),
        "DRIVERS_LICENSE" => Ok(IdentityDocumentType::DriversLicense),
        "STATE_ID" => Ok(IdentityDocumentType::StateId),
        "MATRICULAR" => Ok(IdentityDocumentType::Matricular),
        "ITIN" => Ok(IdentityDocumentType::Itin),
        _ => Err(DomainError::InvalidDocumentType(code.to_string())),
    }
}

pub fn legal_document_type(code: &str) -> Result<LegalDocumentType, DomainError> {
    match normalize(code).as_str() {
        "EIN_LETTER" => Ok(LegalDocumentType::EinLetter),
        "ARTICLES_OF_INCORPORATION" => Ok(LegalDocumentType::ArticlesOfIncorporation),
        "OPERATING_AGREEMENT" => Ok(LegalDocumentType::OperatingAgreement),
        "BYLAWS" => Ok(LegalDocumentType::Bylaws),
        "CERTIFICATE_OF_GOOD_STANDING" => Ok(LegalDocumentType::CertificateOfGoodStanding),
        "PARTNERSHIP_AGREEMENT" => Ok(LegalDocumentType::PartnershipAgreement),
        _ => Err(DomainError::InvalidDocumentType(code.to_string())),
    }
}

pub fn business_entity_type(code: &str) -> Result<BusinessEntityType, DomainError> {
    match normalize(code).as_str() {
        "LLC" => Ok(BusinessEntityType::Llc),
        "CORPORATION" => Ok(BusinessEntityType::Corporation),
        "SOLE_PROPRIETORSHIP" => Ok(BusinessEntityType::SoleProprietorship),
        "PARTNERSHIP" => Ok(BusinessEntityType::Partnership),
        "NON_PROFIT" => Ok(BusinessEntityType::NonProfit),
        _ => Err(invalid_code("business_entity_type", code)),
    }
}

pub fn industry(code: &str) -> Result<Industry, DomainError> {
    match normalize(code).as_str() {
        "RETAIL" => Ok(Industry::Retail),
        "FOOD_SERVICE" => Ok(Industry::FoodService),
        "PROFESSIONAL_SERVICES" => Ok(Industry::ProfessionalServices),
        "CONSTRUCTION" => Ok(Industry::Construction),
        "TECHNOLOGY" => Ok(Industry::Technology),
        "HEALTHCARE" => Ok(Industry::Healthcare),
        "TRANSPORTATION" => Ok(Industry::Transportation),
        "OTHER" => Ok(Industry::Other),
        _ => Err(invalid_code("industry", code)),
    }
}

pub fn business_activity(code: &str) -> Result<BusinessActivity, DomainError> {
    match normalize(code).as_str() {
        "CASH_INTENSIVE" => Ok(BusinessActivity::CashIntensive),
        "INTERNATIONAL_WIRES" => Ok(BusinessActivity::InternationalWires),
        "MONEY_SERVICES" => Ok(BusinessActivity::MoneyServices),
        "GAMBLING" => Ok(BusinessActivity::Gambling),
        "CRYPTOCURRENCY" => Ok(BusinessActivity::Cryptocurrency),
        "MARIJUANA" => Ok(BusinessActivity::Marijuana),
        _ => Err(invalid_code("business_activity", code)),
    }
}

pub fn member_role(code: &str) -> Result<MemberRole, DomainError> {
    match normalize(code).as_str() {
        "OWNER" => Ok(MemberRole::Owner),
        "CONTROLLING_OFFICER" => Ok(MemberRole::ControllingOfficer),
        "AUTHORIZED_SIGNER" => Ok(MemberRole::AuthorizedSigner),
        _ => Err(invalid_code("member_role", code)),
    }
}

pub fn occupation(code: &str) -> Result<Occupation, DomainError> {
    match normalize(code).as_str() {
        "EMPLOYED" => Ok(Occupation::Employed),
        "SELF_EMPLOYED" => Ok(Occupation::SelfEmployed),
        "STUDENT" => Ok(Occupation::Student),
        "RETIRED" => Ok(Occupation::Retired),
        "UNEMPLOYED" => Ok(Occupation::Unemployed),
        "HOMEMAKER" => Ok(Occupation::Homemaker),
        "MILITARY" => Ok(Occupation::Military),
        _ => Err(invalid_code("occupation", code)),
    }
}

/// ISO 3166 alpha-3 (as BBVA sends it) to the internal alpha-2 country.
pub fn country(code: &str) -> Result<Country, DomainError> {
    match normalize(code).as_str() {
        "USA" => Ok(Country::US),
        "MEX" => Ok(Country::MX),
        "CAN" => Ok(Country::CA),
        "ESP" => Ok(Country::ES),
        "GBR" => Ok(Country::GB),
        "COL" => Ok(Country::CO),
        "PER" => Ok(Country::PE),
        "ARG" => Ok(Country::AR),
        _ => Err(DomainError::InvalidCountry(code.to_string())),
    }
}

pub fn currency(code: &str) -> Result<Currency, DomainError> {
    match normalize(code).as_str() {
        "USD" => Ok(Currency::USD),
        "MXN" => Ok(Currency::MXN),
        "EUR" => Ok(Currency::EUR),
        _ => Err(DomainError::InvalidCurrency(code.to_string())),
    }
}

pub fn account_status(code: &str) -> Result<AccountStatus, DomainError> {
    match normalize(code).as_str() {
        "ACTIVE" => Ok(AccountStatus::Active),
        "INACTIVE" => Ok(AccountStatus::Inactive),
        "DORMANT" => Ok(AccountStatus::Dormant),
        "FROZEN" => Ok(AccountStatus::Frozen),
        "PENDING_CLOSURE" => Ok(AccountStatus::PendingClosure),
        "CLOSED" => Ok(AccountStatus::Closed),
        _ => Err(invalid_status("account", code)),
    }
}

pub fn participant_role(code: &str) -> Result<ParticipantRole, DomainError> {
    match normalize(code).as_str() {
        "PRIMARY" => Ok(ParticipantRole::Primary),
        "JOINT" => Ok(ParticipantRole::Joint),
        "AUTHORIZED_USER" => Ok(ParticipantRole::AuthorizedUser),
        _ => Err(invalid_code("participant_role", code)),
    }
}

pub fn card_block_reason(code: &str) -> Result<CardBlockReason, DomainError> {
    match normalize(code).as_str() {
        "LOST" => Ok(CardBlockReason::Lost),
        "STOLEN" => Ok(CardBlockReason::Stolen),
        "FRAUD" => Ok(CardBlockReason::Fraud),
        "CUSTOMER_REQUEST" => Ok(CardBlockReason::CustomerRequest),
        "BANK_REQUEST" => Ok(CardBlockReason::BankRequest),
        _ => Err(invalid_code("card_block_reason", code)),
    }
}

pub fn card_reissue_reason(code: &str) -> Result<CardReissueReason, DomainError> {
    match normalize(code).as_str() {
        "LOST" => Ok(CardReissueReason::Lost),
        "STOLEN" => Ok(CardReissueReason::Stolen),
        "DAMAGED" => Ok(CardReissueReason::Damaged),
        "EXPIRED" => Ok(CardReissueReason::Expired),
        "NAME_CHANGE" => Ok(CardReissueReason::NameChange),
        _ => Err(invalid_code("card_reissue_reason", code)),
    }
}

pub fn move_money_status(code: &str) -> Result<MoveMoneyStatus, DomainError> {
    match normalize(code).as_str() {
        "PENDING" => Ok(MoveMoneyStatus::Pending),
        "PROCESSING" => Ok(MoveMoneyStatus::Processing),
        "COMPLETED" => Ok(MoveMoneyStatus::Completed),
        "RETURNED" => Ok(MoveMoneyStatus::Returned),
        "CANCELED" => Ok(MoveMoneyStatus::Canceled),
        "FAILED" => Ok(MoveMoneyStatus::Failed),
        _ => Err(invalid_status("move_money", code)),
    }
}
