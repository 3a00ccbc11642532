//! Business notification payloads.

use serde::Deserialize;

use super::common::{BbvaAddress, BbvaContact, BbvaKyc, BbvaLegalDocument};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessReason {
    Created,
    Updated,
    OwnerAdded,
    OwnerRemoved,
    IndicatorChanged,
    ContactChanged,
    AddressChanged,
    KycChanged,
}

impl BusinessReason {
    pub fn parse(reason: &str) -> Result<Self, DomainError> {
        match reason {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "owner_added" => Ok(Self::OwnerAdded),
            "owner_removed" => Ok(Self::OwnerRemoved),
            "indicator_changed" => Ok(Self::IndicatorChanged),
            "contact_changed" => Ok(Self::ContactChanged),
            "address_changed" => Ok(Self::AddressChanged),
            "kyc_changed" => Ok(Self::KycChanged),
            other => Err(DomainError::InvalidNotificationAction(format!(
                "business reason `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaMember {
    #[serde(alias = "owner_id")]
    pub member_id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub ownership_percentage: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BusinessData {
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default, alias = "doing_business_as")]
    pub dba: Option<String>,
    #[serde(default, alias = "business_type")]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub formation_date: Option<String>,
    #[serde(default)]
    pub legal_documents: Vec<BbvaLegalDocument>,
    #[serde(default)]
    pub contact: Option<BbvaContact>,
    #[serde(default)]
    pub address: Option<BbvaAddress>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, alias = "owner")]
    pub member: Option<BbvaMember>,
    #[serde(default)]
    pub kyc: Option<BbvaKyc>,
}
