//! Consumer notification payloads.

use serde::Deserialize;

use super::common::{BbvaAddress, BbvaContact, BbvaKyc};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerReason {
    Created,
    Updated,
    ContactChanged,
    AddressChanged,
    OccupationChanged,
    KycChanged,
}

impl ConsumerReason {
    pub fn parse(reason: &str) -> Result<Self, DomainError> {
        match reason {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "contact_changed" => Ok(Self::ContactChanged),
            "address_changed" => Ok(Self::AddressChanged),
            "occupation_changed" => Ok(Self::OccupationChanged),
            "kyc_changed" => Ok(Self::KycChanged),
            other => Err(DomainError::InvalidNotificationAction(format!(
                "consumer reason `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConsumerData {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, alias = "dob")]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub contact: Option<BbvaContact>,
    #[serde(default)]
    pub address: Option<BbvaAddress>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub kyc: Option<BbvaKyc>,
}
