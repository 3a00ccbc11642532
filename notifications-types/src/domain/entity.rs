//! Internal entities a notification can be addressed to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of internal entity that owns a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Consumer,
    Business,
    Member,
}

impl AsRef<str> for EntityType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Consumer => "consumer",
            Self::Business => "business",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consumer" => Ok(Self::Consumer),
            "business" => Ok(Self::Business),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown entity type `{}`", other)),
        }
    }
}

/// Identity verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    NotStarted,
    Pending,
    Review,
    Approved,
    Declined,
}

impl AsRef<str> for KycStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::NotStarted => "not_started",
            Self::Pending => "pending",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for KycStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "pending" => Ok(Self::Pending),
            "review" => Ok(Self::Review),
            "approved" => Ok(Self::Approved),
            "declined" => Ok(Self::Declined),
            other => Err(format!("unknown KYC status `{}`", other)),
        }
    }
}

/// The internal entity a notification resolved to.
///
/// Built fresh for every notification; never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntity {
    pub entity_id: String,
    pub entity_type: EntityType,
    pub bank_id: String,
    pub kyc_status: Option<KycStatus>,
}
