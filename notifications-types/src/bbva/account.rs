//! Account status notification payloads.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::DomainError;

/// Values of `status_change` on an account status notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatusChange {
    AccountOpened,
    DataChanged,
    ParticipantAdded,
    ParticipantRemoved,
    CreditsBlockAdded,
    CreditsBlockRemoved,
    DebitsBlockAdded,
    DebitsBlockRemoved,
    StatusChanged,
    ChargedOff,
}

impl AccountStatusChange {
    pub fn parse(status_change: &str) -> Result<Self, DomainError> {
        match status_change {
            "account_opened" => Ok(Self::AccountOpened),
            "data_changed" => Ok(Self::DataChanged),
            "participant_added" => Ok(Self::ParticipantAdded),
            "participant_removed" => Ok(Self::ParticipantRemoved),
            "credits_block_added" => Ok(Self::CreditsBlockAdded),
            "credits_block_removed" => Ok(Self::CreditsBlockRemoved),
            "debits_block_added" => Ok(Self::DebitsBlockAdded),
            "debits_block_removed" => Ok(Self::DebitsBlockRemoved),
            "status_changed" => Ok(Self::StatusChanged),
            "charged_off" => Ok(Self::ChargedOff),
            other => Err(DomainError::InvalidNotificationAction(format!(
                "account status change `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccountData {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub status_change: Option<String>,
    /// Free-form companion to `status_change`; carries a date for openings and blocks.
    #[serde(default)]
    pub status_change_reason: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub participant_role: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub routing_number: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub charge_off_amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}
