//! Move-money (transfer) notification payloads.

use serde::Deserialize;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMoneyReason {
    StatusChange,
    CorrectedData,
}

impl MoveMoneyReason {
    pub fn parse(reason: &str) -> Result<Self, DomainError> {
        match reason {
            "status_change" => Ok(Self::StatusChange),
            "corrected_data" => Ok(Self::CorrectedData),
            other => Err(DomainError::InvalidNotificationAction(format!(
                "move money reason `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaCorrection {
    pub field: String,
    #[serde(default, alias = "old_value")]
    pub previous_value: Option<String>,
    #[serde(alias = "value")]
    pub new_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoveMoneyData {
    #[serde(default, alias = "id")]
    pub move_money_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default)]
    pub corrections: Vec<BbvaCorrection>,
}
