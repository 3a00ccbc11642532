//! Card status notification payloads.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::DomainError;

/// Values of `status_change` on a card notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatusChange {
    New,
    Activated,
    Blocked,
    Unblocked,
    Reissued,
    Canceled,
    LimitChanged,
}

impl CardStatusChange {
    pub fn parse(status_change: &str) -> Result<Self, DomainError> {
        match status_change {
            "card_new" => Ok(Self::New),
            "card_activated" => Ok(Self::Activated),
            "card_blocked" => Ok(Self::Blocked),
            "card_unblocked" => Ok(Self::Unblocked),
            "card_reissued" => Ok(Self::Reissued),
            "card_canceled" => Ok(Self::Canceled),
            "card_limit_changed" => Ok(Self::LimitChanged),
            other => Err(DomainError::InvalidNotificationAction(format!(
                "card status change `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaCardLimits {
    #[serde(default)]
    pub daily_purchase: Option<Decimal>,
    #[serde(default, alias = "daily_atm")]
    pub daily_withdrawal: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CardData {
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub status_change: Option<String>,
    /// Block or reissue reason code, depending on `status_change`.
    #[serde(default)]
    pub status_change_reason: Option<String>,
    #[serde(default, alias = "last_4")]
    pub last_four: Option<String>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default, alias = "replacement_card_id")]
    pub new_card_id: Option<String>,
    #[serde(default)]
    pub limits: Option<BbvaCardLimits>,
}
