//! Transaction notification payloads.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::events::{AuthorizationStatus, Channel, Direction, HoldStatus};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionReason {
    Authorization(AuthorizationStatus),
    Hold(HoldStatus),
    Posted { channel: Channel, direction: Direction },
}

impl TransactionReason {
    pub fn parse(reason: &str) -> Result<Self, DomainError> {
        use Channel::*;
        use Direction::*;

        match reason {
            "authorization_approved" => Ok(Self::Authorization(AuthorizationStatus::Approved)),
            "authorization_declined" => Ok(Self::Authorization(AuthorizationStatus::Declined)),
            "authorization_reversed" => Ok(Self::Authorization(AuthorizationStatus::Reversed)),
            "hold_set" => Ok(Self::Hold(HoldStatus::Set)),
            "hold_released" => Ok(Self::Hold(HoldStatus::Released)),
            "posted_card_debit" => Ok(Self::Posted {
                channel: Card,
                direction: Debit,
            }),
            "posted_card_credit" => Ok(Self::Posted {
                channel: Card,
                direction: Credit,
            }),
            "posted_non_card_debit" => Ok(Self::Posted {
                channel: NonCard,
                direction: Debit,
            }),
            "posted_non_card_credit" => Ok(Self::Posted {
                channel: NonCard,
                direction: Credit,
            }),
            other => Err(DomainError::InvalidNotificationAction(format!(
                "transaction reason `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaMerchant {
    pub name: String,
    #[serde(default, alias = "mcc")]
    pub category_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionData {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub authorization_id: Option<String>,
    #[serde(default)]
    pub hold_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub merchant: Option<BbvaMerchant>,
    #[serde(default, alias = "posting_date")]
    pub posted_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
