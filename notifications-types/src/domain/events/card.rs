//! Card lifecycle events.

use serde::{Deserialize, Serialize};

use crate::domain::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Active,
    Blocked,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBlockReason {
    Lost,
    Stolen,
    Fraud,
    CustomerRequest,
    BankRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardReissueReason {
    Lost,
    Stolen,
    Damaged,
    Expired,
    NameChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIssuedNotification {
    pub card_id: String,
    pub account_id: String,
    pub last_four: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStatusNotification {
    pub card_id: String,
    pub status: CardStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<CardBlockReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReissuedNotification {
    pub card_id: String,
    pub new_card_id: String,
    pub reason: CardReissueReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLimitNotification {
    pub card_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_purchase: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_withdrawal: Option<Money>,
}
