//! BBVA Open Platform webhook shapes.
//!
//! Everything here mirrors the provider's wire format; codes stay as strings
//! until [`codes`] maps them onto internal enums.

pub mod account;
pub mod business;
pub mod card;
pub mod codes;
pub mod common;
pub mod consumer;
pub mod envelope;
pub mod move_money;
pub mod transaction;

pub use account::{AccountData, AccountStatusChange};
pub use business::{BbvaMember, BusinessData, BusinessReason};
pub use card::{BbvaCardLimits, CardData, CardStatusChange};
pub use common::{BbvaAddress, BbvaContact, BbvaDocument, BbvaKyc, BbvaLegalDocument};
pub use consumer::{ConsumerData, ConsumerReason};
pub use envelope::{BANK_NAME, EVENT_TYPE_PREFIX, EventType, Notification, Timestamp};
pub use move_money::{BbvaCorrection, MoveMoneyData, MoveMoneyReason};
pub use transaction::{BbvaMerchant, TransactionData, TransactionReason};
