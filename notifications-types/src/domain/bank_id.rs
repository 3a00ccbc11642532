//! Bank-assigned identifier taxonomy.
//!
//! BBVA hands out plain strings for every resource and encodes the resource
//! kind in a short prefix. This module is the only place that inspects those
//! prefixes; everything else works with [`BankIdKind`] or [`EntityRef`].

use serde_json::Value;

use crate::error::DomainError;

const CONSUMER_PREFIX: &str = "CO-";
const BUSINESS_PREFIX: &str = "NC-";
const MEMBER_PREFIX: &str = "OW-";
const ACCOUNT_PREFIXES: [&str; 2] = ["AC-", "RA-"];
const CARD_PREFIXES: [&str; 2] = ["DC-", "RC-"];

/// Resource kind encoded in a bank ID prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankIdKind {
    Consumer,
    Business,
    Member,
    Account,
    Card,
    Unknown,
}

impl BankIdKind {
    /// Classifies a bank ID by its prefix.
    ///
    /// A bare prefix with nothing after it is `Unknown`.
    pub fn of(id: &str) -> Self {
        let has = |prefix: &str| id.len() > prefix.len() && id.starts_with(prefix);

        if has(CONSUMER_PREFIX) {
            Self::Consumer
        } else if has(BUSINESS_PREFIX) {
            Self::Business
        } else if has(MEMBER_PREFIX) {
            Self::Member
        } else if ACCOUNT_PREFIXES.iter().any(|p| has(p)) {
            Self::Account
        } else if CARD_PREFIXES.iter().any(|p| has(p)) {
            Self::Card
        } else {
            Self::Unknown
        }
    }
}

/// Validates that `id` is an account ID and returns it.
pub fn account_id(id: &str) -> Result<String, DomainError> {
    expect_kind(id, BankIdKind::Account)
}

/// Validates that `id` is a card ID and returns it.
pub fn card_id(id: &str) -> Result<String, DomainError> {
    expect_kind(id, BankIdKind::Card)
}

fn expect_kind(id: &str, kind: BankIdKind) -> Result<String, DomainError> {
    if BankIdKind::of(id) == kind {
        Ok(id.to_string())
    } else {
        Err(DomainError::InvalidEntityId(format!(
            "expected {:?} ID, got `{}`",
            kind, id
        )))
    }
}

/// A reference to a customer-level entity, as named by the bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Consumer(String),
    Business(String),
    Member(String),
    Unknown(String),
}

impl EntityRef {
    pub fn parse(id: &str) -> Self {
        let id = id.trim();
        match BankIdKind::of(id) {
            BankIdKind::Consumer => Self::Consumer(id.to_string()),
            BankIdKind::Business => Self::Business(id.to_string()),
            BankIdKind::Member => Self::Member(id.to_string()),
            BankIdKind::Account | BankIdKind::Card | BankIdKind::Unknown => {
                Self::Unknown(id.to_string())
            }
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    pub fn bank_id(&self) -> &str {
        match self {
            Self::Consumer(id) | Self::Business(id) | Self::Member(id) | Self::Unknown(id) => id,
        }
    }
}

/// Decodes the envelope's customer ID field into an [`EntityRef`].
///
/// BBVA sends the same field in three shapes: a bare string, a JSON array of
/// strings, or a string whose contents are a JSON array. They are tried in
/// that order:
///
/// 1. decode as a string; a recognized prefix wins immediately
/// 2. decode as a string array (the value itself, or the contents of the
///    string from step 1) and check the first element
/// 3. otherwise fail with `InvalidEntityId`
pub fn parse_customer_id(raw: &Value) -> Result<EntityRef, DomainError> {
    let as_string = serde_json::from_value::<String>(raw.clone()).ok();

    if let Some(id) = &as_string {
        let entity = EntityRef::parse(id);
        if entity.is_known() {
            return Ok(entity);
        }
    }

    let as_array = match &as_string {
        Some(s) => serde_json::from_str::<Vec<String>>(s).ok(),
        None => serde_json::from_value::<Vec<String>>(raw.clone()).ok(),
    };

    if let Some(first) = as_array.as_ref().and_then(|ids| ids.first()) {
        let entity = EntityRef::parse(first);
        if entity.is_known() {
            return Ok(entity);
        }
    }

    Err(DomainError::InvalidEntityId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_prefix_taxonomy() {
        assert_eq!(BankIdKind::of("CO-1"), BankIdKind::Consumer);
        assert_eq!(BankIdKind::of("NC-1"), BankIdKind::Business);
        assert_eq!(BankIdKind::of("OW-1"), BankIdKind::Member);
        assert_eq!(BankIdKind::of("AC-1"), BankIdKind::Account);
        assert_eq!(BankIdKind::of("RA-1"), BankIdKind::Account);
        assert_eq!(BankIdKind::of("DC-1"), BankIdKind::Card);
        assert_eq!(BankIdKind::of("RC-1"), BankIdKind::Card);
        assert_eq!(BankIdKind::of("XX-1"), BankIdKind::Unknown);
        assert_eq!(BankIdKind::of("CO-"), BankIdKind::Unknown);
        assert_eq!(BankIdKind::of(""), BankIdKind::Unknown);
    }

    #[test]
    fn test_customer_id_encodings_resolve_identically() {
        let expected = EntityRef::Consumer("CO-abc123".into());

        assert_eq!(parse_customer_id(&json!("CO-abc123")).unwrap(), expected);
        assert_eq!(parse_customer_id(&json!(["CO-abc123"])).unwrap(), expected);
        assert_eq!(
            parse_customer_id(&json!("[\"CO-abc123\"]")).unwrap(),
            expected
        );
    }

    #[test]
    fn test_customer_id_business_and_member() {
        assert_eq!(
            parse_customer_id(&json!("NC-xyz")).unwrap(),
            EntityRef::Business("NC-xyz".into())
        );
        assert_eq!(
            parse_customer_id(&json!(["OW-qqq"])).unwrap(),
            EntityRef::Member("OW-qqq".into())
        );
    }

    #[test]
    fn test_customer_id_uses_first_array_element() {
        assert_eq!(
            parse_customer_id(&json!(["NC-first", "CO-second"])).unwrap(),
            EntityRef::Business("NC-first".into())
        );
    }

    #[test]
    fn test_customer_id_invalid_in_every_encoding() {
        for raw in [
            json!("abc123"),
            json!(""),
            json!(["abc123"]),
            json!([""]),
            json!("[\"abc123\"]"),
            json!("[\"\"]"),
            json!([]),
            json!(42),
            json!(null),
            json!("AC-123"),
        ] {
            let result = parse_customer_id(&raw);
            assert!(
                matches!(result, Err(DomainError::InvalidEntityId(_))),
                "expected InvalidEntityId for {}",
                raw
            );
        }
    }

    #[test]
    fn test_expect_account_and_card_ids() {
        assert_eq!(account_id("AC-1").unwrap(), "AC-1");
        assert!(account_id("DC-1").is_err());
        assert_eq!(card_id("RC-9").unwrap(), "RC-9");
        assert!(card_id("CO-9").is_err());
    }
}
