//! Date parsing for BBVA payload fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::DomainError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses `YYYY-MM-DD`, falling back to `YYYY-MM-DDTHH:MM:SSZ`.
///
/// A plain date is taken as midnight UTC. Anything else is `InvalidDate`.
pub fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, DomainError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|_| DomainError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Parses an optional date field; absent stays absent, present must be valid.
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, DomainError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date(field, v))
        .transpose()
}
