//! ISO-8601 timestamps as exchanged with the backend.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Constraint, ValidationError};

/// A UTC instant.
pub type Timestamp = DateTime<Utc>;

/// Parse an RFC 3339 timestamp, reporting failures against `field`.
pub fn parse(value: &str, field: &str) -> Result<Timestamp, ValidationError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::field(field, Constraint::Timestamp))
}

/// Format a timestamp the way the backend emits them (`2025-01-01T00:00:00.000Z`).
pub fn format(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter writing timestamps with millisecond precision and a `Z` suffix.
pub fn serialize<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

/// Serde adapter accepting any RFC 3339 offset.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

/// Serde adapter for nullable timestamps.
pub mod option {
    use super::*;

    pub fn serialize<S>(ts: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => super::serialize(ts, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_millis_and_z() {
        let ts = parse("2025-01-01T09:00:00+09:00", "limitDate").unwrap();
        assert_eq!(format(&ts), "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn rejects_date_only() {
        let err = parse("2025-01-01", "limitDate").unwrap_err();
        assert!(err.has_field("limitDate"));
    }
}
