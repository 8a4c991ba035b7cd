//! Timestamps at the boundary.
//!
//! Records arrive with ISO-8601 strings. They are parsed exactly once, here, into
//! [`Timestamp`]; everything downstream compares typed instants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{DomainError, DomainResult};

/// Instant used throughout the domain (always UTC).
pub type Timestamp = DateTime<Utc>;

/// Offset forms RFC 3339 rejects: `+0300`, `+03` and minute precision.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
];

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 timestamp.
///
/// Accepted shapes:
/// - RFC 3339 with an offset (`2024-01-01T10:00:00+03:00`), normalised to UTC
/// - other ISO-8601 offsets (`+0300`, `+03`) and minute precision (`2024-01-01T10:00Z`)
/// - date-time without offset (`2024-01-01T10:00:00`), read as UTC
/// - date only (`2099-01-01`), read as midnight UTC
pub fn parse_timestamp(input: &str) -> DomainResult<Timestamp> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    // `Z` is UTC; the naive forms below cover whatever precision precedes it.
    let s = s
        .strip_suffix('Z')
        .or_else(|| s.strip_suffix('z'))
        .unwrap_or(s);

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(DomainError::validation(format!("not an ISO-8601 timestamp: {input:?}")))
}

/// Parse an optional timestamp; `None` and blank strings both mean "absent".
pub fn parse_optional_timestamp(input: Option<&str>) -> DomainResult<Option<Timestamp>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_timestamp(s).map(Some),
    }
}

/// `#[serde(with = "...")]` adapter: lenient ISO-8601 in, RFC 3339 out.
pub mod iso8601 {
    use chrono::SecondsFormat;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::{Timestamp, parse_timestamp};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(de::Error::custom)
    }

    /// Same as the parent module for `Option<Timestamp>` (null / absent / blank = `None`).
    pub mod option {
        use chrono::SecondsFormat;
        use serde::{Deserialize, Deserializer, Serializer, de};

        use super::super::{Timestamp, parse_optional_timestamp};

        pub fn serialize<S: Serializer>(
            ts: &Option<Timestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => {
                    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            parse_optional_timestamp(raw.as_deref()).map_err(de::Error::custom)
        }
    }
}
