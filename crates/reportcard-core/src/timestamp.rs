//! Assessment timestamps.
//!
//! Datasets store timestamps as free text in a handful of formats. A
//! [`Timestamp`] keeps the original text for display and the parsed value for
//! ordering, so unparseable input fails at load time instead of silently
//! sorting wrong.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const DATE_TIME_FORMATS: &[&str] = &[
    // %.f also matches a missing fraction
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// A timestamp that could not be parsed in any supported format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised timestamp: '{0}'")]
pub struct TimestampError(pub String);

/// A dataset timestamp: original text plus its parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    parsed: NaiveDateTime,
}

impl Timestamp {
    /// The text exactly as it appeared in the dataset.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed value, used for ordering.
    pub fn naive(&self) -> NaiveDateTime {
        self.parsed
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let parsed = DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.naive_utc())
            .ok()
            .or_else(|| {
                DATE_TIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            })
            .or_else(|| {
                DATE_FORMATS.iter().find_map(|fmt| {
                    NaiveDate::parse_from_str(trimmed, fmt)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
            })
            .ok_or_else(|| TimestampError(s.to_string()))?;

        Ok(Timestamp {
            raw: s.to_string(),
            parsed,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional timestamp where `null`, a missing field, and the
/// empty string all mean "not set".
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
