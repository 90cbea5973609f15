//! Lenient timestamp parsing for source payloads.
//!
//! Project Online and hand-written payloads disagree on date formats. The
//! parser accepts, in order:
//! - RFC 3339 (`2024-01-01T08:00:00Z`, `2024-01-01T08:00:00+02:00`)
//! - offset-less datetimes, taken as UTC (`2024-01-01T08:00:00`, with or
//!   without fractional seconds)
//! - plain dates, taken as UTC midnight (`2024-01-01`)
//!
//! The OData "zero date" (`0001-01-01T00:00:00`) is Project Online's way of
//! saying "unset" and parses to `None`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a timestamp string in any accepted format.
///
/// Returns `Ok(None)` for blank input and the OData zero date.
///
/// # Errors
///
/// Returns the offending input when no accepted format matches.
pub fn parse_timestamp(raw: &str) -> Result<Option<DateTime<Utc>>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let parsed = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.with_timezone(&Utc)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.and_utc()
    } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| raw.to_string())?
    } else {
        return Err(raw.to_string());
    };

    if parsed.year() <= 1 {
        return Ok(None);
    }
    Ok(Some(parsed))
}

/// Render a timestamp in the normalized form written to work-item fields.
#[must_use]
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serde adapter for `Option<DateTime<Utc>>` fields fed by [`parse_timestamp`].
///
/// Use with `#[serde(default, with = "crate::timestamps::lenient")]`.
pub mod lenient {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, format_timestamp, parse_timestamp};

    /// Serialize as the normalized RFC 3339 form, or `null` when absent.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&format_timestamp(dt)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from a string in any accepted format, or `null`.
    ///
    /// # Errors
    ///
    /// Fails when the string matches no accepted format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map_err(|bad| serde::de::Error::custom(format!("invalid timestamp: {bad}"))),
        }
    }
}
