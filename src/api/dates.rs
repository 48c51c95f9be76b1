//! Date normalization for entity payloads.
//!
//! The backend sends calendar dates either as `YYYY-MM-DD` or as full RFC 3339
//! timestamps depending on the serializer. Both are read into `time::Date`;
//! dates are always written back in the short form.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const NAIVE_DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse a calendar date from `YYYY-MM-DD`, RFC 3339, or a zone-less
/// `YYYY-MM-DDTHH:MM:SS` timestamp.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts.date());
    }
    let naive = raw.split('.').next().unwrap_or(raw);
    PrimitiveDateTime::parse(naive, NAIVE_DATETIME_FORMAT)
        .ok()
        .map(PrimitiveDateTime::date)
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serde adapter for `Option<Date>` fields that may arrive in either form.
pub mod flexible_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&super::format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Fails on a non-empty string that is not a recognizable date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => super::parse_date(text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date '{text}'"))),
        }
    }
}
