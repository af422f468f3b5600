//! Typed timestamps accepted from booking providers.
//!
//! # Responsibility
//! - Parse provider timestamp strings into one of three explicit shapes.
//! - Provide a comparable instant for event window validation.
//!
//! # Invariants
//! - `Timestamp::Utc` values are normalized to UTC at parse time.
//! - Offset-less values stay floating; parsing never guesses a time zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Point in time attached to an itinerary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// All-day value, e.g. `2025-07-24`.
    Date(NaiveDate),
    /// Floating wall-clock time without offset, e.g. `2025-07-24T08:00`.
    Local(NaiveDateTime),
    /// Absolute time; inputs with `Z` or a numeric offset land here.
    Utc(DateTime<Utc>),
}

/// Shape discriminant of a [`Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampKind {
    Date,
    Local,
    Utc,
}

impl TimestampKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Local => "local date-time",
            Self::Utc => "utc date-time",
        }
    }
}

impl Timestamp {
    /// Parses one provider timestamp string.
    ///
    /// Accepted shapes, tried in order:
    /// - RFC 3339 / ISO 8601 with `Z` or numeric offset (seconds optional).
    /// - Offset-less date-time with `T` or space separator (seconds optional).
    /// - Plain calendar date.
    ///
    /// Returns `None` for blank or unrecognized input.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(Self::Utc(parsed.with_timezone(&Utc)));
        }
        for format in OFFSET_FORMATS {
            if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
                return Some(Self::Utc(parsed.with_timezone(&Utc)));
            }
        }
        if let Some(zulu) = trimmed.strip_suffix(['Z', 'z']) {
            return parse_local(zulu).map(|naive| Self::Utc(naive.and_utc()));
        }
        if let Some(naive) = parse_local(trimmed) {
            return Some(Self::Local(naive));
        }

        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .ok()
            .map(Self::Date)
    }

    pub fn kind(&self) -> TimestampKind {
        match self {
            Self::Date(_) => TimestampKind::Date,
            Self::Local(_) => TimestampKind::Local,
            Self::Utc(_) => TimestampKind::Utc,
        }
    }

    /// Returns the instant used for ordering checks.
    ///
    /// Dates map to midnight; floating times are compared as if they were UTC.
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN),
            Self::Local(value) => *value,
            Self::Utc(value) => value.naive_utc(),
        }
    }

    /// Calendar year of the value, used by serializers with a fixed-width year.
    pub fn year(&self) -> i32 {
        use chrono::Datelike;
        match self {
            Self::Date(date) => date.year(),
            Self::Local(value) => value.year(),
            Self::Utc(value) => value.year(),
        }
    }
}

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Local(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S")),
            Self::Utc(value) => write!(f, "{}", value.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Timestamp, TimestampKind};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn parses_minute_precision_local_time() {
        let parsed = Timestamp::parse("2025-07-24T08:00").expect("local time should parse");
        let expected = NaiveDate::from_ymd_opt(2025, 7, 24)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid fixture");
        assert_eq!(parsed, Timestamp::Local(expected));
    }

    #[test]
    fn zulu_suffix_without_seconds_is_utc() {
        let parsed = Timestamp::parse("2025-07-24T08:00Z").expect("zulu time should parse");
        assert_eq!(
            parsed,
            Timestamp::Utc(Utc.with_ymd_and_hms(2025, 7, 24, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn numeric_offset_is_normalized_to_utc() {
        let parsed = Timestamp::parse("2025-07-24T08:00:00-07:00").expect("offset should parse");
        assert_eq!(
            parsed,
            Timestamp::Utc(Utc.with_ymd_and_hms(2025, 7, 24, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn date_only_and_garbage_inputs() {
        assert_eq!(
            Timestamp::parse(" 2025-07-27 ").map(|value| value.kind()),
            Some(TimestampKind::Date)
        );
        assert_eq!(Timestamp::parse("tomorrow morning"), None);
        assert_eq!(Timestamp::parse("   "), None);
        assert_eq!(Timestamp::parse("2025-13-01"), None);
    }

    #[test]
    fn display_is_canonical() {
        let local = Timestamp::parse("2025-07-24 08:00").expect("space separator should parse");
        assert_eq!(local.to_string(), "2025-07-24T08:00:00");
        let utc = Timestamp::parse("2025-07-24T08:00:00+00:00").expect("utc should parse");
        assert_eq!(utc.to_string(), "2025-07-24T08:00:00Z");
    }
}
