//! iCalendar text rendering.
//!
//! Output uses CRLF line endings, TEXT escaping and 75-octet line folding.
//! Event `UID`s are name-based UUIDs over position and fields, so rendering the
//! same store twice yields the same bytes.

use super::{CalendarError, CalendarResult};
use crate::model::event::EventRecord;
use crate::model::timestamp::Timestamp;
use crate::store::itinerary_store::ItineraryStore;
use chrono::{DateTime, Utc};
use uuid::Uuid;

const CRLF: &str = "\r\n";
const MAX_LINE_OCTETS: usize = 75;
const UID_DOMAIN: &str = "triplan";
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

// Namespace for event UIDs; fixed so exports stay comparable across runs.
const UID_NAMESPACE: Uuid = Uuid::from_u128(0x5f1c_2a4e_8d7b_4c61_9e0a_3b2d_7c4f_1a86);

/// Renders the whole store as one `VCALENDAR` document.
///
/// # Errors
/// - `CalendarError::Format` for the first record that fails [`check_record`].
pub fn render(store: &ItineraryStore) -> CalendarResult<String> {
    let mut out = String::with_capacity(128 + store.len() * 256);
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(
        &mut out,
        &format!(
            "PRODID:-//triplan//itinerary {}//EN",
            env!("CARGO_PKG_VERSION")
        ),
    );
    push_line(&mut out, "CALSCALE:GREGORIAN");

    let stamp = format_utc(store.stamp());
    for (index, record) in store.events().iter().enumerate() {
        check_record(index, record)?;
        push_event(&mut out, index, record, &stamp);
    }

    push_line(&mut out, "END:VCALENDAR");
    Ok(out)
}

/// Checks that one record can be expressed as a `VEVENT`.
///
/// # Errors
/// - start and end use different timestamp kinds (`DTSTART`/`DTEND` must
///   share a value type).
/// - either year falls outside `0000..=9999`.
pub fn check_record(index: usize, record: &EventRecord) -> CalendarResult<()> {
    let (start, end) = (record.start(), record.end());
    if start.kind() != end.kind() {
        return Err(CalendarError::Format {
            index,
            message: format!(
                "start is a {} but end is a {}",
                start.kind().label(),
                end.kind().label()
            ),
        });
    }
    for (field, value) in [("start", start), ("end", end)] {
        let year = value.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::Format {
                index,
                message: format!("{field} year {year} is outside {MIN_YEAR:04}..={MAX_YEAR}"),
            });
        }
    }
    Ok(())
}

fn push_event(out: &mut String, index: usize, record: &EventRecord, stamp: &str) {
    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}@{UID_DOMAIN}", event_uid(index, record)));
    push_line(out, &format!("DTSTAMP:{stamp}"));
    push_line(out, &format!("SUMMARY:{}", escape_text(record.title())));
    push_line(out, &date_property("DTSTART", record.start()));
    push_line(out, &date_property("DTEND", record.end()));
    push_line(out, "END:VEVENT");
}

fn event_uid(index: usize, record: &EventRecord) -> Uuid {
    let name = format!(
        "{index}\u{1f}{}\u{1f}{}\u{1f}{}",
        record.title(),
        record.start(),
        record.end()
    );
    Uuid::new_v5(&UID_NAMESPACE, name.as_bytes())
}

fn date_property(name: &str, value: Timestamp) -> String {
    match value {
        Timestamp::Date(date) => format!("{name};VALUE=DATE:{}", date.format("%Y%m%d")),
        Timestamp::Local(local) => format!("{name}:{}", local.format("%Y%m%dT%H%M%S")),
        Timestamp::Utc(utc) => format!("{name}:{}", format_utc(utc)),
    }
}

fn format_utc(value: DateTime<Utc>) -> String {
    value.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

/// Appends one content line, folding at 75 octets without splitting a char.
fn push_line(out: &mut String, line: &str) {
    let mut used = 0;
    for ch in line.chars() {
        let width = ch.len_utf8();
        if used + width > MAX_LINE_OCTETS {
            out.push_str(CRLF);
            out.push(' ');
            used = 1;
        }
        out.push(ch);
        used += width;
    }
    out.push_str(CRLF);
}

#[cfg(test)]
mod tests {
    use super::{escape_text, push_line, MAX_LINE_OCTETS};

    #[test]
    fn escapes_text_special_characters() {
        assert_eq!(
            escape_text("Cable-Car Ride, Hyde St; \\Pier\r\nday 2"),
            "Cable-Car Ride\\, Hyde St\\; \\\\Pier\\nday 2"
        );
    }

    #[test]
    fn short_lines_are_not_folded() {
        let mut out = String::new();
        push_line(&mut out, "SUMMARY:Aquarium of the Bay");
        assert_eq!(out, "SUMMARY:Aquarium of the Bay\r\n");
    }

    #[test]
    fn long_lines_fold_on_char_boundaries_within_limit() {
        let mut out = String::new();
        let line = format!("SUMMARY:{}", "–".repeat(60));
        push_line(&mut out, &line);

        let physical: Vec<&str> = out.trim_end_matches("\r\n").split("\r\n").collect();
        assert!(physical.len() > 1);
        for (index, segment) in physical.iter().enumerate() {
            assert!(segment.len() <= MAX_LINE_OCTETS, "segment {index} too long");
            if index > 0 {
                assert!(segment.starts_with(' '));
            }
        }

        let unfolded: String = physical
            .iter()
            .enumerate()
            .map(|(index, segment)| if index == 0 { *segment } else { &segment[1..] })
            .collect();
        assert_eq!(unfolded, line);
    }
}
