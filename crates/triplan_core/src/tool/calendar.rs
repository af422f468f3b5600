//! `AddToCalendar`: the only tool that writes to the itinerary.

use super::{Tool, ToolResult};
use crate::service::itinerary_service::ItineraryService;

pub const ADD_TO_CALENDAR: &str = "AddToCalendar";

/// Inserts one event object or an array of events and reports the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddToCalendarTool;

impl Tool for AddToCalendarTool {
    fn name(&self) -> &str {
        ADD_TO_CALENDAR
    }

    fn description(&self) -> &str {
        "Add events to the trip calendar; input is a JSON object or array with title, start, end"
    }

    fn call(&self, input: &str, itinerary: &mut ItineraryService) -> ToolResult<String> {
        let receipt = itinerary.insert_json(input)?;
        let message = match receipt.written_to {
            Some(path) => format!("{} event(s) written → {}", receipt.added, path.display()),
            None if receipt.added == 0 => "0 event(s) added; calendar unchanged".to_string(),
            None => format!(
                "{} event(s) buffered; calendar is written to {} when the session finishes",
                receipt.added,
                itinerary.calendar_path().display()
            ),
        };
        Ok(message)
    }
}
