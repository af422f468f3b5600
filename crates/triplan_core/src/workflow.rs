//! Scripted trip-planning workflow.
//!
//! Drives the tool boundary in the fixed order a planning agent is instructed
//! to follow: book the flight, book the hotel, find activities, and add every
//! item to the calendar with its own `AddToCalendar` call.

use crate::service::itinerary_service::ItineraryService;
use crate::tool::calendar::ADD_TO_CALENDAR;
use crate::tool::providers::{BOOK_FLIGHT, BOOK_HOTEL, FIND_ACTIVITIES};
use crate::tool::{ToolRegistry, ToolResult};
use log::info;
use serde_json::Value;
use std::path::PathBuf;

pub const DEFAULT_TRIP_REQUEST: &str = "Plan and book a family trip from NYC to San Francisco \
for July 24–27: outbound flight, a hotel near Fisherman's Wharf, at least three kid-friendly \
daytime activities, and every itinerary item in the calendar.";

/// One executed tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowStep {
    pub tool: String,
    pub input: String,
    pub output: String,
}

/// Outcome of a completed workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub steps: Vec<WorkflowStep>,
    pub event_count: usize,
    pub calendar_path: PathBuf,
}

/// Fixed-order planner over a [`ToolRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripWorkflow {
    request: String,
}

impl Default for TripWorkflow {
    fn default() -> Self {
        Self::new(DEFAULT_TRIP_REQUEST)
    }
}

impl TripWorkflow {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
        }
    }

    pub fn request(&self) -> &str {
        &self.request
    }

    /// Runs every step, then finishes the session with a final export.
    ///
    /// Stops at the first failing tool call and returns its error.
    pub fn run(
        &self,
        registry: &ToolRegistry,
        itinerary: &mut ItineraryService,
    ) -> ToolResult<WorkflowReport> {
        let mut run = Run {
            registry,
            itinerary,
            steps: Vec::new(),
        };

        let flight = run.call(BOOK_FLIGHT, &self.request)?;
        run.call(ADD_TO_CALENDAR, &flight)?;

        let hotel = run.call(BOOK_HOTEL, &self.request)?;
        run.call(ADD_TO_CALENDAR, &hotel)?;

        let activities = run.call(FIND_ACTIVITIES, &self.request)?;
        for item in split_items(&activities) {
            run.call(ADD_TO_CALENDAR, &item)?;
        }

        let calendar_path = run.itinerary.finish()?;
        let event_count = run.itinerary.store().len();
        info!(
            "event=workflow_done module=workflow status=ok steps={} events={}",
            run.steps.len(),
            event_count
        );

        Ok(WorkflowReport {
            steps: run.steps,
            event_count,
            calendar_path,
        })
    }
}

struct Run<'a> {
    registry: &'a ToolRegistry,
    itinerary: &'a mut ItineraryService,
    steps: Vec<WorkflowStep>,
}

impl Run<'_> {
    fn call(&mut self, tool: &str, input: &str) -> ToolResult<String> {
        let output = self.registry.dispatch(tool, input, self.itinerary)?;
        self.steps.push(WorkflowStep {
            tool: tool.to_string(),
            input: input.to_string(),
            output: output.clone(),
        });
        Ok(output)
    }
}

/// Splits a JSON array payload into one payload per element.
///
/// Anything that is not a JSON array is passed through unchanged, so a bad
/// provider payload surfaces as an `AddToCalendar` error.
fn split_items(payload: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items.iter().map(Value::to_string).collect(),
        _ => vec![payload.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::split_items;

    #[test]
    fn split_items_expands_arrays_and_passes_other_text_through() {
        let items = split_items(r#"[{"title":"a"},{"title":"b"}]"#);
        assert_eq!(items, vec![r#"{"title":"a"}"#, r#"{"title":"b"}"#]);
        assert_eq!(split_items("not json"), vec!["not json"]);
        assert_eq!(split_items(r#"{"title":"a"}"#), vec![r#"{"title":"a"}"#]);
    }
}
