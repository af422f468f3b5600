use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use triplan_core::tool::{AddToCalendarTool, BookFlightTool};
use triplan_core::{
    CalendarWriter, FlushPolicy, ItineraryService, ItineraryStore, Tool, ToolError,
    ToolRegistry, ToolResult,
};

fn service_at(path: &Path) -> ItineraryService {
    ItineraryService::new(ItineraryStore::new(), CalendarWriter::new(path))
}

struct EchoTool(&'static str);

impl Tool for EchoTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "echoes its input"
    }

    fn call(&self, input: &str, _itinerary: &mut ItineraryService) -> ToolResult<String> {
        Ok(input.to_string())
    }
}

#[test]
fn travel_defaults_register_every_tool() {
    let registry = ToolRegistry::travel_defaults().unwrap();
    assert_eq!(
        registry.names(),
        ["AddToCalendar", "BookFlight", "BookHotel", "FindActivities", "WebSearch"]
    );
    assert!(registry
        .describe()
        .iter()
        .all(|descriptor| !descriptor.description.is_empty()));
}

#[test]
fn rejects_invalid_and_duplicate_names() {
    let mut registry = ToolRegistry::new();
    assert!(matches!(
        registry.register(Arc::new(EchoTool("Book Flight"))),
        Err(ToolError::InvalidToolName(_))
    ));
    assert!(matches!(
        registry.register(Arc::new(EchoTool("   "))),
        Err(ToolError::InvalidToolName(_))
    ));

    registry.register(Arc::new(BookFlightTool)).unwrap();
    assert!(matches!(
        registry.register(Arc::new(EchoTool("BookFlight"))),
        Err(ToolError::DuplicateTool(_))
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn dispatch_trims_names_and_reports_unknown_tools() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_at(&dir.path().join("trip.ics"));
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(EchoTool("Echo"))).unwrap();

    assert_eq!(registry.dispatch(" Echo ", "hi", &mut service).unwrap(), "hi");
    let err = registry
        .dispatch("BookTrain", "NYC", &mut service)
        .unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(name) if name == "BookTrain"));
}

#[test]
fn flight_output_feeds_add_to_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trip_events.ics");
    let mut service = service_at(&path);
    let registry = ToolRegistry::travel_defaults().unwrap();

    let flight = registry
        .dispatch("BookFlight", "NYC to SFO, July 24", &mut service)
        .unwrap();
    let parsed: Value = serde_json::from_str(&flight).unwrap();
    assert_eq!(parsed["flight_id"], "XY123");
    assert_eq!(parsed["details"], "NYC to SFO, July 24");
    assert!(service.store().is_empty());

    let message = registry
        .dispatch("AddToCalendar", &flight, &mut service)
        .unwrap();
    assert_eq!(message, format!("1 event(s) written → {}", path.display()));
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("SUMMARY:Flight – NYC to San Francisco\r\n"));
}

#[test]
fn activity_list_is_added_in_one_call() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_at(&dir.path().join("trip.ics"));
    let registry = ToolRegistry::travel_defaults().unwrap();

    let activities = registry
        .dispatch("FindActivities", "kid-friendly", &mut service)
        .unwrap();
    let parsed: Value = serde_json::from_str(&activities).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(4));

    let message = registry
        .dispatch("AddToCalendar", &activities, &mut service)
        .unwrap();
    assert!(message.starts_with("4 event(s) written"));
    assert_eq!(service.store().len(), 4);
}

#[test]
fn add_to_calendar_reports_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_at(&dir.path().join("trip.ics"));

    let err = AddToCalendarTool
        .call("Flight booked for the 24th", &mut service)
        .unwrap_err();
    assert!(matches!(err, ToolError::Itinerary(_)));
    assert!(err.to_string().starts_with("malformed record"));
}

#[test]
fn add_to_calendar_messages_follow_flush_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trip.ics");
    let mut service = service_at(&path).with_flush_policy(FlushPolicy::OnFinish);

    let buffered = AddToCalendarTool
        .call(
            r#"{"title":"Hotel","start":"2025-07-24","end":"2025-07-27"}"#,
            &mut service,
        )
        .unwrap();
    assert!(buffered.starts_with("1 event(s) buffered"));

    let empty = AddToCalendarTool.call("[]", &mut service).unwrap();
    assert_eq!(empty, "0 event(s) added; calendar unchanged");
    assert!(!path.exists());
}

#[test]
fn web_search_stub_returns_at_most_three_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_at(&dir.path().join("trip.ics"));
    let registry = ToolRegistry::travel_defaults().unwrap();

    let hits = registry
        .dispatch("WebSearch", "aquarium museum wharf", &mut service)
        .unwrap();
    let lines: Vec<&str> = hits.lines().collect();
    assert!(!lines.is_empty() && lines.len() <= 3);
    assert!(lines.iter().all(|line| line.contains(": ")));

    let none = registry
        .dispatch("WebSearch", "snowboarding", &mut service)
        .unwrap();
    assert_eq!(none, "No results.");
    assert!(service.store().is_empty());
}
