//! Mock booking providers and web-search stub.
//!
//! Outputs are fixed fixtures for a July 24–27 San Francisco family trip. No
//! network calls are made and inputs are never validated for business sense.

use super::{Tool, ToolResult};
use crate::service::itinerary_service::ItineraryService;
use serde_json::json;

pub const BOOK_FLIGHT: &str = "BookFlight";
pub const BOOK_HOTEL: &str = "BookHotel";
pub const FIND_ACTIVITIES: &str = "FindActivities";
pub const WEB_SEARCH: &str = "WebSearch";

const MAX_SEARCH_RESULTS: usize = 3;

const ACTIVITIES: &[(&str, &str, &str)] = &[
    ("Exploratorium at Pier 15", "2025-07-25T10:00", "2025-07-25T13:00"),
    ("Aquarium of the Bay", "2025-07-25T14:00", "2025-07-25T16:00"),
    ("Cable-Car Ride & Hyde St Pier", "2025-07-26T10:00", "2025-07-26T12:00"),
    ("California Academy of Sciences", "2025-07-26T13:30", "2025-07-26T16:30"),
];

const SEARCH_CORPUS: &[(&str, &str)] = &[
    (
        "Exploratorium",
        "Hands-on science museum at Pier 15 with exhibits for all ages.",
    ),
    (
        "Aquarium of the Bay",
        "Walk-through tunnels of local marine life at Pier 39.",
    ),
    (
        "Fisherman's Wharf",
        "Waterfront neighborhood with sea lions, seafood stands and bay cruises.",
    ),
    (
        "California Academy of Sciences",
        "Aquarium, planetarium and rainforest dome in Golden Gate Park.",
    ),
    (
        "SFO to Fisherman's Wharf",
        "BART to Embarcadero then the F-line streetcar takes about an hour.",
    ),
];

/// Returns one flight itinerary object echoing the request in `details`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookFlightTool;

impl Tool for BookFlightTool {
    fn name(&self) -> &str {
        BOOK_FLIGHT
    }

    fn description(&self) -> &str {
        "Books a flight, returns JSON with title/start/end"
    }

    fn call(&self, input: &str, _itinerary: &mut ItineraryService) -> ToolResult<String> {
        Ok(json!({
            "flight_id": "XY123",
            "details": input,
            "title": "Flight – NYC to San Francisco",
            "start": "2025-07-24T08:00",
            "end": "2025-07-24T11:00",
        })
        .to_string())
    }
}

/// Returns one all-day hotel stay object.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookHotelTool;

impl Tool for BookHotelTool {
    fn name(&self) -> &str {
        BOOK_HOTEL
    }

    fn description(&self) -> &str {
        "Books the hotel, returns JSON with title/start/end"
    }

    fn call(&self, _input: &str, _itinerary: &mut ItineraryService) -> ToolResult<String> {
        Ok(json!({
            "hotel_name": "Holiday Inn Express Fisherman's Wharf",
            "title": "Hotel – Holiday Inn Express Fisherman's Wharf",
            "start": "2025-07-24",
            "end": "2025-07-27",
        })
        .to_string())
    }
}

/// Returns a JSON array of kid-friendly daytime activities.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindActivitiesTool;

impl Tool for FindActivitiesTool {
    fn name(&self) -> &str {
        FIND_ACTIVITIES
    }

    fn description(&self) -> &str {
        "Returns JSON array of kid-friendly activities for SF"
    }

    fn call(&self, _input: &str, _itinerary: &mut ItineraryService) -> ToolResult<String> {
        let items: Vec<_> = ACTIVITIES
            .iter()
            .map(|(title, start, end)| json!({ "title": title, "start": start, "end": end }))
            .collect();
        Ok(serde_json::Value::Array(items).to_string())
    }
}

/// Offline search stub: `title: body` lines for up to three matching entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSearchTool;

impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        WEB_SEARCH
    }

    fn description(&self) -> &str {
        "Searches the web for travel tips; returns up to three `title: body` lines"
    }

    fn call(&self, input: &str, _itinerary: &mut ItineraryService) -> ToolResult<String> {
        let terms: Vec<String> = input
            .split_whitespace()
            .map(|term| term.to_lowercase())
            .filter(|term| term.len() > 2)
            .collect();

        let lines: Vec<String> = SEARCH_CORPUS
            .iter()
            .filter(|(title, body)| {
                let haystack = format!("{title} {body}").to_lowercase();
                terms.iter().any(|term| haystack.contains(term.as_str()))
            })
            .take(MAX_SEARCH_RESULTS)
            .map(|(title, body)| format!("{title}: {body}"))
            .collect();

        if lines.is_empty() {
            return Ok("No results.".to_string());
        }
        Ok(lines.join("\n"))
    }
}
