//! String-typed tool boundary consumed by a planning agent.
//!
//! # Responsibility
//! - Define the one-string-in, one-string-out tool contract.
//! - Route tool calls by name to registered implementations.
//!
//! # Invariants
//! - Tools never panic on caller input; failures come back as `ToolError`.
//! - Only `AddToCalendar` mutates the itinerary session.

use crate::service::itinerary_service::{ItineraryError, ItineraryService};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod calendar;
pub mod providers;
pub mod registry;

pub use calendar::AddToCalendarTool;
pub use providers::{BookFlightTool, BookHotelTool, FindActivitiesTool, WebSearchTool};
pub use registry::{ToolDescriptor, ToolRegistry};

pub type ToolResult<T> = Result<T, ToolError>;

/// One callable tool.
pub trait Tool {
    /// Stable name the agent uses to select this tool.
    fn name(&self) -> &str;
    /// One-line usage hint shown to the agent.
    fn description(&self) -> &str;
    /// Executes the tool with one plain-text or JSON input.
    fn call(&self, input: &str, itinerary: &mut ItineraryService) -> ToolResult<String>;
}

#[derive(Debug)]
pub enum ToolError {
    InvalidToolName(String),
    DuplicateTool(String),
    UnknownTool(String),
    Itinerary(ItineraryError),
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToolName(name) => write!(f, "tool name is invalid: `{name}`"),
            Self::DuplicateTool(name) => write!(f, "tool already registered: {name}"),
            Self::UnknownTool(name) => write!(f, "unknown tool: {name}"),
            Self::Itinerary(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Itinerary(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItineraryError> for ToolError {
    fn from(value: ItineraryError) -> Self {
        Self::Itinerary(value)
    }
}
