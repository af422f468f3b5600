//! Core itinerary logic for triplan.
//! Accumulates trip events from booking tools and exports them as iCalendar.

pub mod calendar;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod tool;
pub mod workflow;

pub use calendar::{CalendarError, CalendarResult, CalendarWriter};
pub use config::{ApiKey, AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::batch::{EventBatch, RecordDecodeError};
pub use model::event::{EventDraft, EventRecord, EventValidationError, WindowPolicy};
pub use model::timestamp::{Timestamp, TimestampKind};
pub use service::itinerary_service::{
    FlushPolicy, InsertReceipt, ItineraryError, ItineraryResult, ItineraryService,
};
pub use store::itinerary_store::ItineraryStore;
pub use tool::{Tool, ToolDescriptor, ToolError, ToolRegistry, ToolResult};
pub use workflow::{TripWorkflow, WorkflowReport, WorkflowStep};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
