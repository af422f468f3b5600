//! Session-level use-case services.
//!
//! # Responsibility
//! - Bind store, serializer and policies into one explicitly owned session.
//! - Keep tool/CLI layers decoupled from store and file details.

pub mod itinerary_service;
