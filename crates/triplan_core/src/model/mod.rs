//! Itinerary domain model.
//!
//! # Responsibility
//! - Define the typed event record consumed by store and serializer.
//! - Own boundary validation of provider payloads.
//!
//! # Invariants
//! - Records are validated on construction; no unchecked constructor exists.
//! - Duplicate records are legal and carry no identity of their own.

pub mod batch;
pub mod event;
pub mod timestamp;
