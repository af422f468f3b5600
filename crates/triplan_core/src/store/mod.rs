//! In-memory itinerary accumulation.
//!
//! # Responsibility
//! - Hold the ordered event sequence of one planning session.
//!
//! # Invariants
//! - Insertion order is calendar file order.
//! - The store only grows; there is no update or removal path.

pub mod itinerary_store;
