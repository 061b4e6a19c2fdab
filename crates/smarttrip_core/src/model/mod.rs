//! Travel-planner domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by filter, itinerary and planner
//!   logic.
//! - Keep serde wire names aligned with the static catalog document.
//!
//! # Invariants
//! - Every attraction is identified by a stable `AttractionId`.
//! - Records are replaced wholesale, never edited in place across owners.

pub mod attraction;
pub mod catalog;
pub mod transport;
