//! Itinerary set and plan export.
//!
//! # Responsibility
//! - Keep the user's chosen attractions unique and ordered.
//! - Derive travel estimates and the exported plan from that list.

pub mod plan;
pub mod set;
