//! Planner use-case services.
//!
//! # Responsibility
//! - Orchestrate filter, itinerary and tip components into UI-level actions.
//! - Keep FFI/UI layers decoupled from component internals.

pub mod attraction_form;
pub mod planner_service;
