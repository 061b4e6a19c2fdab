//! Catalog filter: criteria reducers, visible-set computation and selection
//! auto-correction.
//!
//! # Responsibility
//! - Keep filtering a pure function of catalog plus applied criteria.
//! - Keep facet toggles pure so the planner decides what to persist.
//!
//! # Invariants
//! - Selection correction consumes filter output; it never runs inside
//!   filtering itself.

pub mod criteria;
pub mod engine;
pub mod selection;
