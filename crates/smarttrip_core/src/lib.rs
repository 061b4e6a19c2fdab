//! Core planner logic for SmartTrip.
//! This crate is the single source of truth for catalog filtering, itinerary
//! and selection invariants; UI shells only render its state.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod itinerary;
pub mod logging;
pub mod model;
pub mod service;
pub mod tip;

pub use catalog::{
    load_catalog, load_catalog_or_empty, load_catalog_with_timeout, parse_catalog,
    CatalogLoadError, CatalogResult, CatalogSource, DEFAULT_CATALOG_TIMEOUT,
};
pub use config::{PlannerConfig, TipConfig};
pub use filter::criteria::{
    toggle_district, toggle_region, FacetSelection, FacetToggle, FilterCriteria, ALL_FACET_LABEL,
};
pub use filter::engine::{available_districts, available_regions, filter_attractions};
pub use filter::selection::reconcile_selection;
pub use itinerary::plan::{
    estimated_travel_minutes, plan_file_name, plan_file_name_today, render_plan_text,
};
pub use itinerary::set::{AddOutcome, Itinerary};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::attraction::{Attraction, AttractionId, AttractionValidationError, Category};
pub use model::catalog::Catalog;
pub use model::transport::TransportMode;
pub use service::attraction_form::{FormError, NewAttractionForm};
pub use service::planner_service::{PlannerError, PlannerResult, TipState, TipTicket, TripPlanner};
pub use tip::{TipError, TipProvider, TipResult, TipService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
