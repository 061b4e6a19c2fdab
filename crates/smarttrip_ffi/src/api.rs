//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose planner actions to Dart via FRB as flat envelopes.
//! - Hold the single process-wide planner session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutating call returns enough state for the UI to re-render.
//! - Tip fetches never hold the planner lock during the network call.

use log::warn;
use smarttrip_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, plan_file_name_today, AddOutcome, Attraction, AttractionId,
    CatalogSource, Category, FacetToggle, NewAttractionForm, PlannerConfig, TipService,
    TipState, TransportMode, TripPlanner,
};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

static PLANNER: OnceLock<Mutex<TripPlanner>> = OnceLock::new();
static PLANNER_CONFIG: OnceLock<PlannerConfig> = OnceLock::new();
static TIP_SERVICE: OnceLock<TipService> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); blank
///   uses `SMARTTRIP_LOG_LEVEL`, then the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = if level.trim().is_empty() {
        planner_config()
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string())
    } else {
        level
    };
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One attraction card.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionItem {
    pub id: String,
    pub region: String,
    pub district: String,
    pub name: String,
    /// Category display label.
    pub category: String,
    pub description: String,
    pub suggested_duration: String,
    pub address: String,
    pub rating: f64,
    pub popularity: f64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Full planner view state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSnapshot {
    /// Whether the initial catalog load has finished.
    pub loaded: bool,
    pub last_updated: String,
    pub total_count: u32,
    /// Attractions passing the applied filters, in catalog order.
    pub visible: Vec<AttractionItem>,
    pub selected_id: Option<String>,
    pub available_regions: Vec<String>,
    /// Districts for the pending region selection.
    pub available_districts: Vec<String>,
    /// Pending region chips; `["全部"]` when unrestricted.
    pub pending_regions: Vec<String>,
    pub pending_districts: Vec<String>,
    pub pending_search: String,
    pub pending_travel_days: u32,
    pub pending_transport: String,
    pub applied_transport: String,
    /// `idle|loading|ready`.
    pub tip_status: String,
    pub tip_text: Option<String>,
}

/// One map marker for the itinerary route.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
}

/// Itinerary view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ItinerarySnapshot {
    pub items: Vec<AttractionItem>,
    pub estimated_travel_minutes: u32,
    pub transport_mode: String,
    /// Stops that carry coordinates, in itinerary order.
    pub route_points: Vec<RoutePoint>,
}

/// Plan download payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanExportResponse {
    pub ok: bool,
    pub file_name: Option<String>,
    pub content: Option<String>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Attraction the action applied to, when there is one.
    pub attraction_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PlannerActionResponse {
    fn success(message: impl Into<String>, attraction_id: Option<String>) -> Self {
        Self {
            ok: true,
            attraction_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            attraction_id: None,
            message: message.into(),
        }
    }
}

/// Manual attraction form input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttractionInput {
    pub name: String,
    pub region: String,
    pub district: String,
    /// Category display label; unknown labels are rejected.
    pub category: String,
    pub description: String,
    /// Blank means the default stay hint.
    pub suggested_duration: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Tip fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipResponse {
    /// Attraction the tip was requested for.
    pub attraction_id: Option<String>,
    /// Tip or placeholder text; `None` when nothing was selected.
    pub text: Option<String>,
    /// Whether the selection changed while the tip was in flight.
    pub stale: bool,
}

/// Loads the catalog from `source`, or from `SMARTTRIP_CATALOG` when `None`.
///
/// # FFI contract
/// - Blocking call (file or HTTP read).
/// - Load failures install an empty catalog and return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_load_catalog(source: Option<String>) -> PlannerActionResponse {
    let source = match source.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => CatalogSource::parse(raw),
        _ => planner_config().catalog_source.clone(),
    };
    let timeout = planner_config().catalog_timeout;
    with_planner(|planner| load_catalog_into(planner, &source, timeout))
}

/// Returns the current planner view state.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_snapshot() -> PlannerSnapshot {
    with_planner(|planner| snapshot_of(planner))
}

/// Edits the pending search term.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_set_search(term: String) -> PlannerSnapshot {
    with_planner(|planner| {
        planner.set_pending_search(term);
        snapshot_of(planner)
    })
}

/// Toggles one pending region chip; `全部` resets regions and districts.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_toggle_region(label: String) -> PlannerSnapshot {
    with_planner(|planner| {
        planner.toggle_region(&FacetToggle::from_label(label.as_str()));
        snapshot_of(planner)
    })
}

/// Toggles one pending district chip.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_toggle_district(label: String) -> PlannerSnapshot {
    with_planner(|planner| {
        planner.toggle_district(&FacetToggle::from_label(label.as_str()));
        snapshot_of(planner)
    })
}

/// Edits pending travel days (`>= 1`).
#[flutter_rust_bridge::frb(sync)]
pub fn planner_set_travel_days(days: u32) -> PlannerActionResponse {
    with_planner(|planner| match planner.set_pending_travel_days(days) {
        Ok(()) => PlannerActionResponse::success(format!("travel days set to {days}."), None),
        Err(err) => {
            PlannerActionResponse::failure(format!("planner_set_travel_days failed: {err}"))
        }
    })
}

/// Edits the pending transport mode by display label.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_set_transport(label: String) -> PlannerActionResponse {
    with_planner(|planner| set_transport_on(planner, label.as_str()))
}

/// Commits pending criteria and returns the refreshed view.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_apply_filters() -> PlannerSnapshot {
    with_planner(|planner| {
        planner.apply_filters();
        snapshot_of(planner)
    })
}

/// Selects one visible attraction.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_select(attraction_id: String) -> PlannerActionResponse {
    with_planner(|planner| select_on(planner, attraction_id.as_str()))
}

/// Adds `attraction_id`, or the current selection when `None`, to the
/// itinerary.
#[flutter_rust_bridge::frb(sync)]
pub fn itinerary_add(attraction_id: Option<String>) -> PlannerActionResponse {
    with_planner(|planner| add_to_itinerary_on(planner, attraction_id.as_deref()))
}

/// Removes one itinerary entry; absent ids still succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn itinerary_remove(attraction_id: String) -> PlannerActionResponse {
    with_planner(|planner| {
        let id = AttractionId::new(attraction_id.trim());
        let removed = planner.remove_from_itinerary(&id);
        let message = if removed {
            "Removed from itinerary."
        } else {
            "Not in itinerary."
        };
        PlannerActionResponse::success(message, Some(id.to_string()))
    })
}

/// Returns the itinerary view state.
#[flutter_rust_bridge::frb(sync)]
pub fn itinerary_snapshot() -> ItinerarySnapshot {
    with_planner(|planner| itinerary_of(planner))
}

/// Renders the plan download.
#[flutter_rust_bridge::frb(sync)]
pub fn itinerary_export() -> PlanExportResponse {
    with_planner(|planner| export_from(planner))
}

/// Creates a manual attraction; it becomes visible and selected.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_add_attraction(input: NewAttractionInput) -> PlannerActionResponse {
    with_planner(|planner| add_attraction_on(planner, input))
}

/// Fetches a tip for the current selection.
///
/// # FFI contract
/// - Async call; performs one network request when a credential is set.
/// - Results for a selection that changed mid-flight come back `stale=true`
///   and are not stored.
pub fn planner_fetch_tip() -> TipResponse {
    fetch_tip_with(planner_cell(), tip_service())
}

fn planner_cell() -> &'static Mutex<TripPlanner> {
    PLANNER.get_or_init(|| Mutex::new(TripPlanner::new()))
}

fn planner_config() -> &'static PlannerConfig {
    PLANNER_CONFIG.get_or_init(PlannerConfig::from_env)
}

fn tip_service() -> &'static TipService {
    TIP_SERVICE.get_or_init(|| TipService::from_config(&planner_config().tip))
}

fn with_planner<T>(f: impl FnOnce(&mut TripPlanner) -> T) -> T {
    let mut guard = lock_planner(planner_cell());
    f(&mut guard)
}

fn lock_planner(cell: &Mutex<TripPlanner>) -> MutexGuard<'_, TripPlanner> {
    cell.lock().unwrap_or_else(|poisoned| {
        warn!("event=planner_lock module=ffi status=error reason=poisoned");
        PoisonError::into_inner(poisoned)
    })
}

fn load_catalog_into(
    planner: &mut TripPlanner,
    source: &CatalogSource,
    timeout: Duration,
) -> PlannerActionResponse {
    if planner.load_catalog_with_timeout(source, timeout) {
        PlannerActionResponse::success(
            format!("Loaded {} attraction(s).", planner.catalog().len()),
            planner.selected_id().map(ToString::to_string),
        )
    } else {
        PlannerActionResponse::failure(format!(
            "planner_load_catalog failed: could not read {source}"
        ))
    }
}

fn set_transport_on(planner: &mut TripPlanner, label: &str) -> PlannerActionResponse {
    match TransportMode::from_label(label) {
        Some(mode) => {
            planner.set_pending_transport(mode);
            PlannerActionResponse::success(format!("transport set to {}.", mode.label()), None)
        }
        None => PlannerActionResponse::failure(format!(
            "planner_set_transport failed: unknown transport mode `{}`",
            label.trim()
        )),
    }
}

fn select_on(planner: &mut TripPlanner, raw_id: &str) -> PlannerActionResponse {
    let id = AttractionId::new(raw_id.trim());
    match planner.select(&id) {
        Ok(()) => PlannerActionResponse::success("Selected.", Some(id.to_string())),
        Err(err) => PlannerActionResponse::failure(format!("planner_select failed: {err}")),
    }
}

fn add_to_itinerary_on(planner: &mut TripPlanner, raw_id: Option<&str>) -> PlannerActionResponse {
    let id = match raw_id.map(str::trim) {
        Some(value) if !value.is_empty() => AttractionId::new(value),
        _ => match planner.selected_id() {
            Some(selected) => selected.clone(),
            None => return PlannerActionResponse::failure("itinerary_add failed: no selection"),
        },
    };
    match planner.add_to_itinerary(&id) {
        Ok(outcome) => {
            let name = planner
                .catalog()
                .get(&id)
                .map(|attraction| attraction.name.clone())
                .unwrap_or_default();
            let message = outcome.message(name.as_str());
            PlannerActionResponse {
                ok: outcome == AddOutcome::Added,
                attraction_id: Some(id.to_string()),
                message,
            }
        }
        Err(err) => PlannerActionResponse::failure(format!("itinerary_add failed: {err}")),
    }
}

fn add_attraction_on(planner: &mut TripPlanner, input: NewAttractionInput) -> PlannerActionResponse {
    let Some(category) = Category::from_label(input.category.as_str()) else {
        return PlannerActionResponse::failure(format!(
            "planner_add_attraction failed: unknown category `{}`",
            input.category.trim()
        ));
    };
    let suggested_duration = if input.suggested_duration.trim().is_empty() {
        NewAttractionForm::default().suggested_duration
    } else {
        input.suggested_duration
    };
    let form = NewAttractionForm {
        name: input.name,
        region: input.region,
        district: input.district,
        category,
        description: input.description,
        suggested_duration,
        address: input.address,
        lat: input.lat,
        lng: input.lng,
    };
    match planner.add_manual_attraction(form) {
        Ok(id) => PlannerActionResponse::success("Attraction created.", Some(id.to_string())),
        Err(err) => {
            PlannerActionResponse::failure(format!("planner_add_attraction failed: {err}"))
        }
    }
}

fn export_from(planner: &TripPlanner) -> PlanExportResponse {
    match planner.export_plan() {
        Some(content) => PlanExportResponse {
            ok: true,
            file_name: Some(plan_file_name_today()),
            content: Some(content),
            message: format!("Exported {} stop(s).", planner.itinerary().len()),
        },
        None => PlanExportResponse {
            ok: false,
            file_name: None,
            content: None,
            message: "Itinerary is empty.".to_string(),
        },
    }
}

fn fetch_tip_with(cell: &Mutex<TripPlanner>, service: &TipService) -> TipResponse {
    let started = {
        let mut planner = lock_planner(cell);
        planner.begin_tip_fetch()
    };
    let Some((ticket, attraction)) = started else {
        return TipResponse {
            attraction_id: None,
            text: None,
            stale: false,
        };
    };

    let text = service.tip_for(&attraction);

    let mut planner = lock_planner(cell);
    let stored = planner.complete_tip_fetch(&ticket, text.clone());
    TipResponse {
        attraction_id: Some(ticket.attraction_id().to_string()),
        text: Some(text),
        stale: !stored,
    }
}

fn snapshot_of(planner: &TripPlanner) -> PlannerSnapshot {
    let pending = planner.pending();
    let (tip_status, tip_text) = match planner.tip_state() {
        TipState::Idle => ("idle", None),
        TipState::Loading => ("loading", None),
        TipState::Ready(text) => ("ready", Some(text.clone())),
    };
    PlannerSnapshot {
        loaded: planner.is_loaded(),
        last_updated: planner.catalog().last_updated.clone(),
        total_count: u32::try_from(planner.catalog().len()).unwrap_or(u32::MAX),
        visible: planner.visible().into_iter().map(to_attraction_item).collect(),
        selected_id: planner.selected_id().map(ToString::to_string),
        available_regions: planner.available_regions(),
        available_districts: planner.available_districts(),
        pending_regions: pending.regions.labels(),
        pending_districts: pending.districts.labels(),
        pending_search: pending.search_term.clone(),
        pending_travel_days: pending.travel_days,
        pending_transport: pending.transport_mode.label().to_string(),
        applied_transport: planner.applied().transport_mode.label().to_string(),
        tip_status: tip_status.to_string(),
        tip_text,
    }
}

fn itinerary_of(planner: &TripPlanner) -> ItinerarySnapshot {
    let itinerary = planner.itinerary();
    ItinerarySnapshot {
        items: itinerary.entries().iter().map(to_attraction_item).collect(),
        estimated_travel_minutes: planner.estimated_travel_minutes(),
        transport_mode: planner.applied().transport_mode.label().to_string(),
        route_points: itinerary
            .route_points()
            .into_iter()
            .map(|(lat, lng)| RoutePoint { lat, lng })
            .collect(),
    }
}

fn to_attraction_item(attraction: &Attraction) -> AttractionItem {
    AttractionItem {
        id: attraction.id.to_string(),
        region: attraction.region.clone(),
        district: attraction.district.clone(),
        name: attraction.name.clone(),
        category: attraction.category.label().to_string(),
        description: attraction.description.clone(),
        suggested_duration: attraction.suggested_duration.clone(),
        address: attraction.address.clone(),
        rating: attraction.rating,
        popularity: attraction.popularity,
        lat: attraction.lat,
        lng: attraction.lng,
    }
}
