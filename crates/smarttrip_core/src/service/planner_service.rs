//! Trip planner root controller.
//!
//! # Responsibility
//! - Own all planner state: catalog, pending/applied criteria, selection,
//!   itinerary and the current tip slot.
//! - Expose reducer-style transitions for every UI action.
//!
//! # Invariants
//! - Applied criteria change only through `apply_filters` or the reset that
//!   follows a manual attraction addition.
//! - Selection is reconciled after every commit and catalog mutation.
//! - A tip result is accepted only for the ticket issued for the current
//!   selection; late results for older selections are discarded.

use crate::catalog::{load_catalog_with_timeout, CatalogSource, DEFAULT_CATALOG_TIMEOUT};
use crate::filter::criteria::{toggle_district, toggle_region, FacetToggle, FilterCriteria};
use crate::filter::engine::{available_districts, available_regions, filter_attractions};
use crate::filter::selection::reconcile_selection;
use crate::itinerary::plan::{estimated_travel_minutes, render_plan_text};
use crate::itinerary::set::{AddOutcome, Itinerary};
use crate::model::attraction::{Attraction, AttractionId};
use crate::model::catalog::Catalog;
use crate::model::transport::TransportMode;
use crate::service::attraction_form::{generate_attraction_id, FormError, NewAttractionForm};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Result type for planner transitions.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Planner transition failures.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// Target attraction is not in the current visible set.
    NotVisible(AttractionId),
    /// Target attraction is not in the catalog.
    UnknownAttraction(AttractionId),
    /// Operation needs a selected attraction.
    NoSelection,
    /// Travel days must be at least 1.
    InvalidTravelDays(u32),
    Form(FormError),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotVisible(id) => write!(f, "attraction is not visible: {id}"),
            Self::UnknownAttraction(id) => write!(f, "attraction not found: {id}"),
            Self::NoSelection => write!(f, "no attraction is selected"),
            Self::InvalidTravelDays(days) => {
                write!(f, "travel days must be at least 1, got {days}")
            }
            Self::Form(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormError> for PlannerError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

/// Identity of one issued tip fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipTicket {
    seq: u64,
    attraction_id: AttractionId,
}

impl TipTicket {
    pub fn attraction_id(&self) -> &AttractionId {
        &self.attraction_id
    }
}

/// Tip display state for the selected attraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TipState {
    #[default]
    Idle,
    Loading,
    Ready(String),
}

/// Root controller for one planner session.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    catalog: Catalog,
    loaded: bool,
    pending: FilterCriteria,
    applied: FilterCriteria,
    selected: Option<AttractionId>,
    itinerary: Itinerary,
    tip_ticket: Option<TipTicket>,
    tip_state: TipState,
    next_tip_seq: u64,
}

impl Default for TripPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TripPlanner {
    /// Creates a planner with no catalog loaded yet.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::empty_now(),
            loaded: false,
            pending: FilterCriteria::default(),
            applied: FilterCriteria::default(),
            selected: None,
            itinerary: Itinerary::new(),
            tip_ticket: None,
            tip_state: TipState::Idle,
            next_tip_seq: 0,
        }
    }

    /// Creates a planner over an already loaded catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        let mut planner = Self::new();
        planner.replace_catalog(catalog);
        planner
    }

    /// Whether a catalog (possibly the empty fallback) has been installed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pending(&self) -> &FilterCriteria {
        &self.pending
    }

    pub fn applied(&self) -> &FilterCriteria {
        &self.applied
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn selected_id(&self) -> Option<&AttractionId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Attraction> {
        self.selected.as_ref().and_then(|id| self.catalog.get(id))
    }

    pub fn tip_state(&self) -> &TipState {
        &self.tip_state
    }

    /// Installs a new catalog wholesale and reconciles selection.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        info!(
            "event=catalog_replace module=planner status=ok attractions={}",
            catalog.len()
        );
        self.catalog = catalog;
        self.loaded = true;
        self.reconcile();
    }

    /// Loads the catalog from `source`, installing an empty catalog on
    /// failure.
    ///
    /// Returns whether the source was read successfully.
    pub fn load_catalog(&mut self, source: &CatalogSource) -> bool {
        self.load_catalog_with_timeout(source, DEFAULT_CATALOG_TIMEOUT)
    }

    /// Same as [`TripPlanner::load_catalog`] with an explicit HTTP timeout.
    pub fn load_catalog_with_timeout(
        &mut self,
        source: &CatalogSource,
        timeout: Duration,
    ) -> bool {
        match load_catalog_with_timeout(source, timeout) {
            Ok(catalog) => {
                self.replace_catalog(catalog);
                true
            }
            Err(err) => {
                warn!(
                    "event=catalog_fallback module=planner status=error source={} error={}",
                    source, err
                );
                self.replace_catalog(Catalog::empty_now());
                false
            }
        }
    }

    /// Attractions passing the applied criteria, in catalog order.
    pub fn visible(&self) -> Vec<&Attraction> {
        filter_attractions(&self.catalog.attractions, &self.applied)
    }

    pub fn available_regions(&self) -> Vec<String> {
        available_regions(&self.catalog.attractions)
    }

    /// District chips for the pending region selection.
    pub fn available_districts(&self) -> Vec<String> {
        available_districts(&self.catalog.attractions, &self.pending.regions)
    }

    pub fn set_pending_search(&mut self, search_term: impl Into<String>) {
        self.pending.search_term = search_term.into();
    }

    pub fn set_pending_travel_days(&mut self, travel_days: u32) -> PlannerResult<()> {
        if travel_days == 0 {
            return Err(PlannerError::InvalidTravelDays(travel_days));
        }
        self.pending.travel_days = travel_days;
        Ok(())
    }

    pub fn set_pending_transport(&mut self, transport_mode: TransportMode) {
        self.pending.transport_mode = transport_mode;
    }

    pub fn toggle_region(&mut self, toggle: &FacetToggle) {
        self.pending = toggle_region(&self.pending, toggle);
        debug!(
            "event=facet_toggle module=planner facet=region selected={}",
            self.pending.regions.values().len()
        );
    }

    pub fn toggle_district(&mut self, toggle: &FacetToggle) {
        self.pending = toggle_district(&self.pending, toggle);
        debug!(
            "event=facet_toggle module=planner facet=district selected={}",
            self.pending.districts.values().len()
        );
    }

    /// Commits pending criteria and reconciles selection.
    ///
    /// Returns the number of visible attractions after the commit.
    pub fn apply_filters(&mut self) -> usize {
        self.applied = self.pending.clone();
        self.reconcile();
        let visible = self.visible().len();
        info!(
            "event=filters_apply module=planner status=ok visible={} total={}",
            visible,
            self.catalog.len()
        );
        visible
    }

    /// Selects one visible attraction.
    pub fn select(&mut self, id: &AttractionId) -> PlannerResult<()> {
        if !self.visible().iter().any(|attraction| &attraction.id == id) {
            return Err(PlannerError::NotVisible(id.clone()));
        }
        self.set_selected(Some(id.clone()));
        Ok(())
    }

    /// Adds a catalog attraction to the itinerary.
    pub fn add_to_itinerary(&mut self, id: &AttractionId) -> PlannerResult<AddOutcome> {
        let attraction = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| PlannerError::UnknownAttraction(id.clone()))?;
        let outcome = self.itinerary.add(attraction);
        info!(
            "event=itinerary_add module=planner status=ok outcome={:?} size={}",
            outcome,
            self.itinerary.len()
        );
        Ok(outcome)
    }

    /// Adds the selected attraction to the itinerary.
    pub fn add_selected_to_itinerary(&mut self) -> PlannerResult<AddOutcome> {
        let id = self.selected.clone().ok_or(PlannerError::NoSelection)?;
        self.add_to_itinerary(&id)
    }

    /// Removes an itinerary entry; absent ids are a no-op.
    pub fn remove_from_itinerary(&mut self, id: &AttractionId) -> bool {
        let removed = self.itinerary.remove(id);
        info!(
            "event=itinerary_remove module=planner status=ok removed={} size={}",
            removed,
            self.itinerary.len()
        );
        removed
    }

    /// Travel estimate for the itinerary using the applied transport mode.
    pub fn estimated_travel_minutes(&self) -> u32 {
        estimated_travel_minutes(self.itinerary.len(), self.applied.transport_mode)
    }

    /// Plain-text plan export; `None` when the itinerary is empty.
    pub fn export_plan(&self) -> Option<String> {
        render_plan_text(&self.itinerary, self.applied.transport_mode)
    }

    /// Creates a user attraction, prepends it and makes it visible and
    /// selected.
    ///
    /// Search and facets are reset to unrestricted in both pending and
    /// applied criteria; travel days and transport mode are kept.
    pub fn add_manual_attraction(
        &mut self,
        form: NewAttractionForm,
    ) -> PlannerResult<AttractionId> {
        let id = generate_attraction_id(&self.catalog);
        let attraction = form.into_attraction(id.clone())?;

        self.catalog = self.catalog.with_prepended(attraction);
        self.loaded = true;
        self.applied = self.applied.unrestricted();
        self.pending = self.pending.unrestricted();
        self.set_selected(Some(id.clone()));
        info!(
            "event=attraction_create module=planner status=ok id={} total={}",
            id,
            self.catalog.len()
        );
        Ok(id)
    }

    /// Starts a tip fetch for the current selection.
    ///
    /// Returns the ticket plus a snapshot of the attraction to describe, or
    /// `None` when nothing is selected.
    pub fn begin_tip_fetch(&mut self) -> Option<(TipTicket, Attraction)> {
        let attraction = self.selected()?.clone();
        self.next_tip_seq += 1;
        let ticket = TipTicket {
            seq: self.next_tip_seq,
            attraction_id: attraction.id.clone(),
        };
        self.tip_ticket = Some(ticket.clone());
        self.tip_state = TipState::Loading;
        Some((ticket, attraction))
    }

    /// Stores a tip result if `ticket` is still current.
    ///
    /// Returns `false` when the result is stale and was discarded.
    pub fn complete_tip_fetch(&mut self, ticket: &TipTicket, text: impl Into<String>) -> bool {
        if self.tip_ticket.as_ref() != Some(ticket)
            || self.selected.as_ref() != Some(&ticket.attraction_id)
        {
            debug!(
                "event=tip_discard module=planner status=stale attraction_id={}",
                ticket.attraction_id
            );
            return false;
        }
        self.tip_state = TipState::Ready(text.into());
        true
    }

    fn reconcile(&mut self) {
        let next = reconcile_selection(self.selected.as_ref(), &self.visible());
        self.set_selected(next);
    }

    fn set_selected(&mut self, next: Option<AttractionId>) {
        if self.selected == next {
            return;
        }
        self.selected = next;
        self.tip_ticket = None;
        self.tip_state = TipState::Idle;
    }
}
