//! Visible-set computation and facet derivation.
//!
//! # Responsibility
//! - Compute the attractions that pass the applied criteria.
//! - Derive region/district chip options from the catalog.
//!
//! # Invariants
//! - Results preserve catalog order; filtering never sorts or ranks.
//! - Facet options are distinct and in first-seen order.

use crate::filter::criteria::{FacetSelection, FilterCriteria};
use crate::model::attraction::Attraction;
use std::collections::HashSet;

/// Returns whether one attraction passes all three filter clauses.
pub fn matches(attraction: &Attraction, criteria: &FilterCriteria) -> bool {
    matches_search(attraction, criteria.search_term.as_str())
        && criteria.regions.allows(attraction.region.as_str())
        && criteria.districts.allows(attraction.district.as_str())
}

/// Filters the catalog with the applied criteria.
pub fn filter_attractions<'a>(
    attractions: &'a [Attraction],
    criteria: &FilterCriteria,
) -> Vec<&'a Attraction> {
    attractions
        .iter()
        .filter(|attraction| matches(attraction, criteria))
        .collect()
}

/// Distinct regions across the whole catalog.
pub fn available_regions(attractions: &[Attraction]) -> Vec<String> {
    distinct(attractions.iter().map(|attraction| attraction.region.as_str()))
}

/// Distinct districts inside the pending region selection.
///
/// Reads the pending selection so the district panel narrows before commit.
pub fn available_districts(
    attractions: &[Attraction],
    pending_regions: &FacetSelection,
) -> Vec<String> {
    distinct(
        attractions
            .iter()
            .filter(|attraction| pending_regions.allows(attraction.region.as_str()))
            .map(|attraction| attraction.district.as_str()),
    )
}

fn matches_search(attraction: &Attraction, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    [
        attraction.name.as_str(),
        attraction.category.label(),
        attraction.description.as_str(),
    ]
    .iter()
    .any(|haystack| haystack.to_lowercase().contains(needle.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
