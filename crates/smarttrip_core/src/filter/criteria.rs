//! Filter criteria and facet toggle reducers.
//!
//! # Responsibility
//! - Model region/district selections as `All | Specific(values)`.
//! - Provide pure toggle reducers used by the pending filter panel.
//!
//! # Invariants
//! - `FacetSelection::Specific` is never empty and never holds duplicates.
//! - Toggling a region always resets the district selection to `All`.
//! - `travel_days` is at least 1.

use crate::model::transport::TransportMode;

/// UI label of the "no restriction" facet chip.
pub const ALL_FACET_LABEL: &str = "全部";

/// Selection state of one facet dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FacetSelection {
    /// No restriction on this facet.
    #[default]
    All,
    /// Only the listed values, in selection order.
    Specific(Vec<String>),
}

/// One chip press on a facet panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetToggle {
    All,
    Value(String),
}

impl FacetToggle {
    /// Maps a chip label to a toggle; only `全部` selects `All`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed == ALL_FACET_LABEL {
            Self::All
        } else {
            Self::Value(trimmed.to_string())
        }
    }
}

impl FacetSelection {
    /// Builds a selection from raw values; no values means `All`.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        if unique.is_empty() {
            Self::All
        } else {
            Self::Specific(unique)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Selected concrete values; empty for `All`.
    pub fn values(&self) -> &[String] {
        match self {
            Self::All => &[],
            Self::Specific(values) => values.as_slice(),
        }
    }

    /// Returns whether an attraction facet value passes this selection.
    pub fn allows(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Specific(values) => values.iter().any(|selected| selected == value),
        }
    }

    /// Applies one toggle and returns the next selection.
    ///
    /// Removing the last concrete value falls back to `All`.
    pub fn toggled(&self, toggle: &FacetToggle) -> Self {
        let FacetToggle::Value(value) = toggle else {
            return Self::All;
        };

        let mut next = self.values().to_vec();
        if let Some(position) = next.iter().position(|selected| selected == value) {
            next.remove(position);
        } else {
            next.push(value.clone());
        }
        Self::from_values(next)
    }

    /// Chip labels for display, `全部` for `All`.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::All => vec![ALL_FACET_LABEL.to_string()],
            Self::Specific(values) => values.clone(),
        }
    }
}

/// Full filter state; used both as pending edits and as the applied snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring target; empty matches everything.
    pub search_term: String,
    pub regions: FacetSelection,
    pub districts: FacetSelection,
    /// Carried for the UI; not consulted by filtering.
    pub travel_days: u32,
    pub transport_mode: TransportMode,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            regions: FacetSelection::All,
            districts: FacetSelection::All,
            travel_days: 1,
            transport_mode: TransportMode::default(),
        }
    }
}

impl FilterCriteria {
    /// Clears search and facets, keeping travel days and transport mode.
    pub fn unrestricted(&self) -> Self {
        Self {
            search_term: String::new(),
            regions: FacetSelection::All,
            districts: FacetSelection::All,
            travel_days: self.travel_days,
            transport_mode: self.transport_mode,
        }
    }
}

/// Toggles one region chip; district selection always resets to `All`.
pub fn toggle_region(criteria: &FilterCriteria, toggle: &FacetToggle) -> FilterCriteria {
    FilterCriteria {
        regions: criteria.regions.toggled(toggle),
        districts: FacetSelection::All,
        ..criteria.clone()
    }
}

/// Toggles one district chip; regions are left untouched.
pub fn toggle_district(criteria: &FilterCriteria, toggle: &FacetToggle) -> FilterCriteria {
    FilterCriteria {
        districts: criteria.districts.toggled(toggle),
        ..criteria.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        toggle_district, toggle_region, FacetSelection, FacetToggle, FilterCriteria,
    };

    fn value(label: &str) -> FacetToggle {
        FacetToggle::Value(label.to_string())
    }

    #[test]
    fn from_label_recognizes_only_all_chip_label() {
        assert_eq!(FacetToggle::from_label(" 全部 "), FacetToggle::All);
        assert_eq!(FacetToggle::from_label("台北"), value("台北"));
        assert_eq!(FacetToggle::from_label("All"), value("All"));
    }

    #[test]
    fn region_named_all_is_selectable() {
        let criteria = toggle_region(&FilterCriteria::default(), &FacetToggle::from_label("all"));
        assert_eq!(criteria.regions, FacetSelection::Specific(vec!["all".to_string()]));
    }

    #[test]
    fn selecting_concrete_value_drops_all() {
        let next = FacetSelection::All.toggled(&value("台北"));
        assert_eq!(next, FacetSelection::Specific(vec!["台北".to_string()]));
    }

    #[test]
    fn removing_last_value_falls_back_to_all() {
        let selected = FacetSelection::from_values(["台北"]);
        assert_eq!(selected.toggled(&value("台北")), FacetSelection::All);
    }

    #[test]
    fn toggling_keeps_selection_order() {
        let next = FacetSelection::from_values(["台北", "台中"]).toggled(&value("高雄"));
        assert_eq!(next.values(), ["台北", "台中", "高雄"]);
        let next = next.toggled(&value("台中"));
        assert_eq!(next.values(), ["台北", "高雄"]);
    }

    #[test]
    fn from_values_dedupes_and_maps_empty_to_all() {
        assert_eq!(FacetSelection::from_values(Vec::<String>::new()), FacetSelection::All);
        assert_eq!(
            FacetSelection::from_values(["a", "a", "b"]).values(),
            ["a", "b"]
        );
    }

    #[test]
    fn region_toggle_resets_districts_for_every_kind_of_press() {
        let criteria = FilterCriteria {
            regions: FacetSelection::from_values(["台北"]),
            districts: FacetSelection::from_values(["信義"]),
            ..FilterCriteria::default()
        };

        for toggle in [FacetToggle::All, value("台北"), value("台中")] {
            let next = toggle_region(&criteria, &toggle);
            assert_eq!(next.districts, FacetSelection::All, "toggle {toggle:?}");
        }
    }

    #[test]
    fn region_then_all_resets_both_facets() {
        let criteria = toggle_region(&FilterCriteria::default(), &value("台北"));
        assert_eq!(criteria.regions.values(), ["台北"]);

        let criteria = toggle_district(&criteria, &value("信義"));
        let criteria = toggle_region(&criteria, &FacetToggle::All);

        assert_eq!(criteria.regions, FacetSelection::All);
        assert_eq!(criteria.districts, FacetSelection::All);
    }

    #[test]
    fn district_toggle_leaves_regions_untouched() {
        let criteria = toggle_region(&FilterCriteria::default(), &value("台北"));
        let next = toggle_district(&criteria, &value("信義"));
        assert_eq!(next.regions, criteria.regions);
        assert_eq!(next.districts.values(), ["信義"]);

        let next = toggle_district(&next, &value("信義"));
        assert_eq!(next.districts, FacetSelection::All);
    }

    #[test]
    fn unrestricted_keeps_trip_settings() {
        let criteria = FilterCriteria {
            search_term: "夜市".to_string(),
            regions: FacetSelection::from_values(["台北"]),
            travel_days: 3,
            ..FilterCriteria::default()
        };
        let reset = criteria.unrestricted();
        assert!(reset.search_term.is_empty());
        assert!(reset.regions.is_all());
        assert_eq!(reset.travel_days, 3);
    }
}
