//! Deduplicated, insertion-ordered itinerary.
//!
//! # Invariants
//! - No two entries share an `AttractionId`.
//! - Entries keep insertion order; there is no capacity limit.

use crate::model::attraction::{Attraction, AttractionId};

/// Result of [`Itinerary::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An entry with the same id exists; the itinerary is unchanged.
    AlreadyPresent,
}

impl AddOutcome {
    /// User-facing notification text for this outcome.
    pub fn message(self, attraction_name: &str) -> String {
        match self {
            Self::Added => format!("已將 {attraction_name} 加入您的行程！"),
            Self::AlreadyPresent => "此景點已在您的行程中。".to_string(),
        }
    }
}

/// The user's working list of attractions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    entries: Vec<Attraction>,
}

impl Itinerary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Attraction] {
        self.entries.as_slice()
    }

    pub fn contains(&self, id: &AttractionId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    /// Appends `attraction` unless its id is already present.
    pub fn add(&mut self, attraction: Attraction) -> AddOutcome {
        if self.contains(&attraction.id) {
            return AddOutcome::AlreadyPresent;
        }
        self.entries.push(attraction);
        AddOutcome::Added
    }

    /// Removes the entry with `id`; absent ids are a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &AttractionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        self.entries.len() != before
    }

    /// Ordered `(lat, lng)` of stops that carry coordinates.
    pub fn route_points(&self) -> Vec<(f64, f64)> {
        self.entries
            .iter()
            .filter_map(Attraction::coordinates)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AddOutcome, Itinerary};
    use crate::model::attraction::fixtures::attraction;
    use crate::model::attraction::AttractionId;

    #[test]
    fn add_is_idempotent_on_id() {
        let mut itinerary = Itinerary::new();
        let spot = attraction("1", "台北", "信義");

        assert_eq!(itinerary.add(spot.clone()), AddOutcome::Added);
        assert_eq!(itinerary.add(spot), AddOutcome::AlreadyPresent);
        assert_eq!(itinerary.len(), 1);
    }

    #[test]
    fn add_detects_duplicates_by_id_not_content() {
        let mut itinerary = Itinerary::new();
        let mut renamed = attraction("1", "台北", "信義");
        itinerary.add(renamed.clone());
        renamed.name = "renamed".to_string();

        assert_eq!(itinerary.add(renamed), AddOutcome::AlreadyPresent);
        assert_eq!(itinerary.entries()[0].name, "spot 1");
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut itinerary = Itinerary::new();
        for id in ["3", "1", "2"] {
            itinerary.add(attraction(id, "台北", "信義"));
        }
        let order: Vec<&str> = itinerary.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ["3", "1", "2"]);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut itinerary = Itinerary::new();
        itinerary.add(attraction("1", "台北", "信義"));
        let before = itinerary.clone();

        assert!(!itinerary.remove(&AttractionId::new("42")));
        assert_eq!(itinerary, before);

        assert!(itinerary.remove(&AttractionId::new("1")));
        assert!(itinerary.is_empty());
    }

    #[test]
    fn route_points_skip_entries_without_coordinates() {
        let mut itinerary = Itinerary::new();
        let mut located = attraction("1", "台北", "信義");
        located.lat = Some(25.033);
        located.lng = Some(121.565);
        itinerary.add(attraction("2", "台中", "西區"));
        itinerary.add(located);

        assert_eq!(itinerary.route_points(), vec![(25.033, 121.565)]);
    }

    #[test]
    fn outcome_messages_name_the_attraction() {
        assert!(AddOutcome::Added.message("台北101").contains("台北101"));
        assert_eq!(
            AddOutcome::AlreadyPresent.message("台北101"),
            "此景點已在您的行程中。"
        );
    }
}
