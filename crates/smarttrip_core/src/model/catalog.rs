//! Attraction catalog snapshot.
//!
//! # Responsibility
//! - Hold the ordered attraction list plus its `lastUpdated` stamp.
//! - Enforce id uniqueness when a raw document is admitted.
//!
//! # Invariants
//! - No two attractions share an `id` once [`Catalog::sanitized`] ran.
//! - Catalog order is the display order; new manual entries go first.

use crate::model::attraction::{Attraction, AttractionId};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

const EPOCH_RFC3339: &str = "1970-01-01T00:00:00Z";

/// Catalog document as served by the static data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// ISO-8601 timestamp string, kept verbatim from the source.
    pub last_updated: String,
    pub attractions: Vec<Attraction>,
}

impl Catalog {
    pub fn new(last_updated: impl Into<String>, attractions: Vec<Attraction>) -> Self {
        Self {
            last_updated: last_updated.into(),
            attractions,
        }
    }

    /// Empty catalog stamped with the current UTC time.
    pub fn empty_now() -> Self {
        Self::new(now_rfc3339(), Vec::new())
    }

    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    pub fn contains_id(&self, id: &AttractionId) -> bool {
        self.attractions.iter().any(|attraction| &attraction.id == id)
    }

    pub fn get(&self, id: &AttractionId) -> Option<&Attraction> {
        self.attractions.iter().find(|attraction| &attraction.id == id)
    }

    /// Parses `last_updated` when it is RFC 3339.
    pub fn last_updated_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(self.last_updated.trim(), &Rfc3339).ok()
    }

    /// Returns a new catalog with `attraction` as the first element.
    pub fn with_prepended(&self, attraction: Attraction) -> Self {
        let mut attractions = Vec::with_capacity(self.attractions.len() + 1);
        attractions.push(attraction);
        attractions.extend(self.attractions.iter().cloned());
        Self {
            last_updated: self.last_updated.clone(),
            attractions,
        }
    }

    /// Drops invalid and duplicate-id entries, keeping the first occurrence.
    ///
    /// Returns the cleaned catalog and the number of skipped entries.
    pub fn sanitized(self) -> (Self, usize) {
        let mut seen = HashSet::with_capacity(self.attractions.len());
        let mut skipped = 0usize;
        let mut attractions = Vec::with_capacity(self.attractions.len());

        for attraction in self.attractions {
            if let Err(err) = attraction.validate() {
                warn!(
                    "event=catalog_entry_skipped module=catalog status=error id={} reason={}",
                    attraction.id, err
                );
                skipped += 1;
                continue;
            }
            if !seen.insert(attraction.id.clone()) {
                warn!(
                    "event=catalog_entry_skipped module=catalog status=error id={} reason=duplicate_id",
                    attraction.id
                );
                skipped += 1;
                continue;
            }
            attractions.push(attraction);
        }

        (
            Self {
                last_updated: self.last_updated,
                attractions,
            },
            skipped,
        )
    }
}

/// Current UTC time in RFC 3339, as used for synthesized catalog stamps.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| EPOCH_RFC3339.to_string())
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::model::attraction::fixtures::attraction;
    use crate::model::attraction::AttractionId;

    #[test]
    fn empty_now_has_parseable_timestamp() {
        let catalog = Catalog::empty_now();
        assert!(catalog.is_empty());
        assert!(catalog.last_updated_at().is_some());
    }

    #[test]
    fn sanitized_keeps_first_duplicate_and_skips_invalid() {
        let mut invalid = attraction("3", "台北", "大安");
        invalid.popularity = 200.0;
        let mut duplicate = attraction("1", "台中", "西區");
        duplicate.name = "later copy".to_string();

        let raw = Catalog::new(
            "2024-05-01T00:00:00Z",
            vec![attraction("1", "台北", "信義"), duplicate, invalid],
        );
        let (clean, skipped) = raw.sanitized();

        assert_eq!(skipped, 2);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean.attractions[0].region, "台北");
    }

    #[test]
    fn with_prepended_puts_new_entry_first() {
        let catalog = Catalog::new("2024-05-01T00:00:00Z", vec![attraction("1", "台北", "信義")]);
        let next = catalog.with_prepended(attraction("2", "台中", "西區"));

        assert_eq!(next.len(), 2);
        assert_eq!(next.attractions[0].id, AttractionId::new("2"));
        assert_eq!(next.last_updated, catalog.last_updated);
        assert_eq!(catalog.len(), 1);
    }
}
