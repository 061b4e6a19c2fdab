//! Attraction domain model.
//!
//! # Responsibility
//! - Define the canonical point-of-interest record shared by catalog, filter
//!   and itinerary projections.
//! - Keep the wire shape aligned with the static JSON catalog.
//!
//! # Invariants
//! - `id` is stable and never reused for another attraction.
//! - `popularity` is a percentage in `0..=100`.
//! - Coordinates are either both present or both absent.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of one attraction.
///
/// Catalog ids are opaque strings (`"1"`, `"tp-101"`, UUIDs for manual
/// entries), so the newtype only guarantees intent, not a format. Integer
/// ids in catalog documents are read as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AttractionId(String);

impl<'de> Deserialize<'de> for AttractionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self(value),
            RawId::Unsigned(value) => Self(value.to_string()),
            RawId::Signed(value) => Self(value.to_string()),
        })
    }
}

impl AttractionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for AttractionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for AttractionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AttractionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fixed attraction category set.
///
/// Serialized with the catalog's display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "餐廳")]
    Restaurant,
    #[serde(rename = "特色小吃")]
    StreetFood,
    #[serde(rename = "風景")]
    Scenic,
    #[serde(rename = "約會")]
    Dating,
    #[serde(rename = "有趣")]
    Fun,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Restaurant,
        Self::StreetFood,
        Self::Scenic,
        Self::Dating,
        Self::Fun,
    ];

    /// User-facing label, identical to the wire value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Restaurant => "餐廳",
            Self::StreetFood => "特色小吃",
            Self::Scenic => "風景",
            Self::Dating => "約會",
            Self::Fun => "有趣",
        }
    }

    /// Parses a display label back into a category.
    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|category| category.label() == trimmed)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical attraction record as loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: AttractionId,
    pub region: String,
    pub district: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub suggested_duration: String,
    pub address: String,
    pub rating: f64,
    /// Percentage in `0..=100`; fractional values are allowed.
    pub popularity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Validation failures for attraction records.
#[derive(Debug, Clone, PartialEq)]
pub enum AttractionValidationError {
    BlankId,
    PopularityOutOfRange(f64),
    /// Only one of `lat`/`lng` is present.
    PartialCoordinates,
    CoordinatesOutOfRange { lat: f64, lng: f64 },
}

impl Display for AttractionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "attraction id must not be blank"),
            Self::PopularityOutOfRange(value) => {
                write!(f, "popularity must be within 0..=100, got {value}")
            }
            Self::PartialCoordinates => write!(f, "lat and lng must be provided together"),
            Self::CoordinatesOutOfRange { lat, lng } => {
                write!(f, "coordinates out of range: lat={lat} lng={lng}")
            }
        }
    }
}

impl Error for AttractionValidationError {}

impl Attraction {
    /// Returns `(lat, lng)` when both coordinates are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Checks record-level invariants.
    ///
    /// Free-text fields are not validated; catalogs may carry empty
    /// descriptions or durations.
    pub fn validate(&self) -> Result<(), AttractionValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(AttractionValidationError::BlankId);
        }
        if !(0.0..=100.0).contains(&self.popularity) {
            return Err(AttractionValidationError::PopularityOutOfRange(
                self.popularity,
            ));
        }
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                    return Err(AttractionValidationError::CoordinatesOutOfRange { lat, lng });
                }
            }
            (None, None) => {}
            _ => return Err(AttractionValidationError::PartialCoordinates),
        }
        Ok(())
    }
}
