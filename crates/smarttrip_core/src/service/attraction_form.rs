//! Manual attraction creation input.
//!
//! # Invariants
//! - Every text field is mandatory after trimming; nothing else is checked.
//! - Created attractions get rating 5.0, popularity 50 and placeholder
//!   coordinates unless both coordinates were supplied.

use crate::model::attraction::{Attraction, AttractionId, Category};
use crate::model::catalog::Catalog;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const MANUAL_RATING: f64 = 5.0;
pub const MANUAL_POPULARITY: f64 = 50.0;
/// Placeholder map position for entries created without coordinates.
pub const PLACEHOLDER_COORDINATES: (f64, f64) = (25.033, 121.565);
pub const DEFAULT_SUGGESTED_DURATION: &str = "1-2 小時";

/// Form input for a user-created attraction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttractionForm {
    pub name: String,
    pub region: String,
    pub district: String,
    pub category: Category,
    pub description: String,
    pub suggested_duration: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Default for NewAttractionForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            region: String::new(),
            district: String::new(),
            category: Category::Scenic,
            description: String::new(),
            suggested_duration: DEFAULT_SUGGESTED_DURATION.to_string(),
            address: String::new(),
            lat: None,
            lng: None,
        }
    }
}

/// Form submission failures.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// A mandatory field is blank; carries the field name.
    MissingField(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "field `{field}` is required"),
        }
    }
}

impl Error for FormError {}

impl NewAttractionForm {
    /// Checks that every mandatory field is filled.
    pub fn validate(&self) -> Result<(), FormError> {
        let fields = [
            ("name", self.name.as_str()),
            ("region", self.region.as_str()),
            ("district", self.district.as_str()),
            ("description", self.description.as_str()),
            ("suggested_duration", self.suggested_duration.as_str()),
            ("address", self.address.as_str()),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(FormError::MissingField(*field)),
            None => Ok(()),
        }
    }

    /// Builds the attraction record with the given id.
    ///
    /// Supplied coordinates are taken as entered, without range checks.
    pub fn into_attraction(self, id: AttractionId) -> Result<Attraction, FormError> {
        self.validate()?;
        let (lat, lng) = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => PLACEHOLDER_COORDINATES,
        };
        Ok(Attraction {
            id,
            region: self.region.trim().to_string(),
            district: self.district.trim().to_string(),
            name: self.name.trim().to_string(),
            category: self.category,
            description: self.description.trim().to_string(),
            suggested_duration: self.suggested_duration.trim().to_string(),
            address: self.address.trim().to_string(),
            rating: MANUAL_RATING,
            popularity: MANUAL_POPULARITY,
            lat: Some(lat),
            lng: Some(lng),
        })
    }
}

/// Generates a time-ordered id that is not yet used in `catalog`.
pub fn generate_attraction_id(catalog: &Catalog) -> AttractionId {
    loop {
        let candidate = AttractionId::new(Uuid::now_v7().to_string());
        if !catalog.contains_id(&candidate) {
            return candidate;
        }
    }
}
