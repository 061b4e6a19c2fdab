//! Transport mode used by itinerary estimates.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How the traveller moves between itinerary stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportMode {
    #[default]
    #[serde(rename = "汽車")]
    Car,
    #[serde(rename = "機車")]
    Scooter,
    #[serde(rename = "腳踏車")]
    Bicycle,
    #[serde(rename = "走路")]
    Walking,
}

impl TransportMode {
    pub const ALL: [Self; 4] = [Self::Car, Self::Scooter, Self::Bicycle, Self::Walking];

    pub fn label(self) -> &'static str {
        match self {
            Self::Car => "汽車",
            Self::Scooter => "機車",
            Self::Bicycle => "腳踏車",
            Self::Walking => "走路",
        }
    }

    /// Parses a display label back into a mode.
    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|mode| mode.label() == trimmed)
    }

    /// Average speed used for travel time estimates, in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            Self::Car => 40.0,
            Self::Scooter => 35.0,
            Self::Bicycle => 15.0,
            Self::Walking => 5.0,
        }
    }
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
