use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Place categories queried around the start point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    Park,
    PointOfInterest,
    NaturalFeature,
}

impl FeatureCategory {
    /// Discovery order: parks first, they make the best circuit anchors
    pub fn all() -> [FeatureCategory; 3] {
        [
            FeatureCategory::Park,
            FeatureCategory::PointOfInterest,
            FeatureCategory::NaturalFeature,
        ]
    }

    /// Google Places `type` filter for this category
    pub fn places_type(&self) -> &'static str {
        match self {
            FeatureCategory::Park => "park",
            FeatureCategory::PointOfInterest => "tourist_attraction",
            FeatureCategory::NaturalFeature => "natural_feature",
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureCategory::Park => write!(f, "park"),
            FeatureCategory::PointOfInterest => write!(f, "point_of_interest"),
            FeatureCategory::NaturalFeature => write!(f, "natural_feature"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyFeature {
    pub name: String,
    pub coordinates: Coordinates,
    pub category: FeatureCategory,
}

impl NearbyFeature {
    pub fn new(name: String, coordinates: Coordinates, category: FeatureCategory) -> Self {
        NearbyFeature {
            name,
            coordinates,
            category,
        }
    }
}
