pub mod coordinates;
pub mod feature;
pub mod route;

pub use coordinates::Coordinates;
pub use feature::{FeatureCategory, NearbyFeature};
pub use route::{
    ActivityType, CandidateRoute, CircuitQuality, Difficulty, DirectionsRoute, ElevationStats,
    EnhancedRoute, TurnInstruction,
};
