pub mod circuit_designer;
pub mod directions;
pub mod elevation;
pub mod google;
pub mod places;
pub mod polyline;
pub mod route_generator;
