// Shared by several test binaries; not every binary uses every fake
#![allow(dead_code)]

use async_trait::async_trait;
use runcircuit::config::RouteGeneratorConfig;
use runcircuit::models::{
    CandidateRoute, Coordinates, DirectionsRoute, FeatureCategory, NearbyFeature, TurnInstruction,
};
use runcircuit::services::circuit_designer::{CircuitDesigner, DesignBrief};
use runcircuit::services::directions::DirectionsProvider;
use runcircuit::services::elevation::ElevationProvider;
use runcircuit::services::places::PlacesProvider;
use runcircuit::services::polyline;
use runcircuit::services::route_generator::geometry::{path_length_km, project_ring};
use runcircuit::services::route_generator::RouteGenerator;
use runcircuit::{AppError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Central London
pub fn london() -> Coordinates {
    Coordinates::new(51.5074, -0.1278).unwrap()
}

/// Elevation gains handed out to successive routes: five easy, three
/// moderate, two hard
pub const MIXED_GAINS: [f64; 10] = [10.0, 20.0, 100.0, 110.0, 200.0, 30.0, 90.0, 210.0, 5.0, 15.0];

/// Places provider returning `per_category` features on a ring around the query point
pub struct FakePlaces {
    pub per_category: usize,
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn nearby(
        &self,
        location: &Coordinates,
        radius_meters: f64,
        category: FeatureCategory,
    ) -> Result<Vec<NearbyFeature>> {
        let bearings: Vec<f64> = (0..self.per_category)
            .map(|i| i as f64 * 360.0 / self.per_category as f64)
            .collect();
        Ok(project_ring(location, radius_meters / 2000.0, &bearings)
            .into_iter()
            .enumerate()
            .map(|(i, coordinates)| {
                NearbyFeature::new(format!("{} {}", category, i), coordinates, category)
            })
            .collect())
    }
}

/// Places provider that always fails
pub struct FailingPlaces;

#[async_trait]
impl PlacesProvider for FailingPlaces {
    async fn nearby(
        &self,
        _location: &Coordinates,
        _radius_meters: f64,
        _category: FeatureCategory,
    ) -> Result<Vec<NearbyFeature>> {
        Err(AppError::Places("status OVER_QUERY_LIMIT: quota".to_string()))
    }
}

/// Designer returning `count` square circuits of slowly growing size, and
/// recording how many features it was given
pub struct FakeDesigner {
    pub count: usize,
    pub base_radius_km: f64,
    pub seen_features: Mutex<Option<usize>>,
}

impl FakeDesigner {
    /// Squares sized for a ~5km circuit
    pub fn new(count: usize) -> Self {
        Self::with_radius(count, 0.8)
    }

    pub fn with_radius(count: usize, base_radius_km: f64) -> Self {
        FakeDesigner {
            count,
            base_radius_km,
            seen_features: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CircuitDesigner for FakeDesigner {
    async fn design(&self, brief: DesignBrief<'_>) -> Result<Vec<CandidateRoute>> {
        *self.seen_features.lock().unwrap() = Some(brief.features.len());

        Ok((0..self.count)
            .map(|i| {
                let rotation = i as f64 * 9.0;
                let bearings = [rotation, rotation + 90.0, rotation + 180.0, rotation + 270.0];
                CandidateRoute {
                    id: format!("ai_route_test_{}", i),
                    name: format!("Square {}", i),
                    waypoints: project_ring(
                        brief.start,
                        self.base_radius_km + i as f64 * 0.01,
                        &bearings,
                    ),
                    reasoning: "Square around the start".to_string(),
                    estimated_distance_km: brief.target_distance_km,
                    circuit_type: "square".to_string(),
                }
            })
            .collect())
    }
}

/// Designer that always fails
pub struct FailingDesigner;

#[async_trait]
impl CircuitDesigner for FailingDesigner {
    async fn design(&self, _brief: DesignBrief<'_>) -> Result<Vec<CandidateRoute>> {
        Err(AppError::CircuitDesigner("HTTP 500: upstream".to_string()))
    }
}

/// Straight-line "streets": start -> waypoints -> start, densified every ~25m
pub struct FakeDirections;

fn interpolate(from: &Coordinates, to: &Coordinates, step_km: f64) -> Vec<Coordinates> {
    let steps = ((from.distance_to(to) / step_km).ceil() as usize).max(1);
    (0..steps)
        .map(|k| {
            let t = k as f64 / steps as f64;
            Coordinates {
                lat: from.lat + (to.lat - from.lat) * t,
                lng: from.lng + (to.lng - from.lng) * t,
            }
        })
        .collect()
}

#[async_trait]
impl DirectionsProvider for FakeDirections {
    async fn walking_circuit(
        &self,
        start: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<DirectionsRoute> {
        let mut stops = vec![*start];
        stops.extend_from_slice(waypoints);
        stops.push(*start);

        let mut path = Vec::new();
        let mut turn_instructions = Vec::new();
        let mut travelled_km = 0.0;
        for leg in stops.windows(2) {
            turn_instructions.push(TurnInstruction {
                instruction: format!("Head to {:.4}, {:.4}", leg[1].lat, leg[1].lng),
                lat: leg[0].lat,
                lng: leg[0].lng,
                distance_km: travelled_km,
            });
            travelled_km += leg[0].distance_to(&leg[1]);
            path.extend(interpolate(&leg[0], &leg[1], 0.025));
        }
        path.push(*start);

        let distance_km = (path_length_km(&path) * 10.0).round() / 10.0;
        Ok(DirectionsRoute {
            distance_km,
            duration_minutes: (distance_km * 12.0).round() as u32,
            polyline: polyline::encode(&path),
            instructions: turn_instructions
                .iter()
                .map(|t| t.instruction.clone())
                .collect(),
            turn_instructions,
        })
    }
}

/// Directions provider that always fails
pub struct FailingDirections;

#[async_trait]
impl DirectionsProvider for FailingDirections {
    async fn walking_circuit(
        &self,
        _start: &Coordinates,
        _waypoints: &[Coordinates],
    ) -> Result<DirectionsRoute> {
        Err(AppError::Directions("status ZERO_RESULTS: ".to_string()))
    }
}

/// Elevation provider handing out one total climb per call, in order: the
/// profile climbs by that amount to the middle sample and descends back.
/// Flat once the queue is empty.
pub struct FakeElevation {
    gains: Mutex<VecDeque<f64>>,
}

impl FakeElevation {
    pub fn new(gains: &[f64]) -> Self {
        FakeElevation {
            gains: Mutex::new(gains.iter().copied().collect()),
        }
    }

    pub fn flat() -> Self {
        Self::new(&[])
    }
}

#[async_trait]
impl ElevationProvider for FakeElevation {
    async fn elevations(&self, points: &[Coordinates]) -> Result<Vec<f64>> {
        let gain = self.gains.lock().unwrap().pop_front().unwrap_or(0.0);
        let n = points.len();
        if n < 3 {
            return Ok(vec![100.0; n]);
        }

        let peak = (n - 1) / 2;
        Ok((0..n)
            .map(|k| {
                if k <= peak {
                    100.0 + gain * k as f64 / peak as f64
                } else {
                    100.0 + gain * (n - 1 - k) as f64 / (n - 1 - peak) as f64
                }
            })
            .collect())
    }
}

/// Elevation provider that always fails
pub struct FailingElevation;

#[async_trait]
impl ElevationProvider for FailingElevation {
    async fn elevations(&self, _points: &[Coordinates]) -> Result<Vec<f64>> {
        Err(AppError::Elevation("HTTP 503".to_string()))
    }
}

pub fn generator(
    places: impl PlacesProvider + 'static,
    designer: Option<Arc<dyn CircuitDesigner>>,
    directions: impl DirectionsProvider + 'static,
    elevation: impl ElevationProvider + 'static,
) -> RouteGenerator {
    RouteGenerator::new(
        Arc::new(places),
        designer,
        Arc::new(directions),
        Arc::new(elevation),
        RouteGeneratorConfig::default(),
    )
}
