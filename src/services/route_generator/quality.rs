use crate::constants::*;
use crate::models::{CircuitQuality, Coordinates, Difficulty, ElevationStats};
use std::collections::HashSet;

type GridCell = (i64, i64);

impl CircuitQuality {
    /// Compute shape metrics for a decoded path around `start`
    pub fn compute(start: &Coordinates, path: &[Coordinates]) -> Self {
        let closing_km = path
            .last()
            .map(|end| start.distance_to(end))
            .unwrap_or(f64::INFINITY);

        CircuitQuality {
            loop_quality: loop_quality(closing_km),
            backtrack_ratio: backtrack_ratio(path),
            angular_spread: angular_spread(start, path),
        }
    }
}

/// 1.0 when the route closes exactly at the start, falling linearly to 0.0
/// at 500m. Never negative.
pub fn loop_quality(closing_distance_km: f64) -> f64 {
    (1.0 - closing_distance_km / LOOP_QUALITY_ZERO_AT_KM).max(0.0)
}

fn grid_cell(point: &Coordinates) -> GridCell {
    (
        (point.lat / BACKTRACK_GRID_CELL_DEG).round() as i64,
        (point.lng / BACKTRACK_GRID_CELL_DEG).round() as i64,
    )
}

/// Fraction of directed grid-to-grid segments whose reverse also appears in
/// the path. Consecutive points in the same cell form no segment.
pub fn backtrack_ratio(path: &[Coordinates]) -> f64 {
    let mut cells: Vec<GridCell> = path.iter().map(grid_cell).collect();
    cells.dedup();

    let segments: Vec<(GridCell, GridCell)> = cells.windows(2).map(|w| (w[0], w[1])).collect();
    if segments.is_empty() {
        return 0.0;
    }

    let seen: HashSet<(GridCell, GridCell)> = segments.iter().copied().collect();
    let reversed = segments
        .iter()
        .filter(|(from, to)| seen.contains(&(*to, *from)))
        .count();

    reversed as f64 / segments.len() as f64
}

/// Degrees of the compass covered by the path, measured in 30-degree sectors
/// around the start
pub fn angular_spread(start: &Coordinates, path: &[Coordinates]) -> f64 {
    let sector_count = (360.0 / ANGULAR_SECTOR_DEG) as usize;
    let sectors: HashSet<usize> = path
        .iter()
        .filter(|p| start.distance_to(p) >= ANGULAR_SPREAD_MIN_RADIUS_KM)
        .map(|p| ((start.bearing_to(p) / ANGULAR_SECTOR_DEG) as usize).min(sector_count - 1))
        .collect();

    sectors.len() as f64 * ANGULAR_SECTOR_DEG
}

/// Gain, loss and steepest grade over consecutive elevation samples.
/// `samples` and `elevations` must line up; anything else yields zeros.
pub fn elevation_stats(samples: &[Coordinates], elevations: &[f64]) -> ElevationStats {
    if samples.len() != elevations.len() || samples.len() < 2 {
        return ElevationStats::default();
    }

    let mut stats = ElevationStats::default();

    for (points, heights) in samples.windows(2).zip(elevations.windows(2)) {
        let delta = heights[1] - heights[0];
        if delta > 0.0 {
            stats.gain_m += delta;
        } else {
            stats.loss_m += -delta;
        }

        let horizontal_m = points[0].distance_to(&points[1]) * 1000.0;
        if horizontal_m > 1.0 {
            let gradient = delta.abs() / horizontal_m * 100.0;
            stats.max_gradient_percent = stats.max_gradient_percent.max(gradient);
        }
    }

    stats.max_gradient_degrees = (stats.max_gradient_percent / 100.0).atan().to_degrees();
    stats
}

/// Pure function of elevation gain and backtracking
pub fn classify_difficulty(elevation_gain_m: f64, backtrack_ratio: f64) -> Difficulty {
    if elevation_gain_m > HARD_ELEVATION_GAIN_M || backtrack_ratio > HARD_BACKTRACK_RATIO {
        Difficulty::Hard
    } else if elevation_gain_m > MODERATE_ELEVATION_GAIN_M
        || backtrack_ratio > MODERATE_BACKTRACK_RATIO
    {
        Difficulty::Moderate
    } else {
        Difficulty::Easy
    }
}
