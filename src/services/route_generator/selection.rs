use crate::constants::DIFFICULTY_QUOTAS;
use crate::models::EnhancedRoute;
use std::cmp::Ordering;

/// Thresholds a scored route must meet to be offered at all
#[derive(Debug, Clone, Copy)]
pub struct AcceptanceCriteria {
    pub target_distance_km: f64,
    pub max_distance_error: f64,
    pub max_backtrack_ratio: f64,
    pub min_loop_quality: f64,
}

impl AcceptanceCriteria {
    pub fn accepts(&self, route: &EnhancedRoute) -> bool {
        let distance_error =
            (route.distance - self.target_distance_km).abs() / self.target_distance_km;
        distance_error < self.max_distance_error
            && route.circuit_quality.backtrack_ratio < self.max_backtrack_ratio
            && route.circuit_quality.loop_quality > self.min_loop_quality
    }
}

fn by_distance(a: &EnhancedRoute, b: &EnhancedRoute) -> Ordering {
    a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal)
}

fn by_difficulty_then_distance(a: &EnhancedRoute, b: &EnhancedRoute) -> Ordering {
    a.difficulty
        .cmp(&b.difficulty)
        .then_with(|| by_distance(a, b))
}

/// Build the final set: per-difficulty quotas (2 easy, 2 moderate, 1 hard)
/// taken shortest first, remaining slots backfilled from the leftovers by
/// ascending distance, then ordered easy -> moderate -> hard.
pub fn select_balanced(routes: Vec<EnhancedRoute>, max_results: usize) -> Vec<EnhancedRoute> {
    let mut pool = routes;
    pool.sort_by(by_distance);

    let mut taken = [0usize; 3];
    let mut selected = Vec::with_capacity(max_results);
    let mut leftovers = Vec::new();

    for route in pool {
        let rank = route.difficulty.rank();
        if taken[rank] < DIFFICULTY_QUOTAS[rank] && selected.len() < max_results {
            taken[rank] += 1;
            selected.push(route);
        } else {
            leftovers.push(route);
        }
    }

    // Leftovers are still in ascending distance order
    let missing = max_results.saturating_sub(selected.len());
    if missing > 0 && !leftovers.is_empty() {
        tracing::debug!(
            missing = missing,
            leftovers = leftovers.len(),
            "Backfilling {} slots from {} leftover routes",
            missing, leftovers.len()
        );
        selected.extend(leftovers.into_iter().take(missing));
    }

    selected.sort_by(by_difficulty_then_distance);
    selected.truncate(max_results);
    selected
}

/// Counts per difficulty, easy first
pub fn difficulty_breakdown(routes: &[EnhancedRoute]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for route in routes {
        counts[route.difficulty.rank()] += 1;
    }
    counts
}
