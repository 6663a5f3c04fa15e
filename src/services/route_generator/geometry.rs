use crate::models::Coordinates;

/// Total great-circle length of a path in kilometers
pub fn path_length_km(path: &[Coordinates]) -> f64 {
    path.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Pick at most `max_samples` points spread evenly by index, always keeping
/// the first and last point
pub fn sample_evenly(path: &[Coordinates], max_samples: usize) -> Vec<Coordinates> {
    if path.len() <= max_samples {
        return path.to_vec();
    }
    if max_samples < 2 {
        return path.iter().take(max_samples).copied().collect();
    }

    let last = path.len() - 1;
    (0..max_samples)
        .map(|i| {
            let idx = (i as f64 * last as f64 / (max_samples - 1) as f64).round() as usize;
            path[idx.min(last)]
        })
        .collect()
}

/// Points projected from `center` at `radius_km` on each bearing, in order
pub fn project_ring(
    center: &Coordinates,
    radius_km: f64,
    bearings_deg: &[f64],
) -> Vec<Coordinates> {
    bearings_deg
        .iter()
        .map(|&bearing| center.destination(radius_km, bearing))
        .collect()
}
