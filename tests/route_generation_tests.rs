use runcircuit::models::{ActivityType, Difficulty, EnhancedRoute};
use runcircuit::services::circuit_designer::CircuitDesigner;
use runcircuit::AppError;
use std::sync::Arc;

mod common;

use common::{
    FailingDesigner, FailingDirections, FailingElevation, FailingPlaces, FakeDesigner,
    FakeDirections, FakeElevation, FakePlaces, MIXED_GAINS,
};

fn difficulties(routes: &[EnhancedRoute]) -> Vec<Difficulty> {
    routes.iter().map(|r| r.difficulty).collect()
}

fn assert_grouped_and_sorted(routes: &[EnhancedRoute]) {
    for pair in routes.windows(2) {
        assert!(
            pair[0].difficulty < pair[1].difficulty
                || (pair[0].difficulty == pair[1].difficulty
                    && pair[0].distance <= pair[1].distance),
            "{} ({}, {}km) listed before {} ({}, {}km)",
            pair[0].id,
            pair[0].difficulty,
            pair[0].distance,
            pair[1].id,
            pair[1].difficulty,
            pair[1].distance
        );
    }
}

#[tokio::test]
async fn test_end_to_end_balanced_circuits() {
    let designer = Arc::new(FakeDesigner::new(10));
    let generator = common::generator(
        FakePlaces { per_category: 8 },
        Some(designer.clone() as Arc<dyn CircuitDesigner>),
        FakeDirections,
        FakeElevation::new(&MIXED_GAINS),
    );

    let routes = generator
        .generate_circuit_routes(common::london(), 5.0, ActivityType::Run)
        .await
        .unwrap();

    assert_eq!(routes.len(), 5);
    assert_eq!(
        difficulties(&routes),
        vec![
            Difficulty::Easy,
            Difficulty::Easy,
            Difficulty::Moderate,
            Difficulty::Moderate,
            Difficulty::Hard
        ]
    );
    assert_grouped_and_sorted(&routes);

    // Shortest candidates of each difficulty win their slots
    let ids: Vec<&str> = routes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "ai_route_test_0",
            "ai_route_test_1",
            "ai_route_test_2",
            "ai_route_test_3",
            "ai_route_test_4"
        ]
    );

    for route in &routes {
        assert!((route.distance - 5.0).abs() / 5.0 < 0.4);
        assert!(route.circuit_quality.loop_quality > 0.5);
        assert!(route.circuit_quality.backtrack_ratio < 0.5);
        assert!(route.circuit_quality.angular_spread >= 180.0);
        assert!(!route.polyline.is_empty());
        assert_eq!(route.waypoints.len(), 4);
        assert_eq!(route.turn_instructions.len(), 5);
        assert_eq!(route.circuit_type, "square");
    }

    assert!((routes[4].elevation_gain - 200.0).abs() < 1e-6);
    assert!((routes[4].elevation_loss - 200.0).abs() < 1e-6);
    assert!(routes[4].max_gradient_percent > 0.0);

    // 3 categories x 8 features, capped
    assert_eq!(*designer.seen_features.lock().unwrap(), Some(20));
}

#[tokio::test]
async fn test_designer_failure_uses_fallback() {
    let generator = common::generator(
        FakePlaces { per_category: 2 },
        Some(Arc::new(FailingDesigner) as Arc<dyn CircuitDesigner>),
        FakeDirections,
        FakeElevation::flat(),
    );

    let routes = generator
        .generate_circuit_routes(common::london(), 5.0, ActivityType::Run)
        .await
        .unwrap();

    // Five geometric patterns, all flat: quotas fill two easy slots and
    // backfill the rest
    assert_eq!(routes.len(), 5);
    assert!(routes.iter().all(|r| r.id.starts_with("fallback_")));
    assert!(routes.iter().all(|r| r.difficulty == Difficulty::Easy));
    assert_grouped_and_sorted(&routes);
}

#[tokio::test]
async fn test_missing_designer_uses_fallback() {
    let generator = common::generator(
        FakePlaces { per_category: 2 },
        None,
        FakeDirections,
        FakeElevation::flat(),
    );
    assert!(!generator.has_designer());

    let routes = generator
        .generate_circuit_routes(common::london(), 5.0, ActivityType::Walk)
        .await
        .unwrap();

    assert!(!routes.is_empty());
    assert!(routes.iter().all(|r| r.id.starts_with("fallback_")));
    let types: Vec<&str> = routes.iter().map(|r| r.circuit_type.as_str()).collect();
    assert!(types.contains(&"oval"));
    assert!(types.contains(&"hexagon"));
}

#[tokio::test]
async fn test_directions_outage_returns_empty() {
    let generator = common::generator(
        FakePlaces { per_category: 2 },
        Some(Arc::new(FakeDesigner::new(10)) as Arc<dyn CircuitDesigner>),
        FailingDirections,
        FakeElevation::flat(),
    );

    let routes = generator
        .generate_circuit_routes(common::london(), 5.0, ActivityType::Run)
        .await
        .unwrap();

    assert!(routes.is_empty());
}

#[tokio::test]
async fn test_places_failure_is_soft() {
    let designer = Arc::new(FakeDesigner::new(10));
    let generator = common::generator(
        FailingPlaces,
        Some(designer.clone() as Arc<dyn CircuitDesigner>),
        FakeDirections,
        FakeElevation::new(&MIXED_GAINS),
    );

    let routes = generator
        .generate_circuit_routes(common::london(), 5.0, ActivityType::Run)
        .await
        .unwrap();

    assert_eq!(routes.len(), 5);
    assert_eq!(*designer.seen_features.lock().unwrap(), Some(0));
}

#[tokio::test]
async fn test_elevation_failure_degrades_to_flat() {
    let generator = common::generator(
        FakePlaces { per_category: 2 },
        Some(Arc::new(FakeDesigner::new(10)) as Arc<dyn CircuitDesigner>),
        FakeDirections,
        FailingElevation,
    );

    let routes = generator
        .generate_circuit_routes(common::london(), 5.0, ActivityType::Run)
        .await
        .unwrap();

    assert_eq!(routes.len(), 5);
    for route in &routes {
        assert_eq!(route.difficulty, Difficulty::Easy);
        assert_eq!(route.elevation_gain, 0.0);
        assert_eq!(route.max_gradient_degrees, 0.0);
    }
}

#[tokio::test]
async fn test_off_target_candidates_are_filtered() {
    // ~0.6km squares for a 5km request
    let generator = common::generator(
        FakePlaces { per_category: 2 },
        Some(Arc::new(FakeDesigner::with_radius(10, 0.1)) as Arc<dyn CircuitDesigner>),
        FakeDirections,
        FakeElevation::flat(),
    );

    let routes = generator
        .generate_circuit_routes(common::london(), 5.0, ActivityType::Run)
        .await
        .unwrap();

    assert!(routes.is_empty());
}

#[tokio::test]
async fn test_invalid_target_distance() {
    let generator = common::generator(
        FakePlaces { per_category: 2 },
        None,
        FakeDirections,
        FakeElevation::flat(),
    );

    for target in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let result = generator
            .generate_circuit_routes(common::london(), target, ActivityType::Run)
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }
}
