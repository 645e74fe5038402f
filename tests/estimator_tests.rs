//! End-to-end properties of the estimation cascade

use rstest::rstest;

use routecast::ai::AiClient;
use routecast::config::AiConfig;
use routecast::estimator::{Estimator, geometric_distance};
use routecast::models::{Coordinates, EstimateSource, RouteQuery, TravelMode};
use routecast::tables::{builtin_profiles, builtin_routes};

fn estimator() -> Estimator {
    Estimator::new(None)
}

const ALL_MODES: [TravelMode; 7] = [
    TravelMode::Train,
    TravelMode::Flight,
    TravelMode::Bus,
    TravelMode::Car,
    TravelMode::Bike,
    TravelMode::Taxi,
    TravelMode::Walking,
];

/// Every known city pair answers identically in both directions, for every
/// mode it offers.
#[tokio::test]
async fn known_routes_are_direction_insensitive() {
    let table = builtin_routes();
    let estimator = estimator();

    let pairs: Vec<(String, String)> = table
        .pairs()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();

    for (a, b) in pairs {
        let route = table.lookup(&a, &b).unwrap();
        for mode in ALL_MODES {
            if route.fare(mode).is_none() {
                continue;
            }
            let forward = estimator
                .estimate(&RouteQuery::new(&a, &b, mode.name()))
                .await;
            let reverse = estimator
                .estimate(&RouteQuery::new(&b, &a, mode.name()))
                .await;

            assert_eq!(forward.source, EstimateSource::CachedData);
            assert_eq!(forward.distance_km, reverse.distance_km);
            assert_eq!(forward.duration_hours, reverse.duration_hours);
            assert_eq!(forward.min_price, reverse.min_price);
            assert_eq!(forward.max_price, reverse.max_price);
        }
    }
}

#[tokio::test]
async fn delhi_agra_train_is_the_curated_entry() {
    let estimate = estimator()
        .estimate(&RouteQuery::new("Delhi", "Agra", "train"))
        .await;

    assert_eq!(estimate.distance_km, 233.0);
    assert_eq!(estimate.duration_hours, 2.0);
    assert_eq!(estimate.min_price, 250.0);
    assert_eq!(estimate.max_price, 2500.0);
    assert_eq!(estimate.source, EstimateSource::CachedData);
    assert!(!estimate.is_estimate);
}

/// Delhi-Agra offers no flight; the cascade must fall through instead of
/// inventing a zero-duration trip from the table.
#[tokio::test]
async fn mode_not_offered_on_known_route_falls_through() {
    let estimate = estimator()
        .estimate(&RouteQuery::new("Delhi", "Agra", "flight"))
        .await;

    assert_ne!(estimate.source, EstimateSource::CachedData);
    assert!(estimate.is_estimate);
    assert!(estimate.duration_hours > 0.0);
}

#[rstest]
#[case::zero_to_one_degree(0.0, 0.0, 0.0, 1.0)]
#[case::delhi_to_mumbai(28.6139, 77.2090, 19.0760, 72.8777)]
#[case::short_hop(12.9716, 77.5946, 12.2958, 76.6394)]
fn geometric_tier_is_road_corrected_haversine(
    #[case] lat1: f64,
    #[case] lon1: f64,
    #[case] lat2: f64,
    #[case] lon2: f64,
) {
    let from = Coordinates::new(lat1, lon1);
    let to = Coordinates::new(lat2, lon2);

    let great_circle = haversine::distance(
        haversine::Location {
            latitude: lat1,
            longitude: lon1,
        },
        haversine::Location {
            latitude: lat2,
            longitude: lon2,
        },
        haversine::Units::Kilometers,
    );

    let computed = geometric_distance(Some(from), Some(to));
    assert!((computed - (great_circle * 1.3).round()).abs() < 1e-9);
}

#[test]
fn geometric_tier_defaults_without_coordinates() {
    assert_eq!(geometric_distance(None, None), 500.0);
}

/// An unknown mode never errors anywhere; the formula tier answers with the
/// car profile and the response echoes the requested mode name.
#[tokio::test]
async fn unknown_mode_uses_car_profile() {
    let estimate = estimator()
        .estimate(&RouteQuery::new("Springfield", "Shelbyville", "teleport"))
        .await;

    let car = builtin_profiles().profile_for(Some(TravelMode::Car));
    assert_eq!(estimate.mode, "teleport");
    assert_eq!(estimate.source, EstimateSource::FormulaEstimate);
    assert_eq!(estimate.duration_hours, estimate.distance_km / car.speed_kmh);
    assert_eq!(
        estimate.min_price,
        (estimate.distance_km * car.rate_per_km.0).round()
    );
    assert_eq!(
        estimate.max_price,
        (estimate.distance_km * car.rate_per_km.1).round()
    );
}

/// Without a configured credential the AI tier never runs, even for long
/// routes with coordinates.
#[tokio::test]
async fn ai_tier_skipped_without_credential() {
    let query = RouteQuery::new("Springfield", "Shelbyville", "train").with_coords(
        Coordinates::new(0.0, 0.0),
        Coordinates::new(10.0, 10.0),
    );
    let estimate = estimator().estimate(&query).await;
    assert_eq!(estimate.source, EstimateSource::FormulaEstimate);
}

/// A configured AI client whose endpoint is unreachable must not surface an
/// error: the cascade swallows the failure and the caller gets exactly the
/// formula-tier answer, identical to a deployment with no AI at all.
#[tokio::test]
async fn ai_failure_falls_through_to_formula() {
    let config = AiConfig {
        api_key: Some("test_key_12345".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_seconds: 1,
        ..AiConfig::default()
    };
    let ai = AiClient::from_config(&config)
        .unwrap()
        .expect("client should be built when a key is set");

    // Long route with coordinates, so the AI tier is genuinely attempted
    let query = RouteQuery::new("Springfield", "Shelbyville", "train").with_coords(
        Coordinates::new(0.0, 0.0),
        Coordinates::new(10.0, 10.0),
    );

    let with_ai = Estimator::new(Some(ai)).estimate(&query).await;
    let without_ai = estimator().estimate(&query).await;

    assert_eq!(with_ai.source, EstimateSource::FormulaEstimate);
    assert!(with_ai.is_estimate);
    assert_eq!(with_ai, without_ai);
}

#[rstest]
#[case::train("train")]
#[case::flight("flight")]
#[case::bus("bus")]
#[case::car("car")]
#[case::bike("bike")]
#[case::taxi("taxi")]
#[case::walking("walking")]
#[tokio::test]
async fn formula_tier_is_deterministic(#[case] mode: &str) {
    let query = RouteQuery::new("Springfield", "Shelbyville", mode);
    let estimator = estimator();

    let first = estimator.estimate(&query).await;
    let second = estimator.estimate(&query).await;

    assert_eq!(first, second);
    assert_eq!(first.source, EstimateSource::FormulaEstimate);
}
