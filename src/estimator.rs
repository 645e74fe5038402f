//! Route estimation cascade
//!
//! Produces a best-effort distance/duration/price estimate for a city pair
//! and travel mode by trying increasingly approximate strategies in a fixed
//! order, taking the first that yields a result:
//!
//! 1. known-route table lookup
//! 2. geometric distance (haversine with a road correction factor)
//! 3. one opportunistic AI estimate for long routes
//! 4. deterministic speed/price-rate formula (never fails)
//!
//! Each tier is an independent function returning `Option<RouteEstimate>`;
//! the driver never nests them. The cascade as a whole cannot fail.

use haversine::{Location as HaversineLocation, Units, distance};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::ai::{AiClient, extract_json_block};
use crate::models::{Coordinates, EstimateSource, RouteEstimate, RouteQuery};
use crate::tables::{self, ModeProfiles, RouteTable};

/// Multiplier applied to great-circle distance to approximate road distance
const ROAD_DISTANCE_FACTOR: f64 = 1.3;

/// Assumed distance when neither endpoint carries coordinates
const DEFAULT_DISTANCE_KM: f64 = 500.0;

/// The AI tier only bothers for routes longer than this
const AI_MIN_DISTANCE_KM: f64 = 100.0;

/// The estimation cascade. Holds the read-only tables and, optionally, an AI
/// client for the third tier. Cheap to share behind an `Arc`; all state is
/// immutable.
#[derive(Debug, Clone)]
pub struct Estimator {
    routes: RouteTable,
    profiles: ModeProfiles,
    ai: Option<AiClient>,
}

impl Estimator {
    /// Cascade over the built-in tables
    #[must_use]
    pub fn new(ai: Option<AiClient>) -> Self {
        Self {
            routes: tables::builtin_routes().clone(),
            profiles: tables::builtin_profiles().clone(),
            ai,
        }
    }

    /// Cascade over caller-supplied tables
    #[must_use]
    pub fn with_tables(routes: RouteTable, profiles: ModeProfiles, ai: Option<AiClient>) -> Self {
        Self {
            routes,
            profiles,
            ai,
        }
    }

    /// Estimate a route. Never fails: the final tier is deterministic and
    /// total, and every earlier tier degrades silently into the next.
    #[instrument(skip(self, query), fields(
        from = %query.origin_city,
        to = %query.destination_city,
        mode = %query.mode_name,
    ))]
    pub async fn estimate(&self, query: &RouteQuery) -> RouteEstimate {
        if let Some(known) = self.lookup_tier(query) {
            info!(source = "cached_data", "Known route hit");
            return known;
        }

        let distance_km = geometric_distance(query.origin_coords, query.destination_coords);
        debug!(distance_km, "Geometric distance computed");

        if let Some(ai) = self.ai_tier(query, distance_km).await {
            info!(source = "ai_estimate", "AI estimate accepted");
            return ai;
        }

        let formula = self.formula_tier(query, distance_km);
        info!(source = "formula_estimate", "Formula fallback used");
        formula
    }

    /// Tier 1: hand-curated known routes, matched in either direction.
    /// A pair hit whose entry has no fare for the requested mode is a miss
    /// (the mode is not offered on that route).
    fn lookup_tier(&self, query: &RouteQuery) -> Option<RouteEstimate> {
        let route = self
            .routes
            .lookup(&query.origin_city, &query.destination_city)?;
        let fare = route.fare(query.mode()?)?;

        Some(RouteEstimate {
            distance_km: route.distance_km,
            duration_hours: fare.duration_hours,
            min_price: fare.min_price,
            max_price: fare.max_price,
            mode: query.mode_name.clone(),
            is_estimate: false,
            source: EstimateSource::CachedData,
        })
    }

    /// Tier 3: one chat-completion request, only for configured deployments
    /// and long enough routes. Every failure is logged and swallowed; the
    /// formula tier is always waiting behind it.
    async fn ai_tier(&self, query: &RouteQuery, distance_km: f64) -> Option<RouteEstimate> {
        let ai = self.ai.as_ref()?;
        if distance_km <= AI_MIN_DISTANCE_KM {
            debug!(distance_km, "Route too short for AI tier");
            return None;
        }

        let system = "You are a travel route estimator. Reply with strict JSON only, \
                      no prose, in the exact shape \
                      {\"duration\": <hours>, \"minPrice\": <number>, \"maxPrice\": <number>}.";
        let user = format!(
            "Estimate travel by {} from {} to {}, approximately {} km. \
             Duration in hours, prices in INR.",
            query.mode_name, query.origin_city, query.destination_city, distance_km
        );

        let content = match ai.complete(system, &user).await {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, "AI tier failed, falling through");
                return None;
            }
        };

        let Some(fare) = parse_ai_reply(&content) else {
            warn!("AI reply carried no parseable estimate, falling through");
            return None;
        };

        Some(RouteEstimate {
            distance_km,
            duration_hours: fare.duration,
            min_price: fare.min_price,
            max_price: fare.max_price,
            mode: query.mode_name.clone(),
            is_estimate: true,
            source: EstimateSource::AiEstimate,
        })
    }

    /// Tier 4: deterministic formula over the mode profile. Total by
    /// construction; unknown modes borrow the car profile.
    fn formula_tier(&self, query: &RouteQuery, distance_km: f64) -> RouteEstimate {
        let profile = self.profiles.profile_for(query.mode());
        let (rate_min, rate_max) = profile.rate_per_km;

        RouteEstimate {
            distance_km,
            duration_hours: distance_km / profile.speed_kmh,
            min_price: (distance_km * rate_min).round(),
            max_price: (distance_km * rate_max).round(),
            mode: query.mode_name.clone(),
            is_estimate: true,
            source: EstimateSource::FormulaEstimate,
        }
    }
}

/// Tier 2: road distance between the endpoints, or a fixed default when
/// either side has no coordinates.
#[must_use]
pub fn geometric_distance(origin: Option<Coordinates>, destination: Option<Coordinates>) -> f64 {
    let (Some(from), Some(to)) = (origin, destination) else {
        return DEFAULT_DISTANCE_KM;
    };

    let great_circle = distance(
        HaversineLocation {
            latitude: from.lat,
            longitude: from.lon,
        },
        HaversineLocation {
            latitude: to.lat,
            longitude: to.lon,
        },
        Units::Kilometers,
    );

    (great_circle * ROAD_DISTANCE_FACTOR).round()
}

/// Fare shape the AI tier demands from the model
#[derive(Debug, Deserialize)]
struct AiFare {
    duration: f64,
    #[serde(rename = "minPrice")]
    min_price: f64,
    #[serde(rename = "maxPrice")]
    max_price: f64,
}

/// Dig the fare out of a model reply, or give up quietly
fn parse_ai_reply(content: &str) -> Option<AiFare> {
    let block = extract_json_block(content)?;
    serde_json::from_str(block).ok()
}
