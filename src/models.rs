//! Core data model for route queries and estimates
//!
//! Everything in here is transient: a query is built per request, an estimate
//! is computed and handed back, nothing is persisted.

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Supported travel modes between two cities
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Train,
    Flight,
    Bus,
    Car,
    Bike,
    Taxi,
    Walking,
}

impl TravelMode {
    /// Parse a mode name from a request. Unknown names are not an error
    /// anywhere in the service; callers that need a profile substitute
    /// [`TravelMode::Car`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "train" => Some(Self::Train),
            "flight" => Some(Self::Flight),
            "bus" => Some(Self::Bus),
            "car" => Some(Self::Car),
            "bike" => Some(Self::Bike),
            "taxi" => Some(Self::Taxi),
            "walking" => Some(Self::Walking),
            _ => None,
        }
    }

    /// Canonical lowercase name of the mode
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Flight => "flight",
            Self::Bus => "bus",
            Self::Car => "car",
            Self::Bike => "bike",
            Self::Taxi => "taxi",
            Self::Walking => "walking",
        }
    }
}

/// Where an estimate came from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// Hand-curated known-route table hit
    CachedData,
    /// Upstream AI model estimate
    AiEstimate,
    /// Deterministic speed/rate formula
    FormulaEstimate,
}

/// A single route question: two cities, optional coordinates, a travel mode.
///
/// The mode is carried as the raw request string so the response can echo it
/// verbatim; [`RouteQuery::mode`] resolves it to a [`TravelMode`] when a
/// table lookup or profile is needed.
#[derive(Debug, Clone)]
pub struct RouteQuery {
    pub origin_city: String,
    pub destination_city: String,
    pub origin_coords: Option<Coordinates>,
    pub destination_coords: Option<Coordinates>,
    pub mode_name: String,
}

impl RouteQuery {
    /// Create a query without coordinates
    #[must_use]
    pub fn new(origin_city: &str, destination_city: &str, mode_name: &str) -> Self {
        Self {
            origin_city: origin_city.to_string(),
            destination_city: destination_city.to_string(),
            origin_coords: None,
            destination_coords: None,
            mode_name: mode_name.to_string(),
        }
    }

    /// Attach coordinates to both endpoints
    #[must_use]
    pub fn with_coords(mut self, origin: Coordinates, destination: Coordinates) -> Self {
        self.origin_coords = Some(origin);
        self.destination_coords = Some(destination);
        self
    }

    /// Resolved travel mode, if the request named a known one
    #[must_use]
    pub fn mode(&self) -> Option<TravelMode> {
        TravelMode::parse(&self.mode_name)
    }
}

/// Best-effort answer for one route query
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEstimate {
    /// Distance in kilometers
    pub distance_km: f64,
    /// Travel duration in hours
    pub duration_hours: f64,
    /// Lower bound of the expected ticket/fuel price
    pub min_price: f64,
    /// Upper bound of the expected ticket/fuel price
    pub max_price: f64,
    /// Mode name echoed from the query
    pub mode: String,
    /// False only for known-route table hits
    pub is_estimate: bool,
    /// Which tier produced this estimate
    pub source: EstimateSource,
}
