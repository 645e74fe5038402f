//! `routecast` - Route cost and duration estimation for tourism trips
//!
//! This library provides the estimation cascade (known routes, geometric
//! distance, opportunistic AI, deterministic formula) and the HTTP API that
//! serves it, together with the AI itinerary proxy.

pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod estimator;
pub mod itinerary;
pub mod models;
pub mod tables;
pub mod web;

// Re-export core types for public API
pub use ai::AiClient;
pub use config::RoutecastConfig;
pub use error::RoutecastError;
pub use estimator::Estimator;
pub use models::{Coordinates, EstimateSource, RouteEstimate, RouteQuery, TravelMode};
pub use tables::{ModeProfiles, RouteTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RoutecastError>;
