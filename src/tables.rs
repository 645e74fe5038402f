//! Static route and mode tables
//!
//! Curated data the estimation cascade consults before falling back to
//! approximations: a hand-maintained table of well-travelled city pairs with
//! precomputed fares, and the per-mode speed and price-rate profiles used by
//! the formula tier. Both are built once at process start and never mutated;
//! tests construct their own instances where they need different data.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::TravelMode;

/// Precomputed fare for one mode on a known route.
///
/// A mode that is not offered on a route (no Delhi–Agra flight, the cities
/// are too close) simply has no fare entry; the lookup tier treats that as a
/// miss and lets the cascade continue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModeFare {
    pub duration_hours: f64,
    pub min_price: f64,
    pub max_price: f64,
}

/// One curated city pair with a fixed distance and per-mode fares
#[derive(Debug, Clone)]
pub struct KnownRoute {
    pub distance_km: f64,
    fares: HashMap<TravelMode, ModeFare>,
}

impl KnownRoute {
    /// Fare for the given mode, if the route offers it
    #[must_use]
    pub fn fare(&self, mode: TravelMode) -> Option<&ModeFare> {
        self.fares.get(&mode)
    }
}

/// Read-only table of known routes, keyed by unordered city pair
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<(String, String), KnownRoute>,
}

fn city_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl RouteTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route under its city pair
    pub fn insert(
        &mut self,
        from: &str,
        to: &str,
        distance_km: f64,
        fares: impl IntoIterator<Item = (TravelMode, ModeFare)>,
    ) {
        self.routes.insert(
            (city_key(from), city_key(to)),
            KnownRoute {
                distance_km,
                fares: fares.into_iter().collect(),
            },
        );
    }

    /// Look up a city pair in either direction, case-insensitively
    #[must_use]
    pub fn lookup(&self, from: &str, to: &str) -> Option<&KnownRoute> {
        let (a, b) = (city_key(from), city_key(to));
        self.routes
            .get(&(a.clone(), b.clone()))
            .or_else(|| self.routes.get(&(b, a)))
    }

    /// Number of curated city pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table holds no routes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// City pairs in the table, in arbitrary order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.keys().map(|(a, b)| (a.as_str(), b.as_str()))
    }
}

/// Speed and per-kilometer price-rate assumptions for one travel mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModeProfile {
    /// Average speed in km/h
    pub speed_kmh: f64,
    /// Price rate range in currency units per km: (min, max)
    pub rate_per_km: (f64, f64),
}

/// Fallback profile when a profile set lacks an entry for the resolved mode
const FALLBACK_PROFILE: ModeProfile = ModeProfile {
    speed_kmh: 55.0,
    rate_per_km: (6.0, 10.0),
};

/// Read-only per-mode profiles used by the formula tier
#[derive(Debug, Clone, Default)]
pub struct ModeProfiles {
    profiles: HashMap<TravelMode, ModeProfile>,
}

impl ModeProfiles {
    /// Create an empty profile set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile for a mode
    pub fn insert(&mut self, mode: TravelMode, profile: ModeProfile) {
        self.profiles.insert(mode, profile);
    }

    /// Profile for the given mode; `None` (an unknown mode name in the
    /// request) substitutes the car profile. A profile set without an entry
    /// for the resolved mode answers with a fixed car-like default.
    #[must_use]
    pub fn profile_for(&self, mode: Option<TravelMode>) -> ModeProfile {
        let mode = mode.unwrap_or(TravelMode::Car);
        self.profiles.get(&mode).copied().unwrap_or(FALLBACK_PROFILE)
    }
}

fn fare(duration_hours: f64, min_price: f64, max_price: f64) -> ModeFare {
    ModeFare {
        duration_hours,
        min_price,
        max_price,
    }
}

/// Built-in known routes: popular Indian intercity pairs
static KNOWN_ROUTES: LazyLock<RouteTable> = LazyLock::new(|| {
    use TravelMode::{Bus, Car, Flight, Taxi, Train};

    let mut table = RouteTable::new();

    table.insert(
        "Delhi",
        "Agra",
        233.0,
        [
            (Train, fare(2.0, 250.0, 2500.0)),
            (Bus, fare(4.0, 300.0, 800.0)),
            (Car, fare(3.5, 1500.0, 2500.0)),
            (Taxi, fare(3.5, 2500.0, 4000.0)),
        ],
    );
    table.insert(
        "Delhi",
        "Jaipur",
        281.0,
        [
            (Train, fare(4.5, 300.0, 2800.0)),
            (Flight, fare(1.0, 2500.0, 6000.0)),
            (Bus, fare(5.5, 400.0, 1000.0)),
            (Car, fare(4.5, 1800.0, 3000.0)),
        ],
    );
    table.insert(
        "Delhi",
        "Mumbai",
        1400.0,
        [
            (Train, fare(16.0, 600.0, 5000.0)),
            (Flight, fare(2.0, 3000.0, 9000.0)),
            (Bus, fare(24.0, 1200.0, 2500.0)),
        ],
    );
    table.insert(
        "Mumbai",
        "Pune",
        149.0,
        [
            (Train, fare(3.0, 100.0, 1500.0)),
            (Bus, fare(3.0, 250.0, 600.0)),
            (Car, fare(2.5, 1000.0, 1800.0)),
            (Taxi, fare(2.5, 1800.0, 3000.0)),
        ],
    );
    table.insert(
        "Mumbai",
        "Goa",
        590.0,
        [
            (Train, fare(8.5, 400.0, 3500.0)),
            (Flight, fare(1.25, 2000.0, 7000.0)),
            (Bus, fare(10.0, 800.0, 2000.0)),
        ],
    );
    table.insert(
        "Bangalore",
        "Mysore",
        143.0,
        [
            (Train, fare(2.0, 100.0, 1200.0)),
            (Bus, fare(3.0, 150.0, 500.0)),
            (Car, fare(3.0, 900.0, 1600.0)),
        ],
    );

    table
});

/// Built-in mode profiles. Rates are INR per km, consistent with the
/// known-route fares.
static MODE_PROFILES: LazyLock<ModeProfiles> = LazyLock::new(|| {
    use TravelMode::{Bike, Bus, Car, Flight, Taxi, Train, Walking};

    let mut profiles = ModeProfiles::new();
    profiles.insert(
        Train,
        ModeProfile {
            speed_kmh: 60.0,
            rate_per_km: (1.0, 9.0),
        },
    );
    profiles.insert(
        Flight,
        ModeProfile {
            speed_kmh: 500.0,
            rate_per_km: (4.0, 12.0),
        },
    );
    profiles.insert(
        Bus,
        ModeProfile {
            speed_kmh: 45.0,
            rate_per_km: (1.5, 3.0),
        },
    );
    profiles.insert(
        Car,
        ModeProfile {
            speed_kmh: 55.0,
            rate_per_km: (6.0, 10.0),
        },
    );
    profiles.insert(
        Bike,
        ModeProfile {
            speed_kmh: 40.0,
            rate_per_km: (2.5, 4.0),
        },
    );
    profiles.insert(
        Taxi,
        ModeProfile {
            speed_kmh: 50.0,
            rate_per_km: (11.0, 18.0),
        },
    );
    profiles.insert(
        Walking,
        ModeProfile {
            speed_kmh: 5.0,
            rate_per_km: (0.0, 0.0),
        },
    );

    profiles
});

/// Process-wide known-route table
#[must_use]
pub fn builtin_routes() -> &'static RouteTable {
    &KNOWN_ROUTES
}

/// Process-wide mode profiles
#[must_use]
pub fn builtin_profiles() -> &'static ModeProfiles {
    &MODE_PROFILES
}
