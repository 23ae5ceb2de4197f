//! Route query results as returned by the mapping provider.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::polyline::EncodedPolyline;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Drive,
    TwoWheeler,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Drive => "DRIVE",
            TravelMode::TwoWheeler => "TWO_WHEELER",
            TravelMode::Transit => "TRANSIT",
        }
    }

    /// Whether the provider should route this mode against live traffic.
    pub fn is_traffic_aware(&self) -> bool {
        matches!(self, TravelMode::Drive | TravelMode::TwoWheeler)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One route candidate with durations still in provider form (`"<N>s"`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteCandidate {
    pub duration: Option<String>,
    /// Free-flow baseline. Only reported for driving.
    pub static_duration: Option<String>,
    pub distance_meters: i64,
    pub polyline: EncodedPolyline,
}

/// Candidates for a single travel mode, in provider order.
///
/// An empty list means the provider found no route for the mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeResult {
    pub mode: TravelMode,
    pub routes: Vec<RouteCandidate>,
}

impl ModeResult {
    pub fn new(mode: TravelMode, routes: Vec<RouteCandidate>) -> Self {
        Self { mode, routes }
    }

    pub fn empty(mode: TravelMode) -> Self {
        Self::new(mode, Vec::new())
    }

    /// The provider's recommended route.
    pub fn primary(&self) -> Option<&RouteCandidate> {
        self.routes.first()
    }

    /// Every candidate after the primary one.
    pub fn alternates(&self) -> &[RouteCandidate] {
        self.routes.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
