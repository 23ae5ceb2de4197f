//! Google Routes API adapter (`directions/v2:computeRoutes`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GatewayError;
use crate::polyline::EncodedPolyline;
use crate::route::{Coordinate, ModeResult, RouteCandidate, TravelMode};
use crate::traits::RouteProvider;

pub const DEFAULT_ROUTES_API_URL: &str =
    "https://routes.googleapis.com/directions/v2:computeRoutes";

const FIELD_MASK: &str =
    "routes.duration,routes.staticDuration,routes.distanceMeters,routes.polyline.encodedPolyline";

#[derive(Debug, Clone)]
pub struct RoutesApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub timeout_secs: u64,
}

impl RoutesApiConfig {
    pub fn new(api_key: impl Into<String>, origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            base_url: DEFAULT_ROUTES_API_URL.to_string(),
            api_key: api_key.into(),
            origin,
            destination,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoutesApiClient {
    config: RoutesApiConfig,
    client: reqwest::blocking::Client,
}

impl RoutesApiClient {
    pub fn new(config: RoutesApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn request_body(&self, mode: TravelMode, alternatives: bool) -> ComputeRoutesRequest {
        ComputeRoutesRequest {
            origin: Waypoint::at(self.config.origin),
            destination: Waypoint::at(self.config.destination),
            travel_mode: mode,
            routing_preference: mode.is_traffic_aware().then_some("TRAFFIC_AWARE"),
            compute_alternative_routes: alternatives,
            units: "METRIC",
        }
    }
}

impl RouteProvider for RoutesApiClient {
    fn routes_for(&self, mode: TravelMode, alternatives: bool) -> Result<ModeResult, GatewayError> {
        debug!(%mode, alternatives, url = %self.config.base_url, "querying routes");

        let response = self
            .client
            .post(&self.config.base_url)
            .header("X-Goog-Api-Key", &self.config.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&self.request_body(mode, alternatives))
            .send()
            .map_err(|source| GatewayError::Transport { mode, source })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|source| GatewayError::Transport { mode, source })?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                mode,
                status: status.as_u16(),
                body,
            });
        }

        parse_response(mode, &body)
    }
}

/// Normalises a `computeRoutes` response body. A body without `routes`
/// means the provider found nothing for the mode.
pub fn parse_response(mode: TravelMode, body: &str) -> Result<ModeResult, GatewayError> {
    let parsed: ComputeRoutesResponse =
        serde_json::from_str(body).map_err(|err| GatewayError::Malformed {
            mode,
            message: err.to_string(),
        })?;

    let routes = parsed
        .routes
        .unwrap_or_default()
        .into_iter()
        .map(|route| RouteCandidate {
            duration: route.duration,
            static_duration: route.static_duration,
            distance_meters: route.distance_meters.unwrap_or_default(),
            polyline: route
                .polyline
                .map(|polyline| polyline.encoded_polyline)
                .unwrap_or_default(),
        })
        .collect();

    Ok(ModeResult::new(mode, routes))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: TravelMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing_preference: Option<&'static str>,
    compute_alternative_routes: bool,
    units: &'static str,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: Location,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: Coordinate,
}

impl Waypoint {
    fn at(coordinate: Coordinate) -> Self {
        Self {
            location: Location {
                lat_lng: coordinate,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ComputeRoutesResponse {
    routes: Option<Vec<ApiRoute>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoute {
    duration: Option<String>,
    static_duration: Option<String>,
    distance_meters: Option<i64>,
    polyline: Option<ApiPolyline>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPolyline {
    encoded_polyline: EncodedPolyline,
}
