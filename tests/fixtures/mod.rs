//! Shared fixtures for commute-advisor integration tests.

#![allow(dead_code)]

use commute_advisor::advisory::MapRoute;
use commute_advisor::config::{AppConfig, Args, LogFormat};
use commute_advisor::polyline::EncodedPolyline;
use commute_advisor::route::RouteCandidate;
use commute_advisor::routes_api::DEFAULT_ROUTES_API_URL;
use commute_advisor::static_map::DEFAULT_STATIC_MAP_URL;

pub const HOME: (f64, f64) = (10.439675051459568, 124.00733686849964);
pub const OFFICE: (f64, f64) = (10.317158007945627, 123.9019046097545);

pub fn args() -> Args {
    Args {
        verbose: 0,
        quiet: false,
        log_format: LogFormat::Compact,
        dry_run: false,
        google_api_key: Some("test-key".to_string()),
        routes_api_url: DEFAULT_ROUTES_API_URL.to_string(),
        static_maps_api_url: DEFAULT_STATIC_MAP_URL.to_string(),
        discord_webhook_url: Some("https://discord.com/api/webhooks/1/token".to_string()),
        lat_home: Some(HOME.0),
        lng_home: Some(HOME.1),
        lat_dest: Some(OFFICE.0),
        lng_dest: Some(OFFICE.1),
        detour_threshold_min: 5,
        map_route: MapRoute::Detour,
        zoom_level: 12,
        map_size: "1600x1600".to_string(),
        route_title: "Home to JEG Tower Route".to_string(),
        timestamp_format: "%B %d, %Y %I:%M %p".to_string(),
        http_timeout_secs: 10,
    }
}

pub fn config() -> AppConfig {
    AppConfig::from_args(&args()).expect("valid fixture config")
}

/// A candidate whose provider duration is `seconds`.
pub fn route(seconds: i64, polyline: &str) -> RouteCandidate {
    RouteCandidate {
        duration: Some(format!("{seconds}s")),
        static_duration: None,
        distance_meters: 20_000,
        polyline: EncodedPolyline::new(polyline),
    }
}

pub fn drive_route(seconds: i64, static_seconds: i64, polyline: &str) -> RouteCandidate {
    RouteCandidate {
        static_duration: Some(format!("{static_seconds}s")),
        ..route(seconds, polyline)
    }
}
