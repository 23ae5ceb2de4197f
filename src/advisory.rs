//! Advisory engine.
//!
//! Turns the three mode query results into a single advisory: live drive
//! time against the free-flow baseline, a heavy traffic flag, and the first
//! alternate drive route that saves enough time to be worth recommending.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::duration::{TravelTime, format_travel_time, parse_duration};
use crate::error::AdvisoryError;
use crate::polyline::EncodedPolyline;
use crate::route::{ModeResult, RouteCandidate};

/// Delay over free-flow above which traffic counts as heavy.
pub const HEAVY_TRAFFIC_DELAY_MIN: i64 = 10;

pub const DEFAULT_DETOUR_SAVINGS_THRESHOLD_MIN: i64 = 5;

/// Which route the map image should draw once a detour is recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapRoute {
    /// Always the provider's primary route.
    Primary,
    /// The recommended detour when there is one, else the primary route.
    #[default]
    Detour,
}

#[derive(Debug, Clone)]
pub struct AdvisoryOptions {
    /// Minimum minutes an alternate must save over the primary route.
    pub detour_threshold_min: i64,
    pub map_route: MapRoute,
}

impl Default for AdvisoryOptions {
    fn default() -> Self {
        Self {
            detour_threshold_min: DEFAULT_DETOUR_SAVINGS_THRESHOLD_MIN,
            map_route: MapRoute::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficAssessment {
    /// Live minus free-flow minutes. Negative when the provider's live
    /// estimate beats its own baseline.
    pub delay_minutes: i64,
    pub is_heavy: bool,
}

impl TrafficAssessment {
    pub fn from_durations(drive_minutes: i64, static_minutes: i64) -> Self {
        let delay_minutes = drive_minutes - static_minutes;
        Self {
            delay_minutes,
            is_heavy: delay_minutes > HEAVY_TRAFFIC_DELAY_MIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetourRecommendation {
    pub minutes_saved: i64,
    pub alternate_minutes: i64,
    /// Position among the drive candidates (1 = first alternate).
    pub route_index: usize,
    pub alternate: RouteCandidate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedTimes {
    pub drive: String,
    pub moto: String,
    pub transit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub timestamp: DateTime<Local>,
    pub drive_minutes: i64,
    pub traffic: TrafficAssessment,
    pub detour: Option<DetourRecommendation>,
    pub formatted_times: FormattedTimes,
    /// Geometry the map image should draw.
    pub map_polyline: EncodedPolyline,
}

/// Builds the advisory for one run.
///
/// Fails when the drive query has no candidates or when any duration the
/// advisory depends on is malformed. No partial advisory is produced.
pub fn build_advisory(
    drive: &ModeResult,
    moto: &ModeResult,
    transit: &ModeResult,
    options: &AdvisoryOptions,
    now: DateTime<Local>,
) -> Result<Advisory, AdvisoryError> {
    let primary = drive.primary().ok_or(AdvisoryError::NoRoute)?;

    let drive_minutes = parse_duration(primary.duration.as_deref())?;
    let static_minutes = parse_duration(primary.static_duration.as_deref())?;
    let traffic = TrafficAssessment::from_durations(drive_minutes, static_minutes);

    let moto_time = first_route_time(moto)?;
    let transit_time = first_route_time(transit)?;

    let detour = find_detour(drive, drive_minutes, options.detour_threshold_min)?;

    let map_polyline = match (&detour, options.map_route) {
        (Some(detour), MapRoute::Detour) => detour.alternate.polyline.clone(),
        _ => primary.polyline.clone(),
    };

    Ok(Advisory {
        timestamp: now,
        drive_minutes,
        traffic,
        detour,
        formatted_times: FormattedTimes {
            drive: format_travel_time(drive_minutes),
            moto: format_travel_time(moto_time),
            transit: format_travel_time(transit_time),
        },
        map_polyline,
    })
}

fn first_route_time(result: &ModeResult) -> Result<TravelTime, AdvisoryError> {
    match result.primary() {
        Some(route) => Ok(TravelTime::Minutes(parse_duration(
            route.duration.as_deref(),
        )?)),
        None => Ok(TravelTime::unavailable()),
    }
}

/// First alternate, in provider order, saving at least `threshold_min`.
/// A later alternate saving more does not displace an earlier match.
fn find_detour(
    drive: &ModeResult,
    drive_minutes: i64,
    threshold_min: i64,
) -> Result<Option<DetourRecommendation>, AdvisoryError> {
    for (offset, alternate) in drive.alternates().iter().enumerate() {
        let alternate_minutes = parse_duration(alternate.duration.as_deref())?;
        let minutes_saved = drive_minutes - alternate_minutes;

        if minutes_saved >= threshold_min {
            return Ok(Some(DetourRecommendation {
                minutes_saved,
                alternate_minutes,
                route_index: offset + 1,
                alternate: alternate.clone(),
            }));
        }
    }

    Ok(None)
}
