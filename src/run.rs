//! One advisory cycle: query every mode, build the advisory, notify.
//!
//! Nothing is retried. A failure ends the run and the scheduler that invoked
//! the process tries again on its next tick.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::advisory::{Advisory, build_advisory};
use crate::config::AppConfig;
use crate::error::{GatewayError, RunError};
use crate::route::{ModeResult, TravelMode};
use crate::static_map::StaticMap;
use crate::traits::{NotificationSink, RouteProvider};

#[derive(Debug, Clone)]
pub struct ModeResults {
    pub drive: ModeResult,
    pub moto: ModeResult,
    pub transit: ModeResult,
}

/// An advisory ready to hand to a sink.
#[derive(Debug, Clone)]
pub struct PreparedAdvisory {
    pub advisory: Advisory,
    pub map_url: String,
}

/// Queries the three modes concurrently. Only driving asks for alternates.
pub fn fetch_modes<P: RouteProvider>(provider: &P) -> Result<ModeResults, GatewayError> {
    let (drive, (moto, transit)) = rayon::join(
        || provider.routes_for(TravelMode::Drive, true),
        || {
            rayon::join(
                || provider.routes_for(TravelMode::TwoWheeler, false),
                || provider.routes_for(TravelMode::Transit, false),
            )
        },
    );

    let results = ModeResults {
        drive: drive?,
        moto: moto?,
        transit: transit?,
    };

    for result in [&results.drive, &results.moto, &results.transit] {
        if result.is_empty() {
            warn!(mode = %result.mode, "no route found");
        } else {
            info!(mode = %result.mode, candidates = result.routes.len(), "routes received");
        }
    }

    Ok(results)
}

pub fn prepare_advisory<P: RouteProvider>(
    config: &AppConfig,
    provider: &P,
    now: DateTime<Local>,
) -> Result<PreparedAdvisory, RunError> {
    let modes = fetch_modes(provider)?;
    let advisory = build_advisory(
        &modes.drive,
        &modes.moto,
        &modes.transit,
        &config.advisory,
        now,
    )?;

    info!(
        drive = %advisory.formatted_times.drive,
        moto = %advisory.formatted_times.moto,
        transit = %advisory.formatted_times.transit,
        delay_minutes = advisory.traffic.delay_minutes,
        heavy = advisory.traffic.is_heavy,
        "advisory built"
    );
    if let Some(detour) = &advisory.detour {
        info!(
            minutes_saved = detour.minutes_saved,
            route_index = detour.route_index,
            "alternative route found"
        );
    }

    // A route that does not decode is left off the map; the markers still render.
    let map_route = match advisory.map_polyline.decode() {
        Ok(route) if !route.is_empty() => {
            debug!(
                points = route.len(),
                start = ?route.points().first(),
                end = ?route.points().last(),
                "map route decoded"
            );
            Some(&advisory.map_polyline)
        }
        Ok(_) => {
            warn!("map route polyline is empty, drawing markers only");
            None
        }
        Err(err) => {
            warn!(error = %err, "map route polyline does not decode, drawing markers only");
            None
        }
    };

    let static_map = StaticMap::new(config.static_map.clone(), config.origin, config.destination);
    let map_url = static_map.url_for(map_route).to_string();
    debug!(url = %static_map.redacted_url_for(map_route), "static map");

    Ok(PreparedAdvisory { advisory, map_url })
}

/// Runs one full cycle and delivers the advisory to `sink`.
pub fn run_once<P, S>(
    config: &AppConfig,
    provider: &P,
    sink: &S,
    now: DateTime<Local>,
) -> Result<PreparedAdvisory, RunError>
where
    P: RouteProvider,
    S: NotificationSink,
{
    let prepared = prepare_advisory(config, provider, now)?;
    sink.deliver(&prepared.advisory, &prepared.map_url)?;
    Ok(prepared)
}
