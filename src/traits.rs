//! Seams to the mapping provider and the notification channel.
//!
//! The advisory engine never talks to the network itself. A run asks a
//! `RouteProvider` for candidates and hands the finished advisory to a
//! `NotificationSink`.

use crate::advisory::Advisory;
use crate::error::{GatewayError, SinkError};
use crate::route::{ModeResult, TravelMode};

/// Queries route candidates between the configured origin and destination.
///
/// Must be `Sync`: the three mode queries of a run may be issued in parallel.
pub trait RouteProvider: Sync {
    /// Candidates for `mode` in provider order. A provider answer without
    /// routes is `Ok` with an empty result, not an error.
    fn routes_for(&self, mode: TravelMode, alternatives: bool) -> Result<ModeResult, GatewayError>;
}

/// Delivers a finished advisory together with its map image URL.
pub trait NotificationSink {
    fn deliver(&self, advisory: &Advisory, map_url: &str) -> Result<(), SinkError>;
}
