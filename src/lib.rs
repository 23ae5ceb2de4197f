//! commute-advisor
//!
//! Checks commute travel times for one origin/destination pair, flags heavy
//! traffic and worthwhile detours, and posts the advisory to a webhook.

pub mod advisory;
pub mod config;
pub mod discord;
pub mod duration;
pub mod error;
pub mod polyline;
pub mod route;
pub mod routes_api;
pub mod run;
pub mod static_map;
pub mod traits;
