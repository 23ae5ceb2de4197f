//! Process configuration.
//!
//! Every setting can come from a flag or from the environment (a `.env` file
//! is loaded by the binary first). `AppConfig::from_args` validates the lot
//! once, before any network call, and the result is passed down by reference.

use chrono::format::{Item, StrftimeItems};
use clap::{Parser, ValueEnum};
use reqwest::Url;

use crate::advisory::{AdvisoryOptions, DEFAULT_DETOUR_SAVINGS_THRESHOLD_MIN, MapRoute};
use crate::discord::{DEFAULT_TIMESTAMP_FORMAT, MessageTemplate};
use crate::error::ConfigError;
use crate::route::Coordinate;
use crate::routes_api::{DEFAULT_ROUTES_API_URL, RoutesApiConfig};
use crate::static_map::{DEFAULT_STATIC_MAP_URL, StaticMapConfig};

/// Commute traffic advisory: checks travel times and posts a summary to Discord
#[derive(Parser, Debug, Clone)]
#[command(name = "commute-advisor", version, about)]
pub struct Args {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact", env = "LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Print the webhook payload instead of posting it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    #[arg(long, env = "GOOGLE_ROUTES_API", default_value = DEFAULT_ROUTES_API_URL)]
    pub routes_api_url: String,

    #[arg(long, env = "GOOGLE_STATIC_MAPS_API", default_value = DEFAULT_STATIC_MAP_URL)]
    pub static_maps_api_url: String,

    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    pub discord_webhook_url: Option<String>,

    #[arg(long, env = "LAT_HOME", allow_hyphen_values = true)]
    pub lat_home: Option<f64>,

    #[arg(long, env = "LNG_HOME", allow_hyphen_values = true)]
    pub lng_home: Option<f64>,

    #[arg(long, env = "LAT_DEST", allow_hyphen_values = true)]
    pub lat_dest: Option<f64>,

    #[arg(long, env = "LNG_DEST", allow_hyphen_values = true)]
    pub lng_dest: Option<f64>,

    /// Minutes an alternate route must save to be recommended
    #[arg(
        long,
        env = "DETOUR_SAVINGS_THRESHOLD_MIN",
        default_value_t = DEFAULT_DETOUR_SAVINGS_THRESHOLD_MIN
    )]
    pub detour_threshold_min: i64,

    /// Route drawn on the map when a detour is recommended
    #[arg(long, value_enum, env = "MAP_ROUTE", default_value = "detour")]
    pub map_route: MapRoute,

    #[arg(long, env = "ZOOM_LEVEL", default_value_t = 12)]
    pub zoom_level: u8,

    #[arg(long, env = "MAP_SIZE", default_value = "1600x1600")]
    pub map_size: String,

    #[arg(long, env = "ROUTE_TITLE", default_value = "Home to Office Route")]
    pub route_title: String,

    /// strftime pattern for the advisory date line
    #[arg(long, env = "TIMESTAMP_FORMAT", default_value = DEFAULT_TIMESTAMP_FORMAT)]
    pub timestamp_format: String,

    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub http_timeout_secs: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    #[default]
    Compact,
}

/// Validated, immutable settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub routes_api: RoutesApiConfig,
    pub static_map: StaticMapConfig,
    /// `None` only in dry-run mode.
    pub webhook_url: Option<String>,
    pub advisory: AdvisoryOptions,
    pub template: MessageTemplate,
    pub http_timeout_secs: u64,
    pub dry_run: bool,
}

impl AppConfig {
    /// Collects every missing required value into a single error.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let api_key = non_empty(args.google_api_key.as_deref());
        let webhook_url = non_empty(args.discord_webhook_url.as_deref());

        let mut missing = Vec::new();
        if api_key.is_none() {
            missing.push("GOOGLE_API_KEY");
        }
        if webhook_url.is_none() && !args.dry_run {
            missing.push("DISCORD_WEBHOOK_URL");
        }
        for (name, value) in [
            ("LAT_HOME", args.lat_home),
            ("LNG_HOME", args.lng_home),
            ("LAT_DEST", args.lat_dest),
            ("LNG_DEST", args.lng_dest),
        ] {
            if value.is_none() {
                missing.push(name);
            }
        }

        let (Some(api_key), Some(lat_home), Some(lng_home), Some(lat_dest), Some(lng_dest)) =
            (api_key, args.lat_home, args.lng_home, args.lat_dest, args.lng_dest)
        else {
            return Err(ConfigError::Missing(missing));
        };
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let origin = coordinate(("LAT_HOME", lat_home), ("LNG_HOME", lng_home))?;
        let destination = coordinate(("LAT_DEST", lat_dest), ("LNG_DEST", lng_dest))?;

        Url::parse(&args.routes_api_url)
            .map_err(|err| ConfigError::invalid("GOOGLE_ROUTES_API", err.to_string()))?;
        if let Some(url) = webhook_url {
            Url::parse(url)
                .map_err(|err| ConfigError::invalid("DISCORD_WEBHOOK_URL", err.to_string()))?;
        }

        if args.detour_threshold_min < 0 {
            return Err(ConfigError::invalid(
                "DETOUR_SAVINGS_THRESHOLD_MIN",
                "must not be negative",
            ));
        }
        if StrftimeItems::new(&args.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::invalid(
                "TIMESTAMP_FORMAT",
                format!("not a valid strftime pattern: {:?}", args.timestamp_format),
            ));
        }
        validate_map_size(&args.map_size)?;

        let routes_api = RoutesApiConfig {
            base_url: args.routes_api_url.clone(),
            api_key: api_key.to_string(),
            origin,
            destination,
            timeout_secs: args.http_timeout_secs,
        };

        let mut static_map = StaticMapConfig::new(&args.static_maps_api_url, api_key)?;
        static_map.zoom = args.zoom_level;
        static_map.size = args.map_size.clone();

        Ok(Self {
            origin,
            destination,
            routes_api,
            static_map,
            webhook_url: webhook_url.map(str::to_string),
            advisory: AdvisoryOptions {
                detour_threshold_min: args.detour_threshold_min,
                map_route: args.map_route,
            },
            template: MessageTemplate {
                embed_title: args.route_title.clone(),
                timestamp_format: args.timestamp_format.clone(),
            },
            http_timeout_secs: args.http_timeout_secs,
            dry_run: args.dry_run,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn coordinate(
    (lat_name, latitude): (&'static str, f64),
    (lng_name, longitude): (&'static str, f64),
) -> Result<Coordinate, ConfigError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ConfigError::invalid(lat_name, format!("{latitude} is outside [-90, 90]")));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ConfigError::invalid(
            lng_name,
            format!("{longitude} is outside [-180, 180]"),
        ));
    }
    Ok(Coordinate::new(latitude, longitude))
}

fn validate_map_size(size: &str) -> Result<(), ConfigError> {
    let valid = size
        .split_once('x')
        .map(|(w, h)| w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok())
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(ConfigError::invalid("MAP_SIZE", format!("expected <width>x<height>, got {size:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            verbose: 0,
            quiet: false,
            log_format: LogFormat::Compact,
            dry_run: false,
            google_api_key: Some("key".to_string()),
            routes_api_url: DEFAULT_ROUTES_API_URL.to_string(),
            static_maps_api_url: DEFAULT_STATIC_MAP_URL.to_string(),
            discord_webhook_url: Some("https://discord.com/api/webhooks/1/abc".to_string()),
            lat_home: Some(10.4396),
            lng_home: Some(124.0073),
            lat_dest: Some(10.3171),
            lng_dest: Some(123.9019),
            detour_threshold_min: 5,
            map_route: MapRoute::Detour,
            zoom_level: 12,
            map_size: "1600x1600".to_string(),
            route_title: "Home to Office Route".to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            http_timeout_secs: 10,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = AppConfig::from_args(&args()).unwrap();
        assert_eq!(config.origin, Coordinate::new(10.4396, 124.0073));
        assert_eq!(config.destination, Coordinate::new(10.3171, 123.9019));
        assert_eq!(config.routes_api.api_key, "key");
        assert_eq!(config.static_map.zoom, 12);
        assert_eq!(config.advisory.detour_threshold_min, 5);
        assert!(config.webhook_url.is_some());
    }

    #[test]
    fn test_reports_all_missing_fields() {
        let mut args = args();
        args.google_api_key = None;
        args.discord_webhook_url = Some("   ".to_string());
        args.lat_dest = None;

        let err = AppConfig::from_args(&args).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec!["GOOGLE_API_KEY", "DISCORD_WEBHOOK_URL", "LAT_DEST"])
        );
    }

    #[test]
    fn test_missing_webhook_only() {
        let mut args = args();
        args.discord_webhook_url = None;
        let err = AppConfig::from_args(&args).unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec!["DISCORD_WEBHOOK_URL"]));
    }

    #[test]
    fn test_dry_run_does_not_need_webhook() {
        let mut args = args();
        args.dry_run = true;
        args.discord_webhook_url = None;
        let config = AppConfig::from_args(&args).unwrap();
        assert!(config.webhook_url.is_none());
        assert!(config.dry_run);
    }

    #[test]
    fn test_rejects_out_of_range_latitude() {
        let mut args = args();
        args.lat_home = Some(91.0);
        let err = AppConfig::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "LAT_HOME", .. }));
    }

    #[test]
    fn test_rejects_bad_timestamp_format() {
        let mut args = args();
        args.timestamp_format = "%Q".to_string();
        let err = AppConfig::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "TIMESTAMP_FORMAT", .. }));
    }

    #[test]
    fn test_rejects_bad_map_size() {
        let mut args = args();
        args.map_size = "large".to_string();
        let err = AppConfig::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "MAP_SIZE", .. }));
    }

    #[test]
    fn test_rejects_bad_webhook_url() {
        let mut args = args();
        args.discord_webhook_url = Some("discord".to_string());
        let err = AppConfig::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "DISCORD_WEBHOOK_URL", .. }));
    }

    #[test]
    fn test_parses_flags() {
        let args = Args::try_parse_from([
            "commute-advisor",
            "--dry-run",
            "--google-api-key",
            "k",
            "--lat-home",
            "-33.9",
            "--lng-home",
            "151.2",
            "--lat-dest",
            "-33.8",
            "--lng-dest",
            "151.1",
            "--map-route",
            "primary",
            "--detour-threshold-min",
            "8",
        ])
        .unwrap();
        assert!(args.dry_run);
        assert_eq!(args.lat_home, Some(-33.9));
        assert_eq!(args.map_route, MapRoute::Primary);
        assert_eq!(args.detour_threshold_min, 8);
    }
}
