use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::Layer;

use commute_advisor::config::{AppConfig, Args, LogFormat};
use commute_advisor::discord::{DiscordWebhook, render_payload};
use commute_advisor::error::{ConfigError, RunError};
use commute_advisor::routes_api::RoutesApiClient;
use commute_advisor::run::{prepare_advisory, run_once};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(err) = init_logging(&args) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let config = match AppConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        dry_run = config.dry_run,
        "commute advisor starting"
    );

    match execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn execute(config: &AppConfig) -> Result<(), RunError> {
    let provider = RoutesApiClient::new(config.routes_api.clone()).map_err(RunError::Client)?;
    let now = Local::now();

    if config.dry_run {
        let prepared = prepare_advisory(config, &provider, now)?;
        let payload = render_payload(&prepared.advisory, &prepared.map_url, &config.template);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let Some(webhook_url) = config.webhook_url.as_deref() else {
        return Err(ConfigError::Missing(vec!["DISCORD_WEBHOOK_URL"]).into());
    };
    let sink = DiscordWebhook::new(webhook_url, config.template.clone(), config.http_timeout_secs)
        .map_err(RunError::Client)?;

    run_once(config, &provider, &sink, now)?;
    Ok(())
}

fn init_logging(args: &Args) -> Result<(), String> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if args.quiet {
        EnvFilter::new("warn")
    } else {
        let default_level = match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let fmt_layer = match args.log_format {
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stderr).pretty().boxed(),
        LogFormat::Compact => fmt::layer().with_writer(std::io::stderr).compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {e}"))
}
