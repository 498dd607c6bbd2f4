//! CLI entry point for the transit aggregation service.
//!
//! `serve` runs the REST API; `vehicles` estimates the vehicle positions of
//! one line once and logs them, which is handy when checking upstream keys.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lijn_relay::api::{self, AppState};
use lijn_relay::clock::{Clock, SystemClock};
use lijn_relay::config::Config;
use lijn_relay::estimator::{OutOfRangePolicy, estimate_vehicles};
use lijn_relay::infra::delijn::DeLijnClient;
use lijn_relay::infra::openweather::OpenWeatherClient;
use lijn_relay::infra::tomtom::TomTomClient;
use lijn_relay::services::{RequestStopCache, TransitApi};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "lijn_relay")]
#[command(about = "Aggregates De Lijn, weather and routing data behind a small REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: String,

        /// Number of HTTP worker threads
        #[arg(short, long, default_value_t = 4)]
        workers: usize,

        /// What to do with a vehicle whose schedule disagrees with the clock
        #[arg(long, value_enum, default_value_t = OutOfRangePolicy::Discard)]
        out_of_range: OutOfRangePolicy,
    },
    /// Estimate the vehicle positions of one line and log them
    Vehicles {
        /// Entity number of the line
        entity: u32,

        /// Line number
        line: u32,

        /// HEEN or TERUG
        direction: String,

        /// What to do with a vehicle whose schedule disagrees with the clock
        #[arg(long, value_enum, default_value_t = OutOfRangePolicy::Discard)]
        out_of_range: OutOfRangePolicy,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/lijn_relay.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("lijn_relay.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Serve {
            bind,
            workers,
            out_of_range,
        } => {
            config.out_of_range = out_of_range;
            let state = build_state(&config)?;
            info!(?out_of_range, "Starting REST API");
            api::serve(state, &bind, workers)
                .await
                .with_context(|| format!("HTTP server on {bind} failed"))?;
        }
        Commands::Vehicles {
            entity,
            line,
            direction,
            out_of_range,
        } => {
            let direction = direction.parse()?;
            let transit = DeLijnClient::from_config(&config)?;
            let router = TomTomClient::from_config(&config)?;

            let rides = transit.schedule(entity, line, direction, None).await?;
            let locator = RequestStopCache::new(&transit);
            let positions =
                estimate_vehicles(&rides, SystemClock.now(), out_of_range, &locator, &router).await;

            info!(rides = rides.len(), vehicles = positions.len(), "Vehicle positions estimated");
            for position in &positions {
                info!(lat = position.lat, lng = position.lng, "Vehicle");
            }
        }
    }

    Ok(())
}

/// Builds the production collaborators from `config`.
fn build_state(config: &Config) -> Result<AppState> {
    Ok(AppState {
        transit: Arc::new(DeLijnClient::from_config(config)?),
        weather: Arc::new(OpenWeatherClient::from_config(config)?),
        router: Arc::new(TomTomClient::from_config(config)?),
        clock: Arc::new(SystemClock),
        out_of_range: config.out_of_range,
    })
}
