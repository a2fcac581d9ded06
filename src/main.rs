//! CLI entry point for the subway clock.
//!
//! Fetches a realtime subway feed (or reads a saved snapshot), reshapes it
//! into per-station arrivals and prints the result as JSON.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use subway_clock::{
    config::Config,
    fetch::{BasicClient, auth::ApiKey, load_source},
    infra::mta::FeedClient,
    output::{print_json, print_pretty, write_arrivals_csv},
    parser::parse_feed,
    station::FeedUpdate,
};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "subway_clock")]
#[command(about = "Station arrivals and alerts from a GTFS-RT subway feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FeedSource {
    /// Path to a saved snapshot or URL to fetch; defaults to the configured feed
    #[arg(short, long, value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// JSON config file; without it the config is read from the environment
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every station and alert in the feed
    Status {
        #[command(flatten)]
        feed: FeedSource,

        /// Also write all arrivals to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Print one station's arrivals
    Station {
        /// Physical stop ID, without direction suffix (e.g. "723")
        #[arg(value_name = "STOP_ID")]
        stop_id: String,

        #[command(flatten)]
        feed: FeedSource,
    },
    /// Print the feed's service alerts
    Alerts {
        #[command(flatten)]
        feed: FeedSource,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/subway_clock.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("subway_clock.log"));

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

    match cli.command {
        Commands::Status { feed, csv } => {
            let update = load_update(&feed).await?;
            print_pretty(&update);
            print_json(&update)?;

            if let Some(path) = csv {
                write_arrivals_csv(&path, &update)?;
            }
        }
        Commands::Station { stop_id, feed } => {
            let update = load_update(&feed).await?;

            match update.station(&stop_id) {
                Some(station) => {
                    if let Some(next) = station.all_updates().first() {
                        info!(
                            stop_id = %stop_id,
                            trip_id = %next.trip_id,
                            arrival = %next.arrival,
                            "Next arrival"
                        );
                    }
                    print_json(station)?;
                }
                None => warn!(stop_id = %stop_id, "Stop not present in feed"),
            }
        }
        Commands::Alerts { feed } => {
            let update = load_update(&feed).await?;
            info!(count = update.alerts.len(), "Alerts in feed");
            print_json(&update.alerts)?;
        }
    }

    Ok(())
}

/// Builds the station view from `--source` if given, otherwise from the
/// configured agency feed.
async fn load_update(feed: &FeedSource) -> Result<FeedUpdate> {
    let config = match &feed.config {
        Some(path) => Some(Config::load(path)?),
        None => None,
    };

    match &feed.source {
        Some(source) => {
            let bytes = fetcher(source, config.as_ref()).await?;
            let parsed = parse_feed(&bytes)?;
            let suffixes = match &config {
                Some(config) => config.suffixes(),
                None => Config::suffixes_from_env(),
            };
            Ok(FeedUpdate::from_feed_with(&parsed, &suffixes))
        }
        None => {
            let config = match config {
                Some(config) => config,
                None => Config::from_env()?,
            };
            FeedClient::from_config(&config)?.get_feed().await
        }
    }
}

/// Loads feed data from a local file path or fetches it over HTTP, sending
/// the configured API key when there is one.
#[tracing::instrument(skip(config))]
async fn fetcher(source: &str, config: Option<&Config>) -> Result<Vec<u8>> {
    match config {
        Some(config) => {
            let client = ApiKey::x_api_key(BasicClient::new()?, &config.api_key)?;
            load_source(&client, source).await
        }
        None => load_source(&BasicClient::new()?, source).await,
    }
}
