use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use sunmark_client::{BackendClient, FixedLocation, FlowOutcome, MarkerSession};
use sunmark_core::{format_timestamp, sun_times, tile_for, AppConfig, Coordinate};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sunmark")]
#[command(about = "Compare your sunrise and sunset with somewhere else in the world")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print sunrise and sunset (UTC) for a position.
    SunTimes {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Calendar date (`YYYY-MM-DD`); defaults to today (UTC).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Run one click flow with the device located at the given position.
    Click {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Print the map tile URL covering a position.
    Tile {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Defaults to `SUNMARK_MAP_ZOOM`.
        #[arg(long)]
        zoom: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if needs_config(&cli.command) {
        Some(sunmark_core::load_app_config()?)
    } else {
        None
    };
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(config.as_ref().map_or("info", |c| c.log_level.as_str()))
    })?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::SunTimes { lat, lon, date } => {
            let position = Coordinate::new(lat, lon)?;
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let sun = sun_times(position, date)?;
            println!("position: {position}");
            println!("date:     {date}");
            println!("sunrise:  {}", format_timestamp(sun.sunrise));
            println!("sunset:   {}", format_timestamp(sun.sunset));
        }
        Commands::Click { lat, lon } => {
            let config = config.context("configuration not loaded")?;
            let position = Coordinate::new(lat, lon)?;
            run_click(&config, position).await?;
        }
        Commands::Tile { lat, lon, zoom } => {
            let config = config.context("configuration not loaded")?;
            let position = Coordinate::new(lat, lon)?;
            let tiles = config.tile_source();
            let tile = tile_for(position, zoom.unwrap_or(config.map_zoom));
            println!("{}", tiles.tile_url(tile));
            println!("{}", tiles.attribution);
        }
    }

    Ok(())
}

/// `sun-times` is pure computation; an invalid environment must not break it.
fn needs_config(command: &Commands) -> bool {
    !matches!(command, Commands::SunTimes { .. })
}

async fn run_click(config: &AppConfig, position: Coordinate) -> anyhow::Result<()> {
    let client = BackendClient::new(
        &config.backend_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build backend client")?;
    let session = MarkerSession::new(FixedLocation(position), client, config.map_view());

    let outcome = session.handle_click().await;
    if let Some(popup) = session.popup().await {
        println!("{popup}");
    }

    match outcome {
        FlowOutcome::Enriched { persisted, .. } => {
            tracing::info!(persisted, "click flow finished");
            Ok(())
        }
        FlowOutcome::NoSunEvents(e) => {
            tracing::info!(error = %e, "click flow stopped before enrichment");
            Ok(())
        }
        FlowOutcome::NetworkFailure(e) | FlowOutcome::ParseFailure(e) => {
            Err(anyhow::Error::new(e).context("enrichment failed"))
        }
        FlowOutcome::LocationUnavailable(e) => Err(anyhow::Error::new(e)),
    }
}
