//! Main entry point for the Paddock Club season simulator
//!
//! This is the batch entry point that loads configuration, runs a full
//! simulated season, and writes the results to the configured export
//! formats.

use anyhow::Result;
use clap::Parser;
use paddock_club::config::{validate_config, AppConfig};
use paddock_club::export::{CsvExporter, JsonExporter, ResultSink};
use paddock_club::season::SeasonRunner;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Paddock Club Season Simulator - Racing League Result Generator
#[derive(Parser)]
#[command(
    name = "paddock-club",
    version,
    about = "A racing league simulator that synthesizes full seasons of race results",
    long_about = "Paddock Club is a Rust-based racing league simulator. It generates a player \
                 roster and a season calendar, synthesizes every race lap by lap, settles \
                 pairwise rating and reputation updates after each race, and exports the \
                 results as JSON and CSV."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Season seed override
    #[arg(long, value_name = "SEED", help = "Override the season RNG seed")]
    seed: Option<u64>,

    /// Player count override
    #[arg(long, value_name = "COUNT", help = "Override the number of players")]
    players: Option<usize>,

    /// Race count override
    #[arg(long, value_name = "COUNT", help = "Override the number of races")]
    races: Option<usize>,

    /// Output directory override
    #[arg(short, long, value_name = "DIR", help = "Override the output directory")]
    output_dir: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without running the season"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with run information
fn display_startup_banner(config: &AppConfig) {
    info!("🏁 Paddock Club Season Simulator");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Seed: {}", config.season.seed);
    info!("   Players: {}", config.season.player_count);
    info!("   Races: {}", config.season.race_count);
    info!(
        "   Entrants per race: {}",
        config.simulation.entrants_per_race
    );
    info!("   Output: {}", config.export.output_dir.display());
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    // Start with environment-based config
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(seed) = args.seed {
        config.season.seed = seed;
    }

    if let Some(players) = args.players {
        config.season.player_count = players;
    }

    if let Some(races) = args.races {
        config.season.race_count = races;
    }

    if let Some(output_dir) = &args.output_dir {
        config.export.output_dir = output_dir.clone();
    }

    validate_config(&config)?;

    Ok(config)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting without running the season");
        return Ok(());
    }

    display_startup_banner(&config);

    // Build the export sinks enabled by configuration
    let mut json_sink = if config.export.race_json {
        Some(JsonExporter::new(&config.export.output_dir)?)
    } else {
        None
    };
    let mut csv_sink = if config.export.race_csv {
        Some(CsvExporter::new(&config.export.output_dir)?)
    } else {
        None
    };

    let mut sinks: Vec<&mut dyn ResultSink> = Vec::new();
    if let Some(sink) = json_sink.as_mut() {
        sinks.push(sink);
    }
    if let Some(sink) = csv_sink.as_mut() {
        sinks.push(sink);
    }
    if sinks.is_empty() {
        warn!("All export formats disabled - results will not be persisted");
    }

    let output_dir = config.export.output_dir.clone();
    let runner = match SeasonRunner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            error!("Failed to initialize season runner: {}", e);
            std::process::exit(1);
        }
    };

    info!("Running season...");
    match runner.run(&mut sinks) {
        Ok(summary) => {
            info!(
                "✅ Season finished: {} races settled, {} skipped, {} failed",
                summary.races_settled, summary.races_skipped, summary.races_failed
            );
            info!("Results written to {}", output_dir.display());
            Ok(())
        }
        Err(e) => {
            error!("Season run failed: {}", e);
            std::process::exit(1);
        }
    }
}
