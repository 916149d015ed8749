//! Main application configuration
//!
//! This module defines the primary configuration structures for the league
//! simulation, including TOML file loading, environment variable overrides
//! and validation.

use crate::config::catalog::BaselinePolicy;
use crate::config::rating::{RatingSettings, ReputationSettings};
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub season: SeasonSettings,
    pub simulation: SimulationSettings,
    pub rating: RatingSettings,
    pub reputation: ReputationSettings,
    pub export: ExportSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Season scheduling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSettings {
    /// Base RNG seed for the whole run
    pub seed: u64,
    /// Number of players generated for the roster
    pub player_count: usize,
    /// Number of races scheduled across the season
    pub race_count: usize,
    /// First race day of the season (YYYY-MM-DD)
    pub start_date: String,
    /// Number of consecutive race days
    pub season_days: u32,
    /// Daily window opening time (HH:MM)
    pub window_open: String,
    /// Daily window closing time, on the following day when earlier
    /// than `window_open`
    pub window_close: String,
    /// Scheduling slot width in minutes
    pub slot_minutes: i64,
    /// Maximum +/- jitter applied to a slot start in minutes
    pub slot_jitter_minutes: i64,
}

/// Race simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of entrants sampled per race
    pub entrants_per_race: usize,
    /// Minimum laps per race
    pub min_laps: u32,
    /// Maximum laps per race
    pub max_laps: u32,
    /// Lap count assumed when estimating a race's duration
    pub estimated_laps: u32,
    /// Policy applied when no baseline lap time exists for a combination
    pub baseline_policy: BaselinePolicy,
    /// Optional TOML file overriding the built-in track catalog
    pub tracks_file: Option<PathBuf>,
    /// Optional TOML file overriding the built-in incident catalog
    pub incidents_file: Option<PathBuf>,
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory race results and league tables are written to
    pub output_dir: PathBuf,
    /// Write one JSON document per race
    pub race_json: bool,
    /// Write one CSV lap table per race
    pub race_csv: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "paddock-club".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SeasonSettings {
    fn default() -> Self {
        Self {
            seed: 2025,
            player_count: 32,
            race_count: 231,
            start_date: "2025-11-24".to_string(),
            season_days: 7,
            window_open: "14:00".to_string(),
            window_close: "01:30".to_string(), // closes past midnight
            slot_minutes: 15,
            slot_jitter_minutes: 2,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            entrants_per_race: 3,
            min_laps: 3,
            max_laps: 15,
            estimated_laps: 8,
            baseline_policy: BaselinePolicy::default(),
            tracks_file: None,
            incidents_file: None,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("league_output"),
            race_json: true,
            race_csv: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Season settings
        if let Ok(seed) = env::var("SEASON_SEED") {
            config.season.seed = seed
                .parse()
                .map_err(|_| anyhow!("Invalid SEASON_SEED value: {}", seed))?;
        }
        if let Ok(players) = env::var("PLAYER_COUNT") {
            config.season.player_count = players
                .parse()
                .map_err(|_| anyhow!("Invalid PLAYER_COUNT value: {}", players))?;
        }
        if let Ok(races) = env::var("RACE_COUNT") {
            config.season.race_count = races
                .parse()
                .map_err(|_| anyhow!("Invalid RACE_COUNT value: {}", races))?;
        }
        if let Ok(start) = env::var("SEASON_START_DATE") {
            config.season.start_date = start;
        }

        // Simulation settings
        if let Ok(entrants) = env::var("ENTRANTS_PER_RACE") {
            config.simulation.entrants_per_race = entrants
                .parse()
                .map_err(|_| anyhow!("Invalid ENTRANTS_PER_RACE value: {}", entrants))?;
        }
        if let Ok(min_laps) = env::var("MIN_LAPS") {
            config.simulation.min_laps = min_laps
                .parse()
                .map_err(|_| anyhow!("Invalid MIN_LAPS value: {}", min_laps))?;
        }
        if let Ok(max_laps) = env::var("MAX_LAPS") {
            config.simulation.max_laps = max_laps
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_LAPS value: {}", max_laps))?;
        }

        // Export settings
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            config.export.output_dir = PathBuf::from(dir);
        }

        validate_config(&config)?;
        Ok(config)
    }
}

impl SeasonSettings {
    /// Parse the configured season start date
    pub fn parse_start_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")
            .map_err(|_| anyhow!("Invalid start date: {}", self.start_date))
    }

    /// Parse the daily window opening time
    pub fn parse_window_open(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.window_open, "%H:%M")
            .map_err(|_| anyhow!("Invalid window open time: {}", self.window_open))
    }

    /// Parse the daily window closing time
    pub fn parse_window_close(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.window_close, "%H:%M")
            .map_err(|_| anyhow!("Invalid window close time: {}", self.window_close))
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate season settings
    if config.season.player_count == 0 {
        return Err(anyhow!("Player count must be greater than 0"));
    }
    if config.season.race_count == 0 {
        return Err(anyhow!("Race count must be greater than 0"));
    }
    if config.season.season_days == 0 {
        return Err(anyhow!("Season must span at least one day"));
    }
    if config.season.slot_minutes < 1 {
        return Err(anyhow!("Slot width must be at least one minute"));
    }
    if config.season.slot_jitter_minutes < 0 {
        return Err(anyhow!("Slot jitter cannot be negative"));
    }
    config.season.parse_start_date()?;
    config.season.parse_window_open()?;
    config.season.parse_window_close()?;

    // Validate simulation settings
    if config.simulation.entrants_per_race < 2 {
        return Err(anyhow!(
            "Races need at least 2 entrants, got {}",
            config.simulation.entrants_per_race
        ));
    }
    if config.season.player_count < config.simulation.entrants_per_race {
        return Err(anyhow!(
            "Player count {} is smaller than entrants per race {}",
            config.season.player_count,
            config.simulation.entrants_per_race
        ));
    }
    if config.simulation.min_laps == 0 {
        return Err(anyhow!("Races need at least one lap"));
    }
    if config.simulation.max_laps < config.simulation.min_laps {
        return Err(anyhow!(
            "Max laps {} is smaller than min laps {}",
            config.simulation.max_laps,
            config.simulation.min_laps
        ));
    }
    if config.simulation.estimated_laps == 0 {
        return Err(anyhow!("Estimated laps must be greater than 0"));
    }
    config.simulation.baseline_policy.validate()?;

    // Validate rating and reputation settings
    config.rating.validate()?;
    config.reputation.validate()?;

    // Validate export settings
    if config.export.output_dir.as_os_str().is_empty() {
        return Err(anyhow!("Output directory cannot be empty"));
    }

    Ok(())
}
