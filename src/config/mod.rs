//! Configuration management for the league simulation
//!
//! This module handles all configuration loading from TOML files and
//! environment variables, validation, and default values for the simulation.

pub mod app;
pub mod catalog;
pub mod rating;

// Re-export commonly used types
pub use app::{
    validate_config, AppConfig, ExportSettings, SeasonSettings, ServiceSettings,
    SimulationSettings,
};
pub use catalog::{BaselinePolicy, IncidentCatalog, IncidentEntry, TrackCatalog, TrackVenue};
pub use rating::{FloorProtection, RatingSettings, ReputationSettings};
