//! Paddock Club - Racing league season simulator
//!
//! This crate synthesizes full seasons of online racing: lap-by-lap race
//! simulation, pairwise rating updates, driver reputation tracking, and
//! JSON/CSV export of every result.

pub mod config;
pub mod error;
pub mod export;
pub mod race;
pub mod rating;
pub mod roster;
pub mod schedule;
pub mod season;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, SimulationError};
pub use types::*;

// Re-export key components
pub use export::ResultSink;
pub use season::{SeasonRunner, SeasonSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
