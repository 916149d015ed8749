//! Season scheduling: race calendar generation and player availability
//!
//! The generator lays races into jittered slots inside daily time windows;
//! the availability board keeps players out of overlapping races.

pub mod availability;
pub mod generator;

// Re-export commonly used types
pub use availability::{estimate_race_duration_ms, AvailabilityBoard};
pub use generator::generate_schedule;
