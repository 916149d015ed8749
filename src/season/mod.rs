//! Season orchestration

pub mod runner;

// Re-export commonly used types
pub use runner::{SeasonRunner, SeasonSummary};
