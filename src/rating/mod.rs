//! Rating and reputation updates driven by race results
//!
//! This module provides the pairwise rating calculation over pre-race
//! snapshots and the reputation adjustment applied after every race,
//! using the skillratings crate for expected scores.

pub mod elo;
pub mod reputation;

// Re-export commonly used types
pub use elo::{pairwise_rating_changes, RatingOutcome, RatingSnapshot};
pub use reputation::{reputation_update, ReputationInput, ReputationOutcome};
