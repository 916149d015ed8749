//! Race simulation: lap synthesis and settlement
//!
//! The synthesizer produces per-participant lap sequences from a baseline
//! lap time; the settlement engine turns a full field of lap sequences into
//! an immutable race result and commits rating/reputation updates.

pub mod settlement;
pub mod synthesizer;

// Re-export commonly used types
pub use settlement::{RaceEngine, RaceEntry};
pub use synthesizer::{
    resolve_baseline, synthesize_laps, LapSynthesis, SynthesizedLap, FIRST_LAP_PENALTY,
};
