//! Player roster: generation and shared mutable league state
//!
//! The roster owns every player record for the season. Race settlement is
//! the only writer, and it writes through atomic per-race batches.

pub mod generator;
pub mod store;

// Re-export commonly used types
pub use generator::generate_players;
pub use store::{Roster, RosterUpdate};
