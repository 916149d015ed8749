//! Export sink abstraction

use crate::error::Result;
use crate::types::{Player, RaceDefinition, RaceResult};

/// Destination for settled races and final league tables
///
/// The season runner writes every settled race immediately and the player
/// and schedule tables once at the end of the run.
pub trait ResultSink {
    /// Persist one settled race
    fn write_race(&mut self, result: &RaceResult) -> Result<()>;

    /// Persist the final player standings
    fn write_players(&mut self, players: &[Player]) -> Result<()>;

    /// Persist the season schedule metadata
    fn write_schedule(&mut self, races: &[RaceDefinition]) -> Result<()>;
}
