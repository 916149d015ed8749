//! Test fixtures and mock implementations for integration testing

use paddock_club::config::AppConfig;
use paddock_club::error::Result;
use paddock_club::export::ResultSink;
use paddock_club::types::{Player, RaceDefinition, RaceResult};

/// Sink that keeps everything written to it in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    races: Vec<RaceResult>,
    players: Vec<Player>,
    schedule: Vec<RaceDefinition>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Races written so far, in write order
    pub fn races(&self) -> &[RaceResult] {
        &self.races
    }

    /// Final player table
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Full season calendar
    pub fn schedule(&self) -> &[RaceDefinition] {
        &self.schedule
    }
}

impl ResultSink for MemorySink {
    fn write_race(&mut self, result: &RaceResult) -> Result<()> {
        self.races.push(result.clone());
        Ok(())
    }

    fn write_players(&mut self, players: &[Player]) -> Result<()> {
        self.players = players.to_vec();
        Ok(())
    }

    fn write_schedule(&mut self, schedule: &[RaceDefinition]) -> Result<()> {
        self.schedule = schedule.to_vec();
        Ok(())
    }
}

/// Season configuration small enough for fast test runs
pub fn test_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.season.seed = seed;
    config.season.player_count = 16;
    config.season.race_count = 60;
    config
}
