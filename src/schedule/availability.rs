//! Player availability tracking
//!
//! Races overlap on the calendar, so a player entered into one race must not
//! be selected for another until the first race's estimated duration has
//! elapsed. Durations are estimated from the baseline lap time rather than
//! simulated laps, because the estimate is needed before any lap exists.

use crate::race::synthesizer::FIRST_LAP_PENALTY;
use crate::types::PlayerId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Pace multiplier assumed for every lap after the opening one
pub const STEADY_PACE: f64 = 1.05;

/// Estimate how long a race will take from its baseline lap time
pub fn estimate_race_duration_ms(baseline_ms: u64, estimated_laps: u32) -> u64 {
    let opening = (baseline_ms as f64 * FIRST_LAP_PENALTY) as u64;
    let steady = (baseline_ms as f64 * STEADY_PACE) as u64;
    opening + steady * estimated_laps.saturating_sub(1) as u64
}

/// Tracks until when each player is tied up in a running race
#[derive(Debug, Default)]
pub struct AvailabilityBoard {
    busy_until: HashMap<PlayerId, DateTime<Utc>>,
}

impl AvailabilityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the player is free to enter a race starting at `at`
    pub fn is_available(&self, player_id: PlayerId, at: DateTime<Utc>) -> bool {
        self.busy_until
            .get(&player_id)
            .map_or(true, |until| *until <= at)
    }

    /// Mark the player as racing until the given time
    pub fn mark_busy(&mut self, player_id: PlayerId, until: DateTime<Utc>) {
        self.busy_until.insert(player_id, until);
    }
}
