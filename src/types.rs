//! Common types used throughout the league simulation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for players (8-digit numeric id)
pub type PlayerId = u64;

/// Unique identifier for races (6-character alphanumeric code)
pub type RaceId = String;

/// Rating every new player starts from
pub const INITIAL_RATING: f64 = 1500.0;

/// Reputation every new player starts from
pub const INITIAL_REPUTATION: f64 = 75.0;

/// A league driver
///
/// `rating`, `reputation` and `race_count` are mutable league state; the
/// settlement engine is the only component that writes them, and only as an
/// atomic per-race batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub full_name: String,
    pub nationality: String,
    pub team: String,
    pub rating: f64,
    pub reputation: f64,
    pub race_count: u32,
}

impl Player {
    /// Create a new player with league-default rating and reputation
    pub fn new(
        id: PlayerId,
        username: impl Into<String>,
        full_name: impl Into<String>,
        nationality: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            full_name: full_name.into(),
            nationality: nationality.into(),
            team: team.into(),
            rating: INITIAL_RATING,
            reputation: INITIAL_REPUTATION,
            race_count: 0,
        }
    }
}

/// Schedule entry for one race; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceDefinition {
    pub id: RaceId,
    pub track: String,
    pub layout: String,
    pub car_class: String,
    pub scheduled_start: DateTime<Utc>,
}

/// One completed lap as exported
///
/// `position` is the participant's final finish position, back-filled during
/// settlement once every participant's total time is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    pub lap: u32,
    pub time_ms: u64,
    pub valid: bool,
    pub position: u32,
    pub incidents: Vec<String>,
}

/// Rating and reputation bookkeeping for one participant in one race
///
/// `rating_change` and `reputation_change` are the applied deltas rounded to
/// 3 decimals; the post-race values live on [`ParticipantOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDelta {
    pub rating_before: f64,
    pub rating_change: f64,
    pub reputation_before: f64,
    pub reputation_change: f64,
}

/// Final, immutable record of one participant's race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantOutcome {
    pub player_id: PlayerId,
    pub username: String,
    pub start_position: u32,
    pub finish_position: u32,
    pub incident_points: u32,
    pub total_time_ms: u64,
    pub ratings: RatingDelta,
    pub new_rating: f64,
    pub new_reputation: f64,
    pub laps: Vec<LapRecord>,
}

/// A settled race: the definition plus outcomes ordered by finish position
///
/// Created once per race and never modified afterwards; this is the artifact
/// handed to export sinks and read back by the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub definition: RaceDefinition,
    pub outcomes: Vec<ParticipantOutcome>,
}

impl RaceResult {
    /// The outcome that finished first, if any
    pub fn winner(&self) -> Option<&ParticipantOutcome> {
        self.outcomes.first()
    }

    /// Look up a participant's outcome by player id
    pub fn outcome_for(&self, player_id: PlayerId) -> Option<&ParticipantOutcome> {
        self.outcomes.iter().find(|o| o.player_id == player_id)
    }
}
