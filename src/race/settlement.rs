//! Race settlement: aggregation, ranking and rating commits
//!
//! Settlement runs in sequential phases over a full field of synthesized
//! laps: aggregate totals, rank by total time, update ratings against the
//! pre-race snapshots, update reputations, then commit everything back to
//! the roster as one atomic batch. No partial result is ever produced; a
//! failed settlement leaves the roster exactly as it was.

use crate::config::rating::{RatingSettings, ReputationSettings};
use crate::error::{Result, SimulationError};
use crate::race::synthesizer::{LapSynthesis, SynthesizedLap};
use crate::rating::elo::{pairwise_rating_changes, RatingSnapshot};
use crate::rating::reputation::{reputation_update, ReputationInput};
use crate::roster::store::{Roster, RosterUpdate};
use crate::types::{
    LapRecord, ParticipantOutcome, PlayerId, RaceDefinition, RaceResult, RatingDelta,
};
use crate::utils::round3;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// One selected participant's synthesized race, as handed to settlement
#[derive(Debug, Clone)]
pub struct RaceEntry {
    pub player_id: PlayerId,
    pub start_position: u32,
    pub laps: LapSynthesis,
}

/// In-progress outcome for one participant, finalized at commit time
#[derive(Debug)]
struct OutcomeBuilder {
    player_id: PlayerId,
    username: String,
    start_position: u32,
    finish_position: u32,
    incident_points: u32,
    total_time_ms: u64,
    valid_laps: u32,
    rating_before: f64,
    reputation_before: f64,
    rating_change: f64,
    reputation_change: f64,
    new_rating: f64,
    new_reputation: f64,
    laps: Vec<SynthesizedLap>,
}

impl OutcomeBuilder {
    fn finalize(self) -> ParticipantOutcome {
        let finish_position = self.finish_position;
        ParticipantOutcome {
            player_id: self.player_id,
            username: self.username,
            start_position: self.start_position,
            finish_position,
            incident_points: self.incident_points,
            total_time_ms: self.total_time_ms,
            ratings: RatingDelta {
                rating_before: self.rating_before,
                rating_change: self.rating_change,
                reputation_before: self.reputation_before,
                reputation_change: self.reputation_change,
            },
            new_rating: self.new_rating,
            new_reputation: self.new_reputation,
            laps: self
                .laps
                .into_iter()
                .map(|lap| LapRecord {
                    lap: lap.lap,
                    time_ms: lap.time_ms,
                    valid: lap.valid,
                    position: finish_position,
                    incidents: lap.incidents,
                })
                .collect(),
        }
    }
}

/// Settles races and owns the rating/reputation update rules
#[derive(Debug, Clone)]
pub struct RaceEngine {
    rating: RatingSettings,
    reputation: ReputationSettings,
}

impl RaceEngine {
    /// Create a new engine after validating its settings
    pub fn new(rating: RatingSettings, reputation: ReputationSettings) -> Result<Self> {
        rating.validate()?;
        reputation.validate()?;
        Ok(Self { rating, reputation })
    }

    /// Settle one race end to end
    ///
    /// The RNG is consumed by the reputation noise terms, drawn in finish
    /// order. The rating phase is a pure function of the pre-race snapshots
    /// and uses no randomness.
    pub fn settle_race(
        &self,
        definition: &RaceDefinition,
        entries: Vec<RaceEntry>,
        roster: &mut Roster,
        rng: &mut impl Rng,
    ) -> Result<RaceResult> {
        check_preconditions(&entries, roster)?;

        // Aggregate: snapshot pre-race state alongside lap totals
        let mut builders = Vec::with_capacity(entries.len());
        for entry in entries {
            let player =
                roster
                    .get(entry.player_id)
                    .ok_or(SimulationError::PlayerNotFound {
                        player_id: entry.player_id,
                    })?;
            let rating_before = round3(player.rating);
            let reputation_before = round3(player.reputation);
            builders.push(OutcomeBuilder {
                player_id: entry.player_id,
                username: player.username.clone(),
                start_position: entry.start_position,
                finish_position: 0,
                incident_points: entry.laps.incident_points,
                total_time_ms: entry.laps.total_time_ms,
                valid_laps: entry.laps.laps.iter().filter(|l| l.valid).count() as u32,
                rating_before,
                reputation_before,
                rating_change: 0.0,
                reputation_change: 0.0,
                new_rating: rating_before,
                new_reputation: reputation_before,
                laps: entry.laps.laps,
            });
        }

        // Rank: stable sort keeps input order on exact ties
        builders.sort_by_key(|b| b.total_time_ms);
        for (index, builder) in builders.iter_mut().enumerate() {
            builder.finish_position = index as u32 + 1;
        }

        // Rating update over the immutable pre-race snapshots
        let snapshots: Vec<RatingSnapshot> = builders
            .iter()
            .map(|b| RatingSnapshot {
                rating_before: b.rating_before,
                total_time_ms: b.total_time_ms,
            })
            .collect();
        let rating_outcomes = pairwise_rating_changes(&snapshots, &self.rating)?;
        for (builder, outcome) in builders.iter_mut().zip(&rating_outcomes) {
            builder.rating_change = outcome.rating_change;
            builder.new_rating = outcome.new_rating;
        }

        // Reputation update, noise drawn in finish order
        for builder in builders.iter_mut() {
            let input = ReputationInput {
                reputation_before: builder.reputation_before,
                incident_points: builder.incident_points,
                valid_laps: builder.valid_laps,
            };
            let outcome = reputation_update(&input, &self.reputation, rng);
            builder.reputation_change = outcome.reputation_change;
            builder.new_reputation = outcome.new_reputation;
        }

        // Commit: one atomic batch against the roster
        let updates: Vec<RosterUpdate> = builders
            .iter()
            .map(|b| RosterUpdate {
                player_id: b.player_id,
                new_rating: b.new_rating,
                new_reputation: b.new_reputation,
            })
            .collect();
        roster.commit_race(&updates)?;

        debug!(
            "Settled race {} with {} participants",
            definition.id,
            builders.len()
        );

        Ok(RaceResult {
            definition: definition.clone(),
            outcomes: builders.into_iter().map(OutcomeBuilder::finalize).collect(),
        })
    }
}

/// Fail fast on malformed fields before any state is touched
fn check_preconditions(entries: &[RaceEntry], roster: &Roster) -> Result<()> {
    if entries.len() < 2 {
        return Err(SimulationError::InsufficientParticipants {
            found: entries.len(),
        }
        .into());
    }

    let mut start_positions: Vec<u32> = entries.iter().map(|e| e.start_position).collect();
    start_positions.sort_unstable();
    if start_positions != (1..=entries.len() as u32).collect::<Vec<_>>() {
        return Err(SimulationError::PreconditionViolation {
            reason: "Start positions are not a permutation of 1..=N".to_string(),
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.player_id) {
            return Err(SimulationError::PreconditionViolation {
                reason: format!("Player {} entered twice", entry.player_id),
            }
            .into());
        }
        if roster.get(entry.player_id).is_none() {
            return Err(SimulationError::PlayerNotFound {
                player_id: entry.player_id,
            }
            .into());
        }
        if entry.laps.laps.is_empty() {
            return Err(SimulationError::PreconditionViolation {
                reason: format!("Player {} has an empty lap sequence", entry.player_id),
            }
            .into());
        }
        if entry.laps.laps.iter().any(|lap| lap.time_ms == 0) {
            return Err(SimulationError::PreconditionViolation {
                reason: format!("Player {} has a zero-length lap", entry.player_id),
            }
            .into());
        }
        let lap_total: u64 = entry.laps.laps.iter().map(|l| l.time_ms).sum();
        if lap_total != entry.laps.total_time_ms {
            return Err(SimulationError::PreconditionViolation {
                reason: format!(
                    "Player {} total time {} does not match lap sum {}",
                    entry.player_id, entry.laps.total_time_ms, lap_total
                ),
            }
            .into());
        }
    }

    Ok(())
}
