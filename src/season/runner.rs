//! Season runner
//!
//! Drives a whole season from one seeded RNG: generates the roster and the
//! race calendar, then walks the calendar in chronological order, fielding
//! each race from the players who are free at its start time and settling
//! it against the shared roster. Results are streamed to the configured
//! export sinks as they are produced.
//!
//! A race that cannot run does not stop the season. Too few free players
//! skips the slot; a baseline or settlement error is logged and counted,
//! and the next race proceeds with the roster unchanged.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{AppConfig, IncidentCatalog, TrackCatalog};
use crate::error::{Result, SimulationError};
use crate::export::ResultSink;
use crate::race::{resolve_baseline, synthesize_laps, RaceEngine, RaceEntry};
use crate::roster::{generate_players, Roster};
use crate::schedule::{estimate_race_duration_ms, generate_schedule, AvailabilityBoard};
use crate::types::PlayerId;
use crate::utils::format_lap_time;

/// Counters describing one completed season run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonSummary {
    /// Races settled and exported
    pub races_settled: usize,
    /// Races skipped because too few players were free at the start time
    pub races_skipped: usize,
    /// Races abandoned due to a baseline or settlement error
    pub races_failed: usize,
}

/// Orchestrates a full season over one seeded RNG
pub struct SeasonRunner {
    config: AppConfig,
    tracks: TrackCatalog,
    incidents: IncidentCatalog,
}

impl SeasonRunner {
    /// Create a runner, loading catalogs from the configured files when present
    pub fn new(config: AppConfig) -> Result<Self> {
        let tracks = match &config.simulation.tracks_file {
            Some(path) => TrackCatalog::from_file(path)?,
            None => TrackCatalog::default(),
        };
        let incidents = match &config.simulation.incidents_file {
            Some(path) => IncidentCatalog::from_file(path)?,
            None => IncidentCatalog::default(),
        };
        tracks.validate()?;
        incidents.validate()?;

        Ok(Self {
            config,
            tracks,
            incidents,
        })
    }

    /// Run the season end to end, streaming results into the sinks
    ///
    /// Returns the run counters. Export failures are fatal; per-race
    /// simulation failures are not.
    pub fn run(&self, sinks: &mut [&mut dyn ResultSink]) -> Result<SeasonSummary> {
        let season = &self.config.season;
        let simulation = &self.config.simulation;

        let mut rng = StdRng::seed_from_u64(season.seed);

        let players = generate_players(season.player_count, &mut rng);
        let mut roster = Roster::new(players)?;
        info!("Generated roster of {} players", roster.len());

        let mut schedule = generate_schedule(season, &self.tracks, &mut rng)?;
        schedule.sort_by_key(|race| race.scheduled_start);
        info!(
            "Scheduled {} races across {} days",
            schedule.len(),
            season.season_days
        );

        let engine = RaceEngine::new(self.config.rating.clone(), self.config.reputation.clone())?;
        let mut availability = AvailabilityBoard::new();
        let mut summary = SeasonSummary::default();

        for definition in &schedule {
            let baseline = match resolve_baseline(
                &self.tracks,
                definition,
                &simulation.baseline_policy,
                &mut rng,
            ) {
                Ok(baseline) => baseline,
                Err(e) => {
                    warn!("Abandoning race {}: {}", definition.id, e);
                    summary.races_failed += 1;
                    continue;
                }
            };
            let duration_ms = estimate_race_duration_ms(baseline, simulation.estimated_laps);
            let estimated_end =
                definition.scheduled_start + Duration::milliseconds(duration_ms as i64);

            // Roster order keeps the candidate list stable between runs.
            let available: Vec<PlayerId> = roster
                .players()
                .iter()
                .filter(|player| availability.is_available(player.id, definition.scheduled_start))
                .map(|player| player.id)
                .collect();
            if available.len() < simulation.entrants_per_race {
                warn!(
                    "Skipping race {}: {} of {} required players free",
                    definition.id,
                    available.len(),
                    simulation.entrants_per_race
                );
                summary.races_skipped += 1;
                continue;
            }

            let mut selected: Vec<PlayerId> = available
                .choose_multiple(&mut rng, simulation.entrants_per_race)
                .copied()
                .collect();
            let lap_count = rng.gen_range(simulation.min_laps..=simulation.max_laps);
            // Shuffled order doubles as the starting grid.
            selected.shuffle(&mut rng);

            let entries = selected
                .iter()
                .enumerate()
                .map(|(index, &player_id)| {
                    let player = roster
                        .get(player_id)
                        .ok_or(SimulationError::PlayerNotFound { player_id })?;
                    let laps =
                        synthesize_laps(baseline, player, lap_count, &self.incidents, &mut rng)?;
                    Ok(RaceEntry {
                        player_id,
                        start_position: index as u32 + 1,
                        laps,
                    })
                })
                .collect::<Result<Vec<_>>>();

            let settled = entries
                .and_then(|entries| engine.settle_race(definition, entries, &mut roster, &mut rng));
            match settled {
                Ok(result) => {
                    for &player_id in &selected {
                        availability.mark_busy(player_id, estimated_end);
                    }
                    for sink in sinks.iter_mut() {
                        sink.write_race(&result)?;
                    }
                    if let Some(winner) = result.winner() {
                        debug!(
                            "Race {} at {} won by {} in {}",
                            definition.id,
                            definition.track,
                            winner.username,
                            format_lap_time(winner.total_time_ms)
                        );
                    }
                    summary.races_settled += 1;
                }
                Err(e) => {
                    warn!("Abandoning race {}: {}", definition.id, e);
                    summary.races_failed += 1;
                }
            }
        }

        for sink in sinks.iter_mut() {
            sink.write_players(roster.players())?;
            sink.write_schedule(&schedule)?;
        }

        info!(
            "Season complete: {} settled, {} skipped, {} failed",
            summary.races_settled, summary.races_skipped, summary.races_failed
        );
        Ok(summary)
    }
}
