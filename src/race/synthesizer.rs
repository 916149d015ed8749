//! Lap synthesis for one participant in one race
//!
//! Lap times follow a multiplicative model around a baseline lap time:
//! reputation and rating shift the mean, experience tightens the variance,
//! and an independent luck term adds per-lap randomness. Incidents are drawn
//! per lap from the incident catalog without replacement.

use crate::config::catalog::{BaselinePolicy, IncidentCatalog, TrackCatalog};
use crate::error::{Result, SimulationError};
use crate::types::{Player, RaceDefinition};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Multiplicative penalty applied to the opening lap of every participant
pub const FIRST_LAP_PENALTY: f64 = 1.10;

/// One synthesized lap; finish position is assigned later by settlement
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedLap {
    pub lap: u32,
    pub time_ms: u64,
    pub valid: bool,
    pub incidents: Vec<String>,
}

/// Complete lap sequence for one participant plus running totals
#[derive(Debug, Clone, PartialEq)]
pub struct LapSynthesis {
    pub laps: Vec<SynthesizedLap>,
    pub incident_points: u32,
    pub total_time_ms: u64,
}

/// Resolve the baseline lap time for a race
///
/// Falls back to a bounded random baseline when the catalog has no entry
/// and the policy permits it.
pub fn resolve_baseline(
    catalog: &TrackCatalog,
    definition: &RaceDefinition,
    policy: &BaselinePolicy,
    rng: &mut impl Rng,
) -> Result<u64> {
    match catalog.reference_lap_ms(&definition.track, &definition.layout, &definition.car_class) {
        Some(best_lap_ms) => Ok(best_lap_ms),
        None => match policy {
            BaselinePolicy::Fail => Err(SimulationError::Configuration {
                message: format!(
                    "No reference lap for {}/{}/{} and fallback is disabled",
                    definition.track, definition.layout, definition.car_class
                ),
            }
            .into()),
            BaselinePolicy::FallbackRandom { min_ms, max_ms } => {
                Ok(rng.gen_range(*min_ms..*max_ms))
            }
        },
    }
}

/// Synthesize the full lap sequence for one participant
///
/// Pure function of its inputs plus the random source; player state is read
/// but never written here.
pub fn synthesize_laps(
    baseline_ms: u64,
    player: &Player,
    lap_count: u32,
    catalog: &IncidentCatalog,
    rng: &mut impl Rng,
) -> Result<LapSynthesis> {
    if baseline_ms == 0 {
        return Err(SimulationError::PreconditionViolation {
            reason: "Baseline lap time must be positive".to_string(),
        }
        .into());
    }
    if lap_count == 0 {
        return Err(SimulationError::PreconditionViolation {
            reason: "Lap count must be positive".to_string(),
        }
        .into());
    }

    let count_distribution =
        WeightedIndex::new(&catalog.count_weights).map_err(|e| SimulationError::Configuration {
            message: format!("Invalid incident count weights: {}", e),
        })?;

    let mut laps = Vec::with_capacity(lap_count as usize);
    let mut incident_points = 0u32;
    let mut total_time_ms = 0u64;

    for lap_index in 0..lap_count {
        let reputation_effect = 1.0 + (100.0 - player.reputation) / 2000.0;
        let rating_effect = 1.0 - (player.rating - 1500.0) / 10000.0;
        let experience_noise = 1.0 + rng.gen_range(-0.02..0.02) / (player.race_count as f64 + 1.0);
        let luck = rng.gen_range(0.95..1.05);

        let mut base = baseline_ms;
        if lap_index == 0 {
            base = (base as f64 * FIRST_LAP_PENALTY) as u64;
        }

        let time_ms =
            (base as f64 * reputation_effect * rating_effect * experience_noise * luck) as u64;

        let incident_count = count_distribution.sample(rng);
        let mut candidates = catalog.candidates(lap_index == 0);
        let mut incidents = Vec::with_capacity(incident_count);
        for _ in 0..incident_count {
            if candidates.is_empty() {
                break;
            }
            let entry = candidates.swap_remove(rng.gen_range(0..candidates.len()));
            incident_points += entry.points;
            incidents.push(entry.label.clone());
        }

        let valid = !incidents.iter().any(|label| catalog.invalidates(label));

        total_time_ms += time_ms;
        laps.push(SynthesizedLap {
            lap: lap_index + 1,
            time_ms,
            valid,
            incidents,
        });
    }

    Ok(LapSynthesis {
        laps,
        incident_points,
        total_time_ms,
    })
}
