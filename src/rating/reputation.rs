//! Reputation adjustments derived from driving behavior
//!
//! Reputation moves on incident points and clean laps rather than finishing
//! order. Each term is rounded to 3 decimals before it enters the sum so the
//! recorded delta matches the exported numbers exactly.

use crate::config::rating::{FloorProtection, ReputationSettings};
use crate::utils::round3;
use rand::Rng;

/// Per-participant inputs to the reputation update
#[derive(Debug, Clone, PartialEq)]
pub struct ReputationInput {
    pub reputation_before: f64,
    pub incident_points: u32,
    pub valid_laps: u32,
}

/// Result of the reputation update for one participant
#[derive(Debug, Clone, PartialEq)]
pub struct ReputationOutcome {
    /// Recorded delta; floor protection does not rewrite it
    pub reputation_change: f64,
    /// Post-race reputation, rounded and clamped to [0, 100]
    pub new_reputation: f64,
}

/// Compute the reputation change for one participant
///
/// Draws the noise term from the given RNG, and a second value only when the
/// re-roll floor protection triggers.
pub fn reputation_update(
    input: &ReputationInput,
    settings: &ReputationSettings,
    rng: &mut impl Rng,
) -> ReputationOutcome {
    let mut change = 0.0;

    if input.incident_points > 0 {
        change += round3(-settings.incident_penalty * input.incident_points as f64);
    }

    change += round3(input.valid_laps as f64 * settings.valid_lap_reward);

    if input.incident_points == 0 {
        change += settings.clean_race_bonus;
    }

    change += round3(rng.gen_range(settings.noise_min..settings.noise_max));

    let mut projected = input.reputation_before + change;
    match settings.floor_protection {
        FloorProtection::Off => {}
        FloorProtection::Clamp { floor } => {
            if projected < floor {
                projected = floor;
            }
        }
        FloorProtection::Reroll { floor, headroom } => {
            if projected < floor {
                projected = floor + rng.gen_range(0.0..headroom);
            }
        }
    }

    ReputationOutcome {
        reputation_change: change,
        new_reputation: round3(projected).clamp(0.0, 100.0),
    }
}
