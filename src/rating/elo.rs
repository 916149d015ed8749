//! Pairwise Elo rating updates over race results
//!
//! Every participant is compared against every other participant of the same
//! race. The expected score comes from the classic Elo curve via the
//! skillratings crate; the actual score is decided by total race time. The
//! accumulated change is normalized by field size so large grids do not
//! produce outsized swings.

use crate::config::rating::RatingSettings;
use crate::error::{Result, SimulationError};
use crate::utils::round3;
use skillratings::elo::{expected_score, EloRating};
use std::cmp::Ordering;

/// Pre-race view of one participant, the only inputs the update may read
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSnapshot {
    pub rating_before: f64,
    pub total_time_ms: u64,
}

/// Result of the rating update for one participant
#[derive(Debug, Clone, PartialEq)]
pub struct RatingOutcome {
    /// Applied delta, rounded to 3 decimals for the exported record
    pub rating_change: f64,
    /// Post-race rating, rounded and clamped to the configured bounds
    pub new_rating: f64,
}

/// Compute rating changes for a full field of participants
///
/// Pure function over the pre-race snapshots: ratings are never re-read
/// mid-loop, so the result is independent of iteration order. Returned
/// outcomes are index-aligned with the input slice.
pub fn pairwise_rating_changes(
    snapshots: &[RatingSnapshot],
    settings: &RatingSettings,
) -> Result<Vec<RatingOutcome>> {
    if snapshots.len() < 2 {
        return Err(SimulationError::InsufficientParticipants {
            found: snapshots.len(),
        }
        .into());
    }

    let elo_ratings: Vec<EloRating> = snapshots
        .iter()
        .map(|s| EloRating {
            rating: s.rating_before,
        })
        .collect();

    let field_size = (snapshots.len() - 1) as f64;
    let mut outcomes = Vec::with_capacity(snapshots.len());

    for (i, snapshot) in snapshots.iter().enumerate() {
        let mut accumulated = 0.0;
        for (j, opponent) in snapshots.iter().enumerate() {
            if i == j {
                continue;
            }

            let (expected, _) = expected_score(&elo_ratings[i], &elo_ratings[j]);
            let actual = match snapshot.total_time_ms.cmp(&opponent.total_time_ms) {
                Ordering::Less => 1.0,
                Ordering::Greater => 0.0,
                Ordering::Equal => 0.5,
            };

            accumulated += settings.k_factor * (actual - expected);
        }

        let raw_change = accumulated / field_size;
        outcomes.push(RatingOutcome {
            rating_change: round3(raw_change),
            new_rating: round3(snapshot.rating_before + raw_change)
                .clamp(settings.floor, settings.ceiling),
        });
    }

    Ok(outcomes)
}
