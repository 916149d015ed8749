//! Shared mutable roster state
//!
//! The roster is passed explicitly through the orchestration loop rather
//! than living in any global state, so every race's mutation is a visible,
//! testable step.

use crate::error::{Result, SimulationError};
use crate::types::{Player, PlayerId};
use std::collections::HashMap;

/// One player's post-race values, applied through [`Roster::commit_race`]
#[derive(Debug, Clone, PartialEq)]
pub struct RosterUpdate {
    pub player_id: PlayerId,
    pub new_rating: f64,
    pub new_reputation: f64,
}

/// The league's player roster
///
/// Iteration order is insertion order, which keeps player selection and
/// exports deterministic for a fixed seed.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
}

impl Roster {
    /// Build a roster from generated players
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut index = HashMap::with_capacity(players.len());
        for (position, player) in players.iter().enumerate() {
            if index.insert(player.id, position).is_some() {
                return Err(SimulationError::Configuration {
                    message: format!("Duplicate player id {} in roster", player.id),
                }
                .into());
            }
        }
        Ok(Self { players, index })
    }

    /// Number of players in the roster
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Look up a player by id
    pub fn get(&self, player_id: PlayerId) -> Option<&Player> {
        self.index.get(&player_id).map(|&i| &self.players[i])
    }

    /// All players in insertion order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Apply one race's updates as a single batch
    ///
    /// Every update is validated before any write happens, so a failed
    /// commit leaves the roster untouched. Each updated player's race count
    /// increases by one.
    pub fn commit_race(&mut self, updates: &[RosterUpdate]) -> Result<()> {
        let mut positions = Vec::with_capacity(updates.len());
        for update in updates {
            let position = self.index.get(&update.player_id).copied().ok_or(
                SimulationError::PlayerNotFound {
                    player_id: update.player_id,
                },
            )?;
            if positions.contains(&position) {
                return Err(SimulationError::PreconditionViolation {
                    reason: format!("Duplicate update for player {}", update.player_id),
                }
                .into());
            }
            positions.push(position);
        }

        for (update, position) in updates.iter().zip(positions) {
            let player = &mut self.players[position];
            player.rating = update.new_rating;
            player.reputation = update.new_reputation;
            player.race_count += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_players() -> Vec<Player> {
        vec![
            Player::new(10_000_001, "driver_one", "Dana One", "Italy", "PRIVATEER"),
            Player::new(10_000_002, "driver_two", "Toni Two", "Germany", "TEAM REDLINE"),
            Player::new(10_000_003, "driver_three", "Rae Three", "Hungary", "PEC"),
        ]
    }

    #[test]
    fn test_roster_lookup() {
        let roster = Roster::new(test_players()).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(!roster.is_empty());
        assert_eq!(roster.get(10_000_002).unwrap().username, "driver_two");
        assert!(roster.get(99_999_999).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut players = test_players();
        players.push(Player::new(10_000_001, "imposter", "Im Poster", "Spain", "PRIVATEER"));
        assert!(Roster::new(players).is_err());
    }

    #[test]
    fn test_commit_race_applies_batch() {
        let mut roster = Roster::new(test_players()).unwrap();
        let updates = vec![
            RosterUpdate {
                player_id: 10_000_001,
                new_rating: 1516.0,
                new_reputation: 80.25,
            },
            RosterUpdate {
                player_id: 10_000_003,
                new_rating: 1484.0,
                new_reputation: 71.5,
            },
        ];

        roster.commit_race(&updates).unwrap();

        let first = roster.get(10_000_001).unwrap();
        assert_eq!(first.rating, 1516.0);
        assert_eq!(first.reputation, 80.25);
        assert_eq!(first.race_count, 1);

        // Uninvolved player is untouched
        let second = roster.get(10_000_002).unwrap();
        assert_eq!(second.rating, 1500.0);
        assert_eq!(second.race_count, 0);
    }

    #[test]
    fn test_failed_commit_leaves_roster_untouched() {
        let mut roster = Roster::new(test_players()).unwrap();
        let updates = vec![
            RosterUpdate {
                player_id: 10_000_001,
                new_rating: 1516.0,
                new_reputation: 80.0,
            },
            RosterUpdate {
                player_id: 99_999_999,
                new_rating: 1484.0,
                new_reputation: 70.0,
            },
        ];

        assert!(roster.commit_race(&updates).is_err());

        let first = roster.get(10_000_001).unwrap();
        assert_eq!(first.rating, 1500.0);
        assert_eq!(first.race_count, 0);
    }

    #[test]
    fn test_duplicate_update_rejected() {
        let mut roster = Roster::new(test_players()).unwrap();
        let update = RosterUpdate {
            player_id: 10_000_001,
            new_rating: 1510.0,
            new_reputation: 76.0,
        };

        assert!(roster.commit_race(&[update.clone(), update]).is_err());
        assert_eq!(roster.get(10_000_001).unwrap().race_count, 0);
    }
}
