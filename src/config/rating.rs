//! Rating and reputation update configuration
//!
//! These settings drive the pairwise rating update and the reputation
//! adjustment applied after every race settlement.

use serde::{Deserialize, Serialize};

/// Configuration for the pairwise rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// K-factor scaling each pairwise comparison
    pub k_factor: f64,
    /// Lower bound ratings are clamped to after every update
    pub floor: f64,
    /// Upper bound ratings are clamped to after every update
    pub ceiling: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            floor: 1000.0,
            ceiling: 2500.0,
        }
    }
}

impl RatingSettings {
    /// Create conservative settings (slower rating changes)
    pub fn conservative() -> Self {
        Self {
            k_factor: 16.0,
            ..Self::default()
        }
    }

    /// Create aggressive settings (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            k_factor: 64.0,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor <= 0.0 {
            return Err(crate::error::SimulationError::Configuration {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.floor >= self.ceiling {
            return Err(crate::error::SimulationError::Configuration {
                message: "Rating floor must be below the ceiling".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Policy applied when a reputation update would drop below the floor
///
/// The floor is asymmetric on purpose: there is no matching ceiling
/// protection, only the final clamp to [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FloorProtection {
    /// No protection, only the final clamp applies
    Off,
    /// Pin the projected value to the floor exactly
    Clamp { floor: f64 },
    /// Re-roll the projected value uniformly into [floor, floor + headroom)
    Reroll { floor: f64, headroom: f64 },
}

impl Default for FloorProtection {
    fn default() -> Self {
        Self::Reroll {
            floor: 50.0,
            headroom: 10.0,
        }
    }
}

/// Configuration for the reputation update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationSettings {
    /// Reputation lost per incident point
    pub incident_penalty: f64,
    /// Reputation gained per valid lap
    pub valid_lap_reward: f64,
    /// Bonus for finishing a race with zero incident points
    pub clean_race_bonus: f64,
    /// Lower bound of the per-race noise term
    pub noise_min: f64,
    /// Upper bound of the per-race noise term
    pub noise_max: f64,
    /// Floor-protection policy for low projected values
    pub floor_protection: FloorProtection,
}

impl Default for ReputationSettings {
    fn default() -> Self {
        Self {
            incident_penalty: 0.2,
            valid_lap_reward: 0.05,
            clean_race_bonus: 5.0,
            noise_min: -1.0,
            noise_max: 2.0,
            floor_protection: FloorProtection::default(),
        }
    }
}

impl ReputationSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.incident_penalty < 0.0 {
            return Err(crate::error::SimulationError::Configuration {
                message: "Incident penalty must be non-negative".to_string(),
            }
            .into());
        }

        if self.valid_lap_reward < 0.0 {
            return Err(crate::error::SimulationError::Configuration {
                message: "Valid lap reward must be non-negative".to_string(),
            }
            .into());
        }

        if self.noise_min >= self.noise_max {
            return Err(crate::error::SimulationError::Configuration {
                message: "Noise minimum must be below noise maximum".to_string(),
            }
            .into());
        }

        match self.floor_protection {
            FloorProtection::Off => {}
            FloorProtection::Clamp { floor } => {
                if !(0.0..=100.0).contains(&floor) {
                    return Err(crate::error::SimulationError::Configuration {
                        message: "Reputation floor must be within [0, 100]".to_string(),
                    }
                    .into());
                }
            }
            FloorProtection::Reroll { floor, headroom } => {
                if !(0.0..=100.0).contains(&floor) {
                    return Err(crate::error::SimulationError::Configuration {
                        message: "Reputation floor must be within [0, 100]".to_string(),
                    }
                    .into());
                }
                if headroom <= 0.0 || floor + headroom > 100.0 {
                    return Err(crate::error::SimulationError::Configuration {
                        message: "Reroll headroom must be positive and stay within [0, 100]"
                            .to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}
