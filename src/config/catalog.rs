//! Track and incident reference catalogs
//!
//! The track catalog maps track/layout/car-class combinations to reference
//! lap times, and the incident catalog defines the labels, penalty weights
//! and draw probabilities used by the lap synthesizer. Both ship with a
//! built-in default and can be replaced from TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Policy applied when no reference lap exists for a combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BaselinePolicy {
    /// Treat the missing reference as a configuration error
    Fail,
    /// Sample a bounded random baseline instead
    FallbackRandom { min_ms: u64, max_ms: u64 },
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        Self::FallbackRandom {
            min_ms: 60_000,
            max_ms: 120_000,
        }
    }
}

impl BaselinePolicy {
    /// Validate policy parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if let Self::FallbackRandom { min_ms, max_ms } = self {
            if min_ms == &0 || min_ms >= max_ms {
                return Err(crate::error::SimulationError::Configuration {
                    message: "Fallback baseline range must satisfy 0 < min < max".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// A track and the layouts it can be raced on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackVenue {
    pub track: String,
    pub layouts: Vec<String>,
}

/// Best known lap for one track/layout/car-class combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLap {
    pub track: String,
    pub layout: String,
    pub car_class: String,
    pub best_lap_ms: u64,
}

/// Catalog of tracks, car classes and reference laps
///
/// Not every combination needs a reference lap; missing combinations are
/// resolved through the configured [`BaselinePolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackCatalog {
    pub venues: Vec<TrackVenue>,
    pub car_classes: Vec<String>,
    pub reference_laps: Vec<ReferenceLap>,
}

fn venue(track: &str, layouts: &[&str]) -> TrackVenue {
    TrackVenue {
        track: track.to_string(),
        layouts: layouts.iter().map(|l| l.to_string()).collect(),
    }
}

fn reference(track: &str, layout: &str, car_class: &str, best_lap_ms: u64) -> ReferenceLap {
    ReferenceLap {
        track: track.to_string(),
        layout: layout.to_string(),
        car_class: car_class.to_string(),
        best_lap_ms,
    }
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self {
            venues: vec![
                venue("Monza", &["Grand Prix", "Junior"]),
                venue("Spa-Francorchamps", &["Grand Prix"]),
                venue("Brands Hatch", &["Grand Prix", "Indy"]),
                venue("Hungaroring", &["Grand Prix"]),
                venue("Silverstone", &["Grand Prix", "National"]),
            ],
            car_classes: vec!["GT3".to_string(), "GT4".to_string(), "TCR".to_string()],
            reference_laps: vec![
                reference("Monza", "Grand Prix", "GT3", 108_000),
                reference("Monza", "Grand Prix", "GT4", 115_800),
                reference("Monza", "Junior", "GT4", 62_500),
                reference("Spa-Francorchamps", "Grand Prix", "GT3", 138_200),
                reference("Spa-Francorchamps", "Grand Prix", "GT4", 147_500),
                reference("Brands Hatch", "Grand Prix", "GT3", 84_400),
                reference("Brands Hatch", "Indy", "TCR", 55_300),
                reference("Hungaroring", "Grand Prix", "GT3", 104_300),
                reference("Silverstone", "Grand Prix", "GT3", 118_700),
                reference("Silverstone", "National", "GT4", 63_900),
            ],
        }
    }
}

impl TrackCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read track catalog {}", path.display()))?;
        let catalog: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse track catalog {}", path.display()))?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Look up the reference lap time for a combination
    pub fn reference_lap_ms(&self, track: &str, layout: &str, car_class: &str) -> Option<u64> {
        self.reference_laps
            .iter()
            .find(|r| r.track == track && r.layout == layout && r.car_class == car_class)
            .map(|r| r.best_lap_ms)
    }

    /// Validate catalog contents
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.venues.is_empty() {
            return Err(crate::error::SimulationError::Configuration {
                message: "Track catalog has no venues".to_string(),
            }
            .into());
        }
        if self.car_classes.is_empty() {
            return Err(crate::error::SimulationError::Configuration {
                message: "Track catalog has no car classes".to_string(),
            }
            .into());
        }
        for venue in &self.venues {
            if venue.layouts.is_empty() {
                return Err(crate::error::SimulationError::Configuration {
                    message: format!("Venue {} has no layouts", venue.track),
                }
                .into());
            }
        }
        for reference in &self.reference_laps {
            if reference.best_lap_ms == 0 {
                return Err(crate::error::SimulationError::Configuration {
                    message: format!(
                        "Reference lap for {}/{}/{} cannot be zero",
                        reference.track, reference.layout, reference.car_class
                    ),
                }
                .into());
            }
            let known_venue = self.venues.iter().any(|v| {
                v.track == reference.track && v.layouts.contains(&reference.layout)
            });
            if !known_venue || !self.car_classes.contains(&reference.car_class) {
                return Err(crate::error::SimulationError::Configuration {
                    message: format!(
                        "Reference lap for unknown combination {}/{}/{}",
                        reference.track, reference.layout, reference.car_class
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// A labeled infraction and the penalty points it carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentEntry {
    pub label: String,
    pub points: u32,
}

/// Catalog of incident labels and draw probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentCatalog {
    pub incidents: Vec<IncidentEntry>,
    /// Weights for drawing 0, 1, ... incidents on a single lap
    pub count_weights: Vec<u32>,
    /// Label only ever assigned on the first lap of a race
    pub first_lap_only: String,
    /// Label that invalidates the lap it occurs on
    pub invalidating: String,
}

fn incident(label: &str, points: u32) -> IncidentEntry {
    IncidentEntry {
        label: label.to_string(),
        points,
    }
}

impl Default for IncidentCatalog {
    fn default() -> Self {
        Self {
            incidents: vec![
                incident("Track Limit", 1),
                incident("False Start", 2),
                incident("Blocking", 2),
                incident("Unsafe Rejoin", 3),
                incident("Collision", 4),
            ],
            count_weights: vec![70, 25, 5],
            first_lap_only: "False Start".to_string(),
            invalidating: "Track Limit".to_string(),
        }
    }
}

impl IncidentCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read incident catalog {}", path.display()))?;
        let catalog: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse incident catalog {}", path.display()))?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Penalty points for a label, if it exists
    pub fn points_for(&self, label: &str) -> Option<u32> {
        self.incidents
            .iter()
            .find(|i| i.label == label)
            .map(|i| i.points)
    }

    /// Whether the label invalidates the lap it occurs on
    pub fn invalidates(&self, label: &str) -> bool {
        label == self.invalidating
    }

    /// Entries that may be drawn on the given lap
    pub fn candidates(&self, first_lap: bool) -> Vec<&IncidentEntry> {
        self.incidents
            .iter()
            .filter(|i| first_lap || i.label != self.first_lap_only)
            .collect()
    }

    /// Validate catalog contents
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.incidents.is_empty() {
            return Err(crate::error::SimulationError::Configuration {
                message: "Incident catalog has no entries".to_string(),
            }
            .into());
        }
        if self.count_weights.len() < 2 || self.count_weights.iter().all(|w| *w == 0) {
            return Err(crate::error::SimulationError::Configuration {
                message: "Incident count weights need at least two entries and one nonzero weight"
                    .to_string(),
            }
            .into());
        }
        for designated in [&self.first_lap_only, &self.invalidating] {
            if self.points_for(designated).is_none() {
                return Err(crate::error::SimulationError::Configuration {
                    message: format!("Designated incident label {} is not in the catalog", designated),
                }
                .into());
            }
        }
        Ok(())
    }
}
