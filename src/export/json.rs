//! JSON export and read-back
//!
//! One document per race under `races/`, plus season-level `players.json`
//! and `race_meta.json`. The loaders are used by the viewer binary and must
//! reproduce exactly what was written.

use crate::error::Result;
use crate::export::sink::ResultSink;
use crate::types::{Player, RaceDefinition, RaceResult};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Writes one JSON document per race plus season-level tables
#[derive(Debug)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

impl JsonExporter {
    /// Create the exporter, clearing per-race artifacts from earlier runs
    pub fn new(output_dir: &Path) -> Result<Self> {
        crate::export::prepare_races_dir(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn write_pretty<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        Ok(())
    }
}

impl ResultSink for JsonExporter {
    fn write_race(&mut self, result: &RaceResult) -> Result<()> {
        let path = race_path(&self.output_dir, &result.definition.id);
        self.write_pretty(&path, result)
    }

    fn write_players(&mut self, players: &[Player]) -> Result<()> {
        self.write_pretty(&self.output_dir.join("players.json"), &players)
    }

    fn write_schedule(&mut self, races: &[RaceDefinition]) -> Result<()> {
        self.write_pretty(&self.output_dir.join("race_meta.json"), &races)
    }
}

/// Path of one race's JSON document inside the output directory
pub fn race_path(output_dir: &Path, race_id: &str) -> PathBuf {
    output_dir.join("races").join(format!("{}.json", race_id))
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

/// Read one exported race back
pub fn load_race(output_dir: &Path, race_id: &str) -> Result<RaceResult> {
    load(&race_path(output_dir, race_id))
}

/// Read the exported player table back
pub fn load_players(output_dir: &Path) -> Result<Vec<Player>> {
    load(&output_dir.join("players.json"))
}

/// Read the exported schedule back
pub fn load_schedule(output_dir: &Path) -> Result<Vec<RaceDefinition>> {
    load(&output_dir.join("race_meta.json"))
}
