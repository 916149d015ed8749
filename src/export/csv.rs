//! CSV export
//!
//! Flat tables mirroring the JSON export: a lap table and a participant
//! table per race, plus season-level `players.csv` and `race_meta.csv`.
//! Times appear both as raw milliseconds and in "m:ss.mmm" form so the
//! tables read well without any post-processing.

use crate::error::Result;
use crate::export::sink::ResultSink;
use crate::types::{Player, RaceDefinition, RaceResult};
use crate::utils::format_lap_time;
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct LapRow<'a> {
    race_id: &'a str,
    player_id: u64,
    username: &'a str,
    lap: u32,
    time_ms: u64,
    time: String,
    position: u32,
    valid: bool,
    incidents: String,
}

#[derive(Debug, Serialize)]
struct ParticipantRow<'a> {
    race_id: &'a str,
    player_id: u64,
    username: &'a str,
    start_position: u32,
    finish_position: u32,
    incident_points: u32,
    total_time_ms: u64,
    total_time: String,
    rating_before: f64,
    rating_change: f64,
    new_rating: f64,
    reputation_before: f64,
    reputation_change: f64,
    new_reputation: f64,
}

/// Writes per-race lap/participant tables plus season-level tables
#[derive(Debug)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    /// Create the exporter, clearing per-race artifacts from earlier runs
    pub fn new(output_dir: &Path) -> Result<Self> {
        crate::export::prepare_races_dir(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn race_file(&self, race_id: &str, suffix: &str) -> PathBuf {
        self.output_dir
            .join("races")
            .join(format!("{}_{}.csv", race_id, suffix))
    }
}

impl ResultSink for CsvExporter {
    fn write_race(&mut self, result: &RaceResult) -> Result<()> {
        let race_id = result.definition.id.as_str();

        let laps_path = self.race_file(race_id, "laps");
        let mut laps = csv::Writer::from_path(&laps_path)
            .with_context(|| format!("Failed to create {}", laps_path.display()))?;
        for outcome in &result.outcomes {
            for lap in &outcome.laps {
                laps.serialize(LapRow {
                    race_id,
                    player_id: outcome.player_id,
                    username: &outcome.username,
                    lap: lap.lap,
                    time_ms: lap.time_ms,
                    time: format_lap_time(lap.time_ms),
                    position: lap.position,
                    valid: lap.valid,
                    incidents: lap.incidents.join(", "),
                })?;
            }
        }
        laps.flush()?;

        let participants_path = self.race_file(race_id, "participants");
        let mut participants = csv::Writer::from_path(&participants_path)
            .with_context(|| format!("Failed to create {}", participants_path.display()))?;
        for outcome in &result.outcomes {
            participants.serialize(ParticipantRow {
                race_id,
                player_id: outcome.player_id,
                username: &outcome.username,
                start_position: outcome.start_position,
                finish_position: outcome.finish_position,
                incident_points: outcome.incident_points,
                total_time_ms: outcome.total_time_ms,
                total_time: format_lap_time(outcome.total_time_ms),
                rating_before: outcome.ratings.rating_before,
                rating_change: outcome.ratings.rating_change,
                new_rating: outcome.new_rating,
                reputation_before: outcome.ratings.reputation_before,
                reputation_change: outcome.ratings.reputation_change,
                new_reputation: outcome.new_reputation,
            })?;
        }
        participants.flush()?;

        Ok(())
    }

    fn write_players(&mut self, players: &[Player]) -> Result<()> {
        let path = self.output_dir.join("players.csv");
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for player in players {
            writer.serialize(player)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_schedule(&mut self, races: &[RaceDefinition]) -> Result<()> {
        let path = self.output_dir.join("race_meta.csv");
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for race in races {
            writer.serialize(race)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LapRecord, ParticipantOutcome, RatingDelta};
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn sample_result() -> RaceResult {
        RaceResult {
            definition: RaceDefinition {
                id: "Ab34Cd".to_string(),
                track: "Monza".to_string(),
                layout: "Grand Prix".to_string(),
                car_class: "GT3".to_string(),
                scheduled_start: Utc.with_ymd_and_hms(2025, 11, 24, 15, 2, 17).unwrap(),
            },
            outcomes: vec![ParticipantOutcome {
                player_id: 10_000_001,
                username: "blue_07".to_string(),
                start_position: 1,
                finish_position: 1,
                incident_points: 3,
                total_time_ms: 217_450,
                ratings: RatingDelta {
                    rating_before: 1500.0,
                    rating_change: 16.0,
                    reputation_before: 75.0,
                    reputation_change: 1.2,
                },
                new_rating: 1516.0,
                new_reputation: 76.2,
                laps: vec![
                    LapRecord {
                        lap: 1,
                        time_ms: 109_350,
                        valid: false,
                        position: 1,
                        incidents: vec!["Track Limit".to_string(), "Blocking".to_string()],
                    },
                    LapRecord {
                        lap: 2,
                        time_ms: 108_100,
                        valid: true,
                        position: 1,
                        incidents: Vec::new(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_lap_table_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path()).unwrap();
        exporter.write_race(&sample_result()).unwrap();

        let laps = fs::read_to_string(dir.path().join("races/Ab34Cd_laps.csv")).unwrap();
        let lines: Vec<&str> = laps.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 laps
        assert!(lines[0].starts_with("race_id,player_id,username,lap,time_ms,time"));
        assert!(lines[1].contains("1:49.350"));
        assert!(lines[1].contains("Track Limit, Blocking"));
        assert!(lines[2].contains("1:48.100"));
    }

    #[test]
    fn test_participant_table_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path()).unwrap();
        exporter.write_race(&sample_result()).unwrap();

        let table =
            fs::read_to_string(dir.path().join("races/Ab34Cd_participants.csv")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("blue_07"));
        assert!(lines[1].contains("3:37.450"));
        assert!(lines[1].contains("1516"));
    }

    #[test]
    fn test_season_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path()).unwrap();

        let players = vec![
            Player::new(10_000_001, "blue_07", "Bela Kovacs", "Hungary", "PRIVATEER"),
            Player::new(10_000_002, "red_33", "Rita Rossi", "Italy", "TEAM REDLINE"),
        ];
        exporter.write_players(&players).unwrap();
        exporter
            .write_schedule(&[sample_result().definition])
            .unwrap();

        let players_csv = fs::read_to_string(dir.path().join("players.csv")).unwrap();
        assert_eq!(players_csv.lines().count(), 3);
        assert!(players_csv.lines().next().unwrap().contains("username"));

        let meta_csv = fs::read_to_string(dir.path().join("race_meta.csv")).unwrap();
        assert_eq!(meta_csv.lines().count(), 2);
        assert!(meta_csv.contains("Monza"));
    }
}
