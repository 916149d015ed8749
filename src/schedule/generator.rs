//! Race calendar generation
//!
//! Every race gets a random track/layout/car-class combination from the
//! catalog and a start time inside one of the season's daily windows. Times
//! snap to fixed-width slots with a little jitter and random seconds so the
//! calendar does not look machine-stamped. The returned list is unordered;
//! the season runner sorts it chronologically before processing.

use crate::config::app::SeasonSettings;
use crate::config::catalog::TrackCatalog;
use crate::error::{Result, SimulationError};
use crate::types::RaceDefinition;
use crate::utils::generate_race_id;
use chrono::{Duration, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Generate the full season calendar
pub fn generate_schedule(
    season: &SeasonSettings,
    catalog: &TrackCatalog,
    rng: &mut impl Rng,
) -> Result<Vec<RaceDefinition>> {
    catalog.validate()?;

    let start_date = season.parse_start_date()?;
    let window_open = season.parse_window_open()?;
    let window_close = season.parse_window_close()?;

    let mut races = Vec::with_capacity(season.race_count);
    let mut used_ids = HashSet::with_capacity(season.race_count);

    for _ in 0..season.race_count {
        let mut id = generate_race_id(rng);
        while !used_ids.insert(id.clone()) {
            id = generate_race_id(rng);
        }

        let car_class = catalog
            .car_classes
            .choose(rng)
            .ok_or_else(empty_catalog)?
            .clone();
        let venue = catalog.venues.choose(rng).ok_or_else(empty_catalog)?;
        let layout = venue.layouts.choose(rng).ok_or_else(empty_catalog)?.clone();

        // Pick a day, then a jittered slot inside that day's window
        let day_offset = rng.gen_range(0..season.season_days);
        let day = start_date + Duration::days(day_offset as i64);
        let window_start = day.and_time(window_open);
        let window_end = if window_close <= window_open {
            // Window closes past midnight on the following day
            (day + Duration::days(1)).and_time(window_close)
        } else {
            day.and_time(window_close)
        };

        let total_minutes = (window_end - window_start).num_minutes();
        let slot_count = total_minutes / season.slot_minutes;
        let slot_index = rng.gen_range(0..=slot_count);
        let base_minute = slot_index * season.slot_minutes;
        let jitter = rng.gen_range(-season.slot_jitter_minutes..=season.slot_jitter_minutes);
        let minute_offset = (base_minute + jitter).clamp(0, total_minutes);
        let second_offset = rng.gen_range(0..60);

        let naive = window_start + Duration::minutes(minute_offset) + Duration::seconds(second_offset);

        races.push(RaceDefinition {
            id,
            track: venue.track.clone(),
            layout,
            car_class,
            scheduled_start: Utc.from_utc_datetime(&naive),
        });
    }

    Ok(races)
}

fn empty_catalog() -> anyhow::Error {
    SimulationError::Configuration {
        message: "Track catalog is empty".to_string(),
    }
    .into()
}
