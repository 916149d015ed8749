//! Utility functions for the league simulation

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated race identifiers
const RACE_ID_LEN: usize = 6;

/// Generate a 6-character alphanumeric race ID from the given RNG
pub fn generate_race_id(rng: &mut impl Rng) -> String {
    (0..RACE_ID_LEN)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round a value to 3 decimal places
///
/// All stored rating and reputation values go through this so that exported
/// numbers stay stable across serialization round trips.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Format a lap or total time in milliseconds as "m:ss.mmm"
pub fn format_lap_time(time_ms: u64) -> String {
    let minutes = time_ms / 60_000;
    let seconds = (time_ms % 60_000) / 1000;
    let millis = time_ms % 1000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_race_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_race_id(&mut rng);
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_race_id_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        assert_eq!(generate_race_id(&mut rng1), generate_race_id(&mut rng2));
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-0.0004), -0.0);
        assert_eq!(round3(1500.0), 1500.0);
    }

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(92_345), "1:32.345");
        assert_eq!(format_lap_time(60_000), "1:00.000");
        assert_eq!(format_lap_time(599), "0:00.599");
    }
}
