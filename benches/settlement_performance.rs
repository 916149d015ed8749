//! Performance benchmarks for race settlement

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paddock_club::config::{IncidentCatalog, RatingSettings, ReputationSettings};
use paddock_club::race::{synthesize_laps, RaceEngine, RaceEntry};
use paddock_club::rating::{pairwise_rating_changes, RatingSnapshot};
use paddock_club::roster::Roster;
use paddock_club::types::{Player, RaceDefinition};
use paddock_club::utils::current_timestamp;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_players(count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| {
            let mut player = Player::new(
                10_000_000 + i as u64,
                format!("driver_{}", i),
                format!("Bench Driver {}", i),
                "DE",
                "PRIVATEER",
            );
            player.rating = 1400.0 + (i as f64 * 25.0);
            player
        })
        .collect()
}

fn bench_definition() -> RaceDefinition {
    RaceDefinition {
        id: "bench01".to_string(),
        track: "Monza".to_string(),
        layout: "Grand Prix".to_string(),
        car_class: "GT3".to_string(),
        scheduled_start: current_timestamp(),
    }
}

fn bench_pairwise_rating_changes(c: &mut Criterion) {
    let settings = RatingSettings::default();
    let snapshots: Vec<RatingSnapshot> = (0..8)
        .map(|i| RatingSnapshot {
            rating_before: 1400.0 + (i as f64 * 25.0),
            total_time_ms: 900_000 + (i as u64 * 1_500),
        })
        .collect();

    c.bench_function("pairwise_rating_changes_8_players", |b| {
        b.iter(|| black_box(pairwise_rating_changes(&snapshots, &settings)))
    });
}

fn bench_lap_synthesis(c: &mut Criterion) {
    let catalog = IncidentCatalog::default();
    let players = bench_players(1);

    c.bench_function("lap_synthesis_10_laps", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            black_box(synthesize_laps(108_000, &players[0], 10, &catalog, &mut rng))
        })
    });
}

fn bench_race_settlement(c: &mut Criterion) {
    let engine = RaceEngine::new(RatingSettings::default(), ReputationSettings::default()).unwrap();
    let catalog = IncidentCatalog::default();
    let definition = bench_definition();
    let players = bench_players(3);

    c.bench_function("race_settlement_3_players", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            let mut roster = Roster::new(players.clone()).unwrap();

            let entries: Vec<RaceEntry> = players
                .iter()
                .enumerate()
                .map(|(index, player)| RaceEntry {
                    player_id: player.id,
                    start_position: index as u32 + 1,
                    laps: synthesize_laps(108_000, player, 10, &catalog, &mut rng).unwrap(),
                })
                .collect();

            black_box(engine.settle_race(&definition, entries, &mut roster, &mut rng))
        })
    });
}

criterion_group!(
    benches,
    bench_pairwise_rating_changes,
    bench_lap_synthesis,
    bench_race_settlement
);
criterion_main!(benches);
