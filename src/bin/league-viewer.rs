//! League Viewer CLI Tool
//!
//! Read-only command-line tool for inspecting exported season results.
//!
//! Usage:
//!   # Run a season first:
//!   cargo run
//!
//!   # Then inspect the output:
//!   cargo run --bin league-viewer -- --help
//!   cargo run --bin league-viewer leaderboard --top 10
//!   cargo run --bin league-viewer race --id aB3xYz
//!   cargo run --bin league-viewer player --id 47291038
//!   cargo run --bin league-viewer calendar

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use paddock_club::export::json::{load_players, load_race, load_schedule};
use paddock_club::types::{Player, RaceResult};
use paddock_club::utils::format_lap_time;

#[derive(Parser)]
#[command(name = "league-viewer")]
#[command(about = "Read-only viewer for exported paddock-club season results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the exported season
    #[arg(long, default_value = "league_output")]
    output_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the championship standings by rating
    Leaderboard {
        /// Number of players to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },
    /// Show the classification of a single race
    Race {
        /// Race ID
        #[arg(short, long)]
        id: String,
    },
    /// Show a player's profile and race history
    Player {
        /// Player ID
        #[arg(short, long)]
        id: u64,
    },
    /// Show the season calendar
    Calendar,
}

fn print_leaderboard(mut players: Vec<Player>, top: usize) {
    players.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    println!("🏆 Championship Standings");
    println!(
        "{:>4}  {:<24} {:<28} {:>8} {:>6} {:>6}",
        "Pos", "Driver", "Team", "Rating", "Rep", "Races"
    );
    for (index, player) in players.iter().take(top).enumerate() {
        println!(
            "{:>4}  {:<24} {:<28} {:>8.3} {:>6.1} {:>6}",
            index + 1,
            player.username,
            player.team,
            player.rating,
            player.reputation,
            player.race_count
        );
    }
}

fn print_race(result: &RaceResult) {
    let definition = &result.definition;
    println!(
        "🏁 Race {} - {} ({}) - {}",
        definition.id, definition.track, definition.layout, definition.car_class
    );
    println!("   Start: {}", definition.scheduled_start);
    println!(
        "{:>4}  {:<24} {:>5} {:>12} {:>9} {:>8} {:>4}",
        "Pos", "Driver", "Grid", "Total", "Rating Δ", "Rep Δ", "Inc"
    );
    for outcome in &result.outcomes {
        println!(
            "{:>4}  {:<24} {:>5} {:>12} {:>+9.3} {:>+8.3} {:>4}",
            outcome.finish_position,
            outcome.username,
            outcome.start_position,
            format_lap_time(outcome.total_time_ms),
            outcome.ratings.rating_change,
            outcome.ratings.reputation_change,
            outcome.incident_points
        );
    }

    for outcome in &result.outcomes {
        println!("\n   Laps - {}:", outcome.username);
        for lap in &outcome.laps {
            let marker = if lap.valid { ' ' } else { '✗' };
            let incidents = if lap.incidents.is_empty() {
                String::new()
            } else {
                format!("  [{}]", lap.incidents.join(", "))
            };
            println!(
                "   {:>3} {} {}{}",
                lap.lap,
                marker,
                format_lap_time(lap.time_ms),
                incidents
            );
        }
    }
}

fn print_player(output_dir: &Path, player: &Player) -> Result<()> {
    println!("👤 {} ({})", player.username, player.full_name);
    println!("   Team: {}", player.team);
    println!("   Nationality: {}", player.nationality);
    println!(
        "   Rating: {:.3}  Reputation: {:.1}  Races: {}",
        player.rating, player.reputation, player.race_count
    );

    let schedule = load_schedule(output_dir)?;
    println!("\n   Race history:");
    let mut starts = 0;
    for definition in &schedule {
        // Skipped races leave no result file behind.
        let result = match load_race(output_dir, &definition.id) {
            Ok(result) => result,
            Err(_) => continue,
        };
        if let Some(outcome) = result.outcome_for(player.id) {
            starts += 1;
            println!(
                "   {}  {:<20} P{}/{}  {}  rating {:.3} ({:+.3})",
                definition.id,
                definition.track,
                outcome.finish_position,
                result.outcomes.len(),
                format_lap_time(outcome.total_time_ms),
                outcome.new_rating,
                outcome.ratings.rating_change
            );
        }
    }
    if starts == 0 {
        println!("   (no races recorded)");
    }

    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Leaderboard { top } => match load_players(&cli.output_dir) {
            Ok(players) => print_leaderboard(players, top),
            Err(e) => {
                eprintln!("❌ Failed to load player table: {}", e);
                eprintln!("💡 Run the simulator first: cargo run");
                std::process::exit(1);
            }
        },

        Commands::Race { id } => match load_race(&cli.output_dir, &id) {
            Ok(result) => print_race(&result),
            Err(e) => {
                eprintln!("❌ Failed to load race '{}': {}", id, e);
                eprintln!("💡 Race IDs are listed in race_meta.json");
                std::process::exit(1);
            }
        },

        Commands::Player { id } => {
            let players = match load_players(&cli.output_dir) {
                Ok(players) => players,
                Err(e) => {
                    eprintln!("❌ Failed to load player table: {}", e);
                    std::process::exit(1);
                }
            };
            match players.iter().find(|player| player.id == id) {
                Some(player) => print_player(&cli.output_dir, player)?,
                None => {
                    eprintln!("❌ No player with ID {}", id);
                    std::process::exit(1);
                }
            }
        }

        Commands::Calendar => match load_schedule(&cli.output_dir) {
            Ok(mut schedule) => {
                schedule.sort_by_key(|race| race.scheduled_start);
                println!("📅 Season Calendar ({} races)", schedule.len());
                for race in &schedule {
                    println!(
                        "   {}  {}  {} ({}) - {}",
                        race.scheduled_start, race.id, race.track, race.layout, race.car_class
                    );
                }
            }
            Err(e) => {
                eprintln!("❌ Failed to load calendar: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
