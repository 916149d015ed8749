//! Random roster generation
//!
//! Produces a field of fictitious drivers with unique 8-digit ids, usernames
//! derived from their real names, and a team distribution dominated by
//! privateers.

use crate::types::Player;
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Bence", "Carlo", "Daniel", "Emil", "Felix", "Gergo", "Hugo", "Ivan", "Jan",
    "Kristof", "Luca", "Marco", "Nico", "Oscar", "Peter", "Rafael", "Samu", "Tomas", "Viktor",
    "Willem", "Yannick", "Zoltan", "Mate",
];

const LAST_NAMES: &[&str] = &[
    "Kovacs", "Nagy", "Szabo", "Horvath", "Bakker", "Visser", "Rossi", "Ricci", "Fischer",
    "Weber", "Novak", "Dvorak", "Silva", "Santos", "Janssen", "Mercier", "Moreau", "Lindqvist",
    "Berg", "Kowalski", "Nowak", "Costa", "Keller", "Toth",
];

const NATIONALITIES: &[&str] = &[
    "Hungary", "Germany", "Italy", "Netherlands", "France", "Poland", "Portugal", "Sweden",
];

const USERNAME_TAGS: &[&str] = &[
    "the_goat", "max", "PR0F", "the_ApexHunter", "ChicaneKing", "Slipstreamer", "on_twitch",
    "twitch", "yt", "Cr1t1c4l", "HS", "b00st3d",
];

const TEAM_NAMES: &[&str] = &[
    "TEAM REDLINE", "APEX HUNTERS", "Low Fuel Motorsport", "PetrolHead Simracing",
];

const TEAM_SUFFIXES: &[&str] = &["SIM RACING", "ESPORT", "RACING", "Motorsport", "Racing Team"];

fn pick<'a>(pool: &[&'a str], rng: &mut impl Rng) -> &'a str {
    pool.choose(rng).copied().unwrap_or("")
}

fn make_username(first: &str, last: &str, rng: &mut impl Rng) -> String {
    let base = if rng.gen_bool(0.5) { first } else { last };
    // Numeric suffixes dominate, gamer tags fill the rest
    if rng.gen_bool(0.75) {
        format!("{}_{}", base, rng.gen_range(0..100))
    } else {
        format!("{}_{}", base, pick(USERNAME_TAGS, rng))
    }
}

fn make_team(first: &str, last: &str, nationality: &str, rng: &mut impl Rng) -> String {
    // Roughly half the grid races privateer, most of the rest for an
    // established outfit, and a few start a team of their own.
    let roll = rng.gen_range(0..100);
    if roll < 50 {
        "PRIVATEER".to_string()
    } else if roll < 95 {
        pick(TEAM_NAMES, rng).to_string()
    } else {
        let base = pick(&[first, last, nationality], rng).to_uppercase();
        if rng.gen_bool(0.5) {
            format!("TEAM {}", base)
        } else {
            format!("{} {}", base, pick(TEAM_SUFFIXES, rng))
        }
    }
}

/// Generate a roster of fictitious players with unique ids
pub fn generate_players(count: usize, rng: &mut impl Rng) -> Vec<Player> {
    let mut players = Vec::with_capacity(count);
    let mut used_ids = std::collections::HashSet::with_capacity(count);

    for _ in 0..count {
        let first = pick(FIRST_NAMES, rng);
        let last = pick(LAST_NAMES, rng);
        let nationality = pick(NATIONALITIES, rng);

        let full_name = format!("{} {}", first, last);
        let username = make_username(first, last, rng);
        let team = make_team(first, last, nationality, rng);

        let mut id = rng.gen_range(10_000_000..100_000_000);
        while !used_ids.insert(id) {
            id = rng.gen_range(10_000_000..100_000_000);
        }

        players.push(Player::new(id, username, full_name, nationality, team));
    }

    players
}
