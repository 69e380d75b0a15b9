//! Reductions over fully loaded tables that back the dashboard endpoints.
//!
//! Everything in here is synchronous and works on slices of the entity types
//! from `common`, so the same code runs against the database and the in-memory
//! store.

use std::collections::HashMap;

pub mod collection;
pub mod dashboard;
pub mod grenades;
pub mod maps;
pub mod matches;
pub mod players;
pub mod rankings;
pub mod teams;

pub(crate) fn stats_by_player(
    stats: &[common::MatchPlayerStats],
) -> HashMap<i32, Vec<&common::MatchPlayerStats>> {
    let mut grouped: HashMap<i32, Vec<&common::MatchPlayerStats>> = HashMap::new();
    for entry in stats {
        grouped.entry(entry.player_id).or_default().push(entry);
    }
    grouped
}

pub(crate) fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    average(part as f64 * 100.0, total)
}
