use std::collections::{HashMap, HashSet};

use common::stats::{MapGrenadeStats, MapOverview, MapSummary};
use common::{Kill, Match};

use crate::grenades::{self, GrenadeKind};

#[derive(Debug, Default)]
struct Tally {
    total: usize,
    he: usize,
    molotov: usize,
    matches: HashSet<i32>,
}

/// Distributes grenade deaths over the maps they happened on.
///
/// Kills that are not grenade kills, or whose match is unknown or has no map,
/// are ignored. Maps are ordered by total grenade deaths, most first.
pub fn grenade_deaths(matches: &[Match], kills: &[Kill]) -> Vec<MapGrenadeStats> {
    let map_of_match: HashMap<i32, &str> = matches
        .iter()
        .filter_map(|m| {
            m.map_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| (m.id, name))
        })
        .collect();

    let mut tallies: Vec<(&str, Tally)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for kill in kills.iter().filter(|k| k.is_grenade) {
        let map = match map_of_match.get(&kill.match_id) {
            Some(m) => *m,
            None => {
                tracing::trace!(kill = %kill.id, "Grenade kill without a known map");
                continue;
            }
        };

        let idx = *index.entry(map).or_insert_with(|| {
            tallies.push((map, Tally::default()));
            tallies.len() - 1
        });
        let tally = &mut tallies[idx].1;

        tally.total += 1;
        tally.matches.insert(kill.match_id);

        match kill.grenade_type.as_deref().and_then(grenades::classify) {
            Some(GrenadeKind::HighExplosive) => tally.he += 1,
            Some(GrenadeKind::Fire) => tally.molotov += 1,
            _ => {}
        };
    }

    let mut result: Vec<MapGrenadeStats> = tallies
        .into_iter()
        .map(|(map, tally)| MapGrenadeStats {
            map_name: map.to_owned(),
            total_grenade_deaths: tally.total,
            he_deaths: tally.he,
            molotov_deaths: tally.molotov,
            avg_deaths_per_match: crate::average(tally.total as f64, tally.matches.len()),
        })
        .collect();

    result.sort_by(|a, b| b.total_grenade_deaths.cmp(&a.total_grenade_deaths));
    result
}

pub fn overview(maps: Vec<MapGrenadeStats>) -> MapOverview {
    let total_grenade_deaths = maps.iter().map(|m| m.total_grenade_deaths).sum();
    let avg_sum: f64 = maps.iter().map(|m| m.avg_deaths_per_match).sum();

    let summary = MapSummary {
        total_maps_played: maps.len(),
        total_grenade_deaths,
        most_deadly_map: maps
            .first()
            .map(|m| m.map_name.clone())
            .unwrap_or_else(|| grenades::NOT_AVAILABLE.to_owned()),
        avg_deaths_per_match: crate::average(avg_sum, maps.len()),
    };

    MapOverview { maps, summary }
}
