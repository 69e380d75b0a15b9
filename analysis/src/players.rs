use std::collections::HashMap;

use common::stats::PlayerWithStats;
use common::{MatchPlayerStats, Player, Team};

/// Averages every player's per-match stat rows.
///
/// Players without any rows are kept with all numbers at zero. A row without a
/// rating counts as a rating of zero.
pub fn with_stats(
    players: &[Player],
    teams: &[Team],
    stats: &[MatchPlayerStats],
) -> Vec<PlayerWithStats> {
    let teams: HashMap<i32, &Team> = teams.iter().map(|t| (t.id, t)).collect();
    let by_player = crate::stats_by_player(stats);

    players
        .iter()
        .map(|player| {
            let rows = by_player
                .get(&player.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let matches_played = rows.len();

            let kills: f64 = rows.iter().map(|s| s.kills as f64).sum();
            let deaths: f64 = rows.iter().map(|s| s.deaths as f64).sum();
            let rating: f64 = rows.iter().map(|s| s.rating.unwrap_or(0.0)).sum();

            PlayerWithStats {
                player: player.clone(),
                team: player
                    .team_id
                    .and_then(|id| teams.get(&id))
                    .map(|t| (*t).clone()),
                avg_kills: crate::average(kills, matches_played),
                avg_deaths: crate::average(deaths, matches_played),
                avg_rating: crate::average(rating, matches_played),
                total_grenade_kills: rows.iter().map(|s| s.grenade_kills()).sum(),
                matches_played,
            }
        })
        .collect()
}
