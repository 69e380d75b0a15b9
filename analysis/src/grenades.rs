use std::collections::HashMap;

use common::stats::{GrenadeOverview, GrenadeStats, GrenadeSummary, TeamGrenadeStats};
use common::{MatchPlayerStats, Player, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrenadeKind {
    HighExplosive,
    Fire,
    Utility,
}

impl GrenadeKind {
    pub fn is_lethal(&self) -> bool {
        matches!(self, Self::HighExplosive | Self::Fire)
    }
}

// Weapon names as reported in kill events, without the `weapon_` prefix
pub static GRENADE_WEAPONS: phf::Map<&'static str, GrenadeKind> = phf::phf_map! {
    "hegrenade" => GrenadeKind::HighExplosive,
    "molotov" => GrenadeKind::Fire,
    "incgrenade" => GrenadeKind::Fire,
    "inferno" => GrenadeKind::Fire,
    "flashbang" => GrenadeKind::Utility,
    "smokegrenade" => GrenadeKind::Utility,
    "decoy" => GrenadeKind::Utility,
};

pub fn classify(weapon: &str) -> Option<GrenadeKind> {
    let lowered = weapon.trim().to_ascii_lowercase();
    let name = lowered.strip_prefix("weapon_").unwrap_or(lowered.as_str());
    GRENADE_WEAPONS.get(name).copied()
}

pub const UNKNOWN_TEAM: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

/// Grenade kill leaderboard: only players with at least one HE or fire kill,
/// most kills first.
pub fn leaderboard(
    players: &[Player],
    teams: &[Team],
    stats: &[MatchPlayerStats],
) -> Vec<GrenadeStats> {
    let teams: HashMap<i32, &Team> = teams.iter().map(|t| (t.id, t)).collect();
    let by_player = crate::stats_by_player(stats);

    let mut result: Vec<GrenadeStats> = players
        .iter()
        .map(|player| {
            let rows = by_player
                .get(&player.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let matches_played = rows.len();

            let he_damage: f64 = rows.iter().map(|s| s.he_grenade_damage as f64).sum();
            let bought: f64 = rows.iter().map(|s| s.he_grenades_bought as f64).sum();

            GrenadeStats {
                player_id: player.id,
                player_name: player.name.clone(),
                team_name: player
                    .team_id
                    .and_then(|id| teams.get(&id))
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| UNKNOWN_TEAM.to_owned()),
                total_he_kills: rows.iter().map(|s| s.he_grenade_kills as i64).sum(),
                total_molotov_kills: rows.iter().map(|s| s.molotov_kills as i64).sum(),
                avg_he_damage: crate::average(he_damage, matches_played),
                avg_grenades_bought: crate::average(bought, matches_played),
                matches_played,
            }
        })
        .filter(|s| s.total_kills() > 0)
        .collect();

    result.sort_by(|a, b| b.total_kills().cmp(&a.total_kills()));
    result
}

/// Summarizes a leaderboard produced by [`leaderboard`].
///
/// Per-match averages divide by the number of stored matches, or by one when
/// there are none.
pub fn overview(top_players: Vec<GrenadeStats>, match_count: usize) -> GrenadeOverview {
    let total_he_kills: i64 = top_players.iter().map(|p| p.total_he_kills).sum();
    let total_molotov_kills: i64 = top_players.iter().map(|p| p.total_molotov_kills).sum();
    let divisor = match_count.max(1) as f64;

    let mut team_stats: Vec<TeamGrenadeStats> = Vec::new();
    let mut team_index: HashMap<&str, usize> = HashMap::new();
    for player in top_players.iter() {
        let idx = *team_index
            .entry(player.team_name.as_str())
            .or_insert_with(|| {
                team_stats.push(TeamGrenadeStats {
                    team_name: player.team_name.clone(),
                    he_kills: 0,
                    molotov_kills: 0,
                    total_kills: 0,
                });
                team_stats.len() - 1
            });

        let entry = &mut team_stats[idx];
        entry.he_kills += player.total_he_kills;
        entry.molotov_kills += player.total_molotov_kills;
        entry.total_kills = entry.he_kills + entry.molotov_kills;
    }
    team_stats.sort_by(|a, b| b.total_kills.cmp(&a.total_kills));

    let summary = GrenadeSummary {
        total_he_kills,
        total_molotov_kills,
        avg_he_per_match: total_he_kills as f64 / divisor,
        avg_molotov_per_match: total_molotov_kills as f64 / divisor,
        most_deadly_player: top_players
            .first()
            .map(|p| p.player_name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        most_deadly_team: team_stats
            .first()
            .map(|t| t.team_name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
    };

    GrenadeOverview {
        top_players,
        summary,
        team_stats,
    }
}
