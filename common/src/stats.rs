use crate::{MatchWithTeams, Player, Team};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWithStats {
    #[serde(flatten)]
    pub player: Player,
    pub team: Option<Team>,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_rating: f64,
    pub total_grenade_kills: i64,
    pub matches_played: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrenadeStats {
    pub player_id: i32,
    pub player_name: String,
    pub team_name: String,
    #[serde(rename = "totalHEKills")]
    pub total_he_kills: i64,
    pub total_molotov_kills: i64,
    #[serde(rename = "avgHEDamage")]
    pub avg_he_damage: f64,
    pub avg_grenades_bought: f64,
    pub matches_played: usize,
}

impl GrenadeStats {
    pub fn total_kills(&self) -> i64 {
        self.total_he_kills + self.total_molotov_kills
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrenadeSummary {
    #[serde(rename = "totalHEKills")]
    pub total_he_kills: i64,
    pub total_molotov_kills: i64,
    #[serde(rename = "avgHEPerMatch")]
    pub avg_he_per_match: f64,
    pub avg_molotov_per_match: f64,
    pub most_deadly_player: String,
    pub most_deadly_team: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGrenadeStats {
    pub team_name: String,
    pub he_kills: i64,
    pub molotov_kills: i64,
    pub total_kills: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrenadeOverview {
    pub top_players: Vec<GrenadeStats>,
    pub summary: GrenadeSummary,
    pub team_stats: Vec<TeamGrenadeStats>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapGrenadeStats {
    pub map_name: String,
    pub total_grenade_deaths: usize,
    pub he_deaths: usize,
    pub molotov_deaths: usize,
    pub avg_deaths_per_match: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    pub total_maps_played: usize,
    pub total_grenade_deaths: usize,
    pub most_deadly_map: String,
    pub avg_deaths_per_match: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOverview {
    pub maps: Vec<MapGrenadeStats>,
    pub summary: MapSummary,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRanking {
    #[serde(flatten)]
    pub team: Team,
    pub win_rate: f64,
    pub total_matches: usize,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub top_players: Vec<PlayerWithStats>,
    pub top_teams: Vec<TeamRanking>,
    pub top_fraggers: Vec<PlayerWithStats>,
    pub top_grenade_killers: Vec<PlayerWithStats>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub total_grenade_kills: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    pub team: Team,
    pub players: Vec<Player>,
    pub matches: Vec<MatchWithTeams>,
    pub stats: TeamStats,
    pub player_stats: Vec<PlayerWithStats>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_teams: usize,
    pub total_matches: usize,
    pub total_grenade_kills: usize,
    pub collection_progress: u32,
    pub recent_matches: Vec<MatchWithTeams>,
    pub top_grenade_killers: Vec<GrenadeStats>,
    pub map_stats: Vec<MapGrenadeStats>,
}
