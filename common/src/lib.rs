use chrono::{DateTime, Utc};

pub mod api;
pub mod collection;
pub mod stats;

pub use collection::{CollectionJob, CollectionJobWithTeam, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
    pub rank: Option<i32>,
    pub country: Option<String>,
    pub hltv_url: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub real_name: Option<String>,
    pub team_id: Option<i32>,
    pub country: Option<String>,
    pub avatar: Option<String>,
    pub hltv_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i32,
    pub team1_id: Option<i32>,
    pub team2_id: Option<i32>,
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub winner_id: Option<i32>,
    pub map_name: Option<String>,
    pub event_name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub hltv_url: Option<String>,
    pub demo_url: Option<String>,
    pub demo_parsed: bool,
    pub stats_collected: bool,
}

impl Match {
    pub fn involves(&self, team_id: i32) -> bool {
        self.team1_id == Some(team_id) || self.team2_id == Some(team_id)
    }
}

/// A match with its team references resolved, the shape the dashboard lists.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub info: Match,
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    pub winner: Option<Team>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub match_id: i32,
    pub round_number: i32,
    pub winner_team_id: Option<i32>,
    pub win_reason: Option<String>,
    pub ct_score: Option<i32>,
    pub t_score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kill {
    pub id: String,
    pub round_id: Option<String>,
    pub match_id: i32,
    pub attacker_id: Option<i32>,
    pub victim_id: Option<i32>,
    pub weapon: Option<String>,
    pub is_headshot: bool,
    pub is_wallbang: bool,
    pub is_grenade: bool,
    pub grenade_type: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub position_z: Option<f64>,
    pub tick: Option<i32>,
}

/// Aggregated numbers of one player in one match.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPlayerStats {
    pub id: String,
    pub match_id: i32,
    pub player_id: i32,
    pub team_id: Option<i32>,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub adr: Option<f64>,
    pub kast: Option<f64>,
    pub rating: Option<f64>,
    pub he_grenade_kills: i32,
    pub he_grenade_damage: i32,
    pub he_grenades_bought: i32,
    pub molotov_kills: i32,
    pub molotov_damage: i32,
    pub flashes_thrown: i32,
    pub enemies_flashed: i32,
    pub smokes_thrown: i32,
    pub headshots: i32,
    pub headshot_percentage: Option<f64>,
}

impl MatchPlayerStats {
    pub fn grenade_kills(&self) -> i64 {
        self.he_grenade_kills as i64 + self.molotov_kills as i64
    }
}
