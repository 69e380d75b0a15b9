//! Request and response bodies of the HTTP API that are not plain entities.

use crate::{Kill, Match, MatchPlayerStats, Round};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CountResponse {
    pub success: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCollection {
    #[serde(default)]
    pub team_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    #[serde(rename = "match")]
    pub info: Match,
    pub rounds: Vec<Round>,
    pub kills: Vec<Kill>,
    pub player_stats: Vec<MatchPlayerStats>,
}

/// Rounds and kill events extracted from a match demo by an external parser.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoImport {
    #[serde(default)]
    pub demo_url: Option<String>,
    pub rounds: Vec<DemoRound>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRound {
    pub round_number: i32,
    #[serde(default)]
    pub winner_team_id: Option<i32>,
    #[serde(default)]
    pub win_reason: Option<String>,
    #[serde(default)]
    pub ct_score: Option<i32>,
    #[serde(default)]
    pub t_score: Option<i32>,
    #[serde(default)]
    pub kills: Vec<DemoKill>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoKill {
    #[serde(default)]
    pub attacker_id: Option<i32>,
    #[serde(default)]
    pub victim_id: Option<i32>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub is_headshot: bool,
    #[serde(default)]
    pub is_wallbang: bool,
    #[serde(default)]
    pub position_x: Option<f64>,
    #[serde(default)]
    pub position_y: Option<f64>,
    #[serde(default)]
    pub position_z: Option<f64>,
    #[serde(default)]
    pub tick: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportedDemo {
    pub success: bool,
    pub rounds: usize,
    pub kills: usize,
}
