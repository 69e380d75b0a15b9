//! Client for the HLTV JSON bridge.
//!
//! The bridge exposes the calls of the HLTV wrapper library over HTTP. Response
//! bodies keep the wrapper's shapes, only the fields used here are modelled.

use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("cs2stats/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid provider url: {0}")]
    InvalidUrl(String),
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status} for {path}")]
    Status { status: u16, path: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub place: i32,
    pub team: TeamRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTeam {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub players: Vec<PlayerRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub team1: i32,
    pub team2: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRef {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
}

/// One finished match from the results listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub id: i32,
    #[serde(default)]
    pub team1: Option<TeamRef>,
    #[serde(default)]
    pub team2: Option<TeamRef>,
    #[serde(default)]
    pub result: Option<Score>,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub event: Option<EventRef>,
    /// Milliseconds since the unix epoch
    #[serde(default)]
    pub date: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatLine {
    #[serde(default)]
    pub player: Option<PlayerRef>,
    #[serde(default)]
    pub kills: Option<i32>,
    #[serde(default)]
    pub deaths: Option<i32>,
    #[serde(default)]
    pub assists: Option<i32>,
    #[serde(default, alias = "ADR")]
    pub adr: Option<f64>,
    #[serde(default, alias = "KAST")]
    pub kast: Option<f64>,
    #[serde(default)]
    pub rating1: Option<f64>,
    #[serde(default)]
    pub rating2: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl PlayerStatLine {
    pub fn rating(&self) -> Option<f64> {
        self.rating1.or(self.rating2).or(self.rating)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidedPlayerStats {
    #[serde(default)]
    pub team1: Vec<PlayerStatLine>,
    #[serde(default)]
    pub team2: Vec<PlayerStatLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    #[serde(default)]
    pub player_stats: SidedPlayerStats,
}

/// Source of team, result and match statistics.
#[async_trait::async_trait]
pub trait StatsProvider: Send + Sync {
    async fn team_ranking(&self) -> Result<Vec<RankingEntry>, ProviderError>;
    async fn team(&self, id: i32) -> Result<FullTeam, ProviderError>;
    async fn results(&self, team_id: i32) -> Result<Vec<MatchResult>, ProviderError>;
    async fn match_stats(&self, match_id: i32) -> Result<MatchStats, ProviderError>;
}

pub struct Client {
    http: reqwest::Client,
    base: reqwest::Url,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        // Without the trailing slash `join` would replace the last segment
        let base_url = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{}/", base_url)
        };
        let base =
            reqwest::Url::parse(&base_url).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self { http, base })
    }

    pub async fn get<T>(&self, path: &str, args: &[(&str, String)]) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;

        let response = self.http.get(url).query(args).send().await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), path, "Provider request failed");
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
                path: path.to_owned(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl StatsProvider for Client {
    #[tracing::instrument(skip(self))]
    async fn team_ranking(&self) -> Result<Vec<RankingEntry>, ProviderError> {
        self.get("ranking", &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn team(&self, id: i32) -> Result<FullTeam, ProviderError> {
        self.get(&format!("team/{}", id), &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn results(&self, team_id: i32) -> Result<Vec<MatchResult>, ProviderError> {
        self.get("results", &[("teamIds", team_id.to_string())]).await
    }

    #[tracing::instrument(skip(self))]
    async fn match_stats(&self, match_id: i32) -> Result<MatchStats, ProviderError> {
        self.get(&format!("matches/{}/stats", match_id), &[]).await
    }
}

pub const HLTV_BASE: &str = "https://www.hltv.org";

/// The path segment HLTV uses for names: lowercased, whitespace runs replaced
/// by `-`, percent-encoded.
pub fn slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let joined = lowered.split_whitespace().collect::<Vec<_>>().join("-");
    urlencoding::encode(&joined).into_owned()
}

pub fn team_url(id: i32, name: &str) -> String {
    format!("{}/team/{}/{}", HLTV_BASE, id, slug(name))
}

pub fn bare_team_url(id: i32) -> String {
    format!("{}/team/{}", HLTV_BASE, id)
}

pub fn player_url(id: i32, name: &str) -> String {
    format!("{}/player/{}/{}", HLTV_BASE, id, slug(name))
}

pub fn match_url(id: i32) -> String {
    format!("{}/matches/{}", HLTV_BASE, id)
}
