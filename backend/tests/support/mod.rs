#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use backend::collection::{Collector, Limits, Pacing};
use backend::hltv::{
    FullTeam, MatchResult, MatchStats, ProviderError, RankingEntry, StatsProvider,
};
use backend::models::{JobUpdate, NewMatch, NewPlayer, NewTeam};
use backend::store::{MemoryStore, Store, StoreError};
use chrono::{DateTime, Utc};
use common::{
    CollectionJob, CollectionJobWithTeam, Kill, Match, MatchPlayerStats, Player, Round, Team,
};
use wiremock::MockServer;

pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemoryStore>,
    pub collector: Arc<Collector>,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_limits(Limits::default()).await
    }

    pub async fn with_limits(limits: Limits) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(backend::hltv::Client::new(&server.uri()).unwrap());
        let collector = Arc::new(Collector::new(
            store.clone(),
            provider,
            Pacing::none(),
            limits,
        ));

        Self {
            server,
            store,
            collector,
        }
    }

    pub fn state(&self) -> backend::api::AppState {
        backend::api::AppState {
            store: self.store.clone(),
            collector: self.collector.clone(),
        }
    }

    pub fn router(&self) -> axum::Router {
        axum::Router::new().nest("/api", backend::api::router(self.state()))
    }

    pub async fn team(&self, id: i32, name: &str, rank: Option<i32>) {
        self.store.upsert_team(new_team(id, name, rank)).await.unwrap();
    }

    pub async fn player(&self, id: i32, name: &str, team_id: Option<i32>) {
        self.store
            .upsert_player(NewPlayer {
                id,
                name: name.to_owned(),
                real_name: None,
                team_id,
                country: None,
                avatar: None,
                hltv_url: None,
            })
            .await
            .unwrap();
    }

    pub async fn finished_match(
        &self,
        id: i32,
        team1: i32,
        team2: i32,
        score: (i32, i32),
        map: &str,
        day: u32,
    ) {
        self.store
            .upsert_match(NewMatch {
                id,
                team1_id: Some(team1),
                team2_id: Some(team2),
                team1_score: Some(score.0),
                team2_score: Some(score.1),
                winner_id: analysis::matches::winner(
                    Some(team1),
                    Some(team2),
                    Some(score.0),
                    Some(score.1),
                ),
                map_name: Some(map.to_owned()),
                event_name: Some("IEM Katowice 2025".to_owned()),
                date: Some(day_of_may(day)),
                hltv_url: None,
            })
            .await
            .unwrap();
    }
}

pub fn new_team(id: i32, name: &str, rank: Option<i32>) -> NewTeam {
    NewTeam {
        id,
        name: name.to_owned(),
        logo: None,
        rank,
        country: None,
        hltv_url: None,
        last_updated: None,
    }
}

pub fn day_of_may(day: u32) -> DateTime<Utc> {
    use chrono::TimeZone;
    Utc.with_ymd_and_hms(2025, 5, day, 18, 0, 0).unwrap()
}

/// Provider answering from memory, for tests that run on a paused clock.
#[derive(Debug, Default)]
pub struct StubProvider {
    pub ranking: Vec<RankingEntry>,
    pub teams: Vec<FullTeam>,
    pub results: BTreeMap<i32, Vec<MatchResult>>,
}

fn not_found(path: String) -> ProviderError {
    ProviderError::Status { status: 404, path }
}

#[async_trait::async_trait]
impl StatsProvider for StubProvider {
    async fn team_ranking(&self) -> Result<Vec<RankingEntry>, ProviderError> {
        Ok(self.ranking.clone())
    }

    async fn team(&self, id: i32) -> Result<FullTeam, ProviderError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("team/{}", id)))
    }

    async fn results(&self, team_id: i32) -> Result<Vec<MatchResult>, ProviderError> {
        Ok(self.results.get(&team_id).cloned().unwrap_or_default())
    }

    async fn match_stats(&self, match_id: i32) -> Result<MatchStats, ProviderError> {
        Err(not_found(format!("matches/{}/stats", match_id)))
    }
}

/// [`MemoryStore`] that refuses to store the listed matches.
pub struct FailingStore {
    pub inner: MemoryStore,
    pub failing_matches: Vec<i32>,
}

#[async_trait::async_trait]
impl Store for FailingStore {
    async fn teams(&self) -> Result<Vec<Team>, StoreError> {
        self.inner.teams().await
    }
    async fn team(&self, id: i32) -> Result<Option<Team>, StoreError> {
        self.inner.team(id).await
    }
    async fn team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError> {
        self.inner.team_by_name(name).await
    }
    async fn upsert_team(&self, team: NewTeam) -> Result<Team, StoreError> {
        self.inner.upsert_team(team).await
    }

    async fn players(&self) -> Result<Vec<Player>, StoreError> {
        self.inner.players().await
    }
    async fn player(&self, id: i32) -> Result<Option<Player>, StoreError> {
        self.inner.player(id).await
    }
    async fn players_by_team(&self, team_id: i32) -> Result<Vec<Player>, StoreError> {
        self.inner.players_by_team(team_id).await
    }
    async fn upsert_player(&self, player: NewPlayer) -> Result<Player, StoreError> {
        self.inner.upsert_player(player).await
    }

    async fn matches(&self, limit: Option<usize>) -> Result<Vec<Match>, StoreError> {
        self.inner.matches(limit).await
    }
    async fn matches_by_team(&self, team_id: i32) -> Result<Vec<Match>, StoreError> {
        self.inner.matches_by_team(team_id).await
    }
    async fn get_match(&self, id: i32) -> Result<Option<Match>, StoreError> {
        self.inner.get_match(id).await
    }
    async fn count_matches(&self) -> Result<usize, StoreError> {
        self.inner.count_matches().await
    }
    async fn upsert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        if self.failing_matches.contains(&new_match.id) {
            return Err(StoreError::Connection("connection reset".to_owned()));
        }
        self.inner.upsert_match(new_match).await
    }
    async fn mark_stats_collected(&self, id: i32) -> Result<(), StoreError> {
        self.inner.mark_stats_collected(id).await
    }
    async fn mark_demo_parsed(&self, id: i32, demo_url: Option<String>) -> Result<(), StoreError> {
        self.inner.mark_demo_parsed(id, demo_url).await
    }

    async fn rounds_by_match(&self, match_id: i32) -> Result<Vec<Round>, StoreError> {
        self.inner.rounds_by_match(match_id).await
    }
    async fn insert_rounds(&self, rounds: Vec<Round>) -> Result<usize, StoreError> {
        self.inner.insert_rounds(rounds).await
    }

    async fn kills_by_match(&self, match_id: i32) -> Result<Vec<Kill>, StoreError> {
        self.inner.kills_by_match(match_id).await
    }
    async fn grenade_kills(&self) -> Result<Vec<Kill>, StoreError> {
        self.inner.grenade_kills().await
    }
    async fn insert_kills(&self, kills: Vec<Kill>) -> Result<usize, StoreError> {
        self.inner.insert_kills(kills).await
    }

    async fn match_player_stats(&self, match_id: i32) -> Result<Vec<MatchPlayerStats>, StoreError> {
        self.inner.match_player_stats(match_id).await
    }
    async fn all_match_player_stats(&self) -> Result<Vec<MatchPlayerStats>, StoreError> {
        self.inner.all_match_player_stats().await
    }
    async fn insert_match_player_stats(
        &self,
        stats: MatchPlayerStats,
    ) -> Result<MatchPlayerStats, StoreError> {
        self.inner.insert_match_player_stats(stats).await
    }

    async fn collection_jobs(&self) -> Result<Vec<CollectionJobWithTeam>, StoreError> {
        self.inner.collection_jobs().await
    }
    async fn collection_job(&self, team_id: i32) -> Result<Option<CollectionJob>, StoreError> {
        self.inner.collection_job(team_id).await
    }
    async fn create_collection_job(&self, job: CollectionJob) -> Result<CollectionJob, StoreError> {
        self.inner.create_collection_job(job).await
    }
    async fn update_collection_job(
        &self,
        id: &str,
        update: JobUpdate,
    ) -> Result<Option<CollectionJob>, StoreError> {
        self.inner.update_collection_job(id, update).await
    }
}
