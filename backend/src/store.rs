//! Persistence of teams, players, matches, per-match details and collection
//! jobs.
//!
//! [`postgres::PgStore`] is the production store, [`memory::MemoryStore`] keeps
//! everything in process and is used without a configured database.

use common::{
    CollectionJob, CollectionJobWithTeam, Kill, Match, MatchPlayerStats, Player, Round, Team,
};

use crate::models::{JobUpdate, NewMatch, NewPlayer, NewTeam};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("{table} references unknown id {id}")]
    MissingReference { table: &'static str, id: String },
    #[error("{table} already contains id {id}")]
    Duplicate { table: &'static str, id: String },
    #[error(transparent)]
    InvalidStatus(#[from] common::collection::UnknownStatus),
}

#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// All teams, best ranked first and unranked teams last.
    async fn teams(&self) -> Result<Vec<Team>, StoreError>;
    async fn team(&self, id: i32) -> Result<Option<Team>, StoreError>;
    async fn team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError>;
    async fn upsert_team(&self, team: NewTeam) -> Result<Team, StoreError>;

    async fn players(&self) -> Result<Vec<Player>, StoreError>;
    async fn player(&self, id: i32) -> Result<Option<Player>, StoreError>;
    async fn players_by_team(&self, team_id: i32) -> Result<Vec<Player>, StoreError>;
    async fn upsert_player(&self, player: NewPlayer) -> Result<Player, StoreError>;

    /// Matches, newest first. Matches without a date come last.
    async fn matches(&self, limit: Option<usize>) -> Result<Vec<Match>, StoreError>;
    /// Matches either side of which is `team_id`, newest first.
    async fn matches_by_team(&self, team_id: i32) -> Result<Vec<Match>, StoreError>;
    async fn get_match(&self, id: i32) -> Result<Option<Match>, StoreError>;
    async fn count_matches(&self) -> Result<usize, StoreError>;
    async fn upsert_match(&self, new_match: NewMatch) -> Result<Match, StoreError>;
    async fn mark_stats_collected(&self, id: i32) -> Result<(), StoreError>;
    async fn mark_demo_parsed(&self, id: i32, demo_url: Option<String>) -> Result<(), StoreError>;

    async fn rounds_by_match(&self, match_id: i32) -> Result<Vec<Round>, StoreError>;
    async fn insert_rounds(&self, rounds: Vec<Round>) -> Result<usize, StoreError>;

    async fn kills_by_match(&self, match_id: i32) -> Result<Vec<Kill>, StoreError>;
    async fn grenade_kills(&self) -> Result<Vec<Kill>, StoreError>;
    async fn insert_kills(&self, kills: Vec<Kill>) -> Result<usize, StoreError>;

    async fn match_player_stats(&self, match_id: i32) -> Result<Vec<MatchPlayerStats>, StoreError>;
    async fn all_match_player_stats(&self) -> Result<Vec<MatchPlayerStats>, StoreError>;
    /// Fails with [`StoreError::Duplicate`] if the player already has a row for
    /// the match.
    async fn insert_match_player_stats(
        &self,
        stats: MatchPlayerStats,
    ) -> Result<MatchPlayerStats, StoreError>;

    /// All jobs with their team, in the order the teams are ranked.
    async fn collection_jobs(&self) -> Result<Vec<CollectionJobWithTeam>, StoreError>;
    async fn collection_job(&self, team_id: i32) -> Result<Option<CollectionJob>, StoreError>;
    async fn create_collection_job(&self, job: CollectionJob) -> Result<CollectionJob, StoreError>;
    /// Returns `None` if there is no job with the id.
    async fn update_collection_job(
        &self,
        id: &str,
        update: JobUpdate,
    ) -> Result<Option<CollectionJob>, StoreError>;
}

/// Pairs every job with its team, following the order of `teams`. Jobs of
/// teams missing from `teams` come last.
pub(crate) fn jobs_with_teams(
    jobs: Vec<CollectionJob>,
    teams: &[Team],
) -> Vec<CollectionJobWithTeam> {
    let position = |team_id: i32| {
        teams
            .iter()
            .position(|t| t.id == team_id)
            .unwrap_or(teams.len())
    };

    let mut jobs: Vec<CollectionJobWithTeam> = jobs
        .into_iter()
        .map(|job| CollectionJobWithTeam {
            team: teams.iter().find(|t| t.id == job.team_id).cloned(),
            job,
        })
        .collect();
    jobs.sort_by_key(|j| position(j.job.team_id));
    jobs
}
