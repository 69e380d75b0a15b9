//! Ingestion of teams, players, match results and match statistics from the
//! stats provider into the store.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::{CollectionJob, JobStatus, MatchPlayerStats, Team};

use crate::hltv::{self, MatchResult, ProviderError, RankingEntry, StatsProvider, TeamRef};
use crate::models::{JobUpdate, NewMatch, NewPlayer, NewTeam};
use crate::rate_limit::RateLimiter;
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Transition(#[from] common::collection::InvalidTransition),
    #[error("a collection run is already active")]
    AlreadyRunning,
    #[error("team {0} not found")]
    UnknownTeam(i32),
    #[error("match {0} not found")]
    UnknownMatch(i32),
    #[error("statistics of match {0} were already collected")]
    StatsAlreadyCollected(i32),
    #[error("collection job {0} disappeared")]
    MissingJob(String),
}

/// Fixed delays between provider calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    /// Minimum interval between any two provider requests
    pub request_interval: Duration,
    /// Before fetching the details of a ranked team
    pub team_delay: Duration,
    /// Before storing each match result
    pub match_delay: Duration,
    /// Between teams of a full collection
    pub between_teams: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            request_interval: Duration::from_millis(3000),
            team_delay: Duration::from_millis(1000),
            match_delay: Duration::from_millis(2000),
            between_teams: Duration::from_millis(5000),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            request_interval: Duration::ZERO,
            team_delay: Duration::ZERO,
            match_delay: Duration::ZERO,
            between_teams: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub top_teams: usize,
    pub matches_per_team: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            top_teams: 30,
            matches_per_team: 50,
        }
    }
}

/// Outcome of a full collection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionReport {
    pub teams: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub matches: usize,
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub struct Collector {
    store: Arc<dyn Store>,
    provider: Arc<dyn StatsProvider>,
    pacing: Pacing,
    limits: Limits,
    limiter: RateLimiter,
    running: Arc<tokio::sync::Mutex<()>>,
    // Held while a match's statistics are collected
    stats: tokio::sync::Mutex<()>,
}

impl Collector {
    pub fn new(
        store: Arc<dyn Store>,
        provider: Arc<dyn StatsProvider>,
        pacing: Pacing,
        limits: Limits,
    ) -> Self {
        Self {
            limiter: RateLimiter::new(pacing.request_interval),
            store,
            provider,
            pacing,
            limits,
            running: Arc::new(tokio::sync::Mutex::new(())),
            stats: tokio::sync::Mutex::new(()),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Whether a background run started by [`Collector::start`] is active.
    pub fn is_running(&self) -> bool {
        self.running.try_lock().is_err()
    }

    /// Starts a background collection of one team, or of every stored team
    /// when `team_id` is `None`. Fails if a run is already active.
    pub async fn start(self: &Arc<Self>, team_id: Option<i32>) -> Result<(), CollectionError> {
        if let Some(id) = team_id {
            if self.store.team(id).await?.is_none() {
                return Err(CollectionError::UnknownTeam(id));
            }
        }

        let guard = Arc::clone(&self.running)
            .try_lock_owned()
            .map_err(|_| CollectionError::AlreadyRunning)?;

        let collector = Arc::clone(self);
        tokio::spawn(async move {
            let _guard = guard;
            match team_id {
                Some(id) => {
                    let limit = collector.limits.matches_per_team;
                    if let Err(e) = collector.collect_team_matches(id, limit).await {
                        tracing::error!(team_id = id, "Collection failed: {}", e);
                    }
                }
                None => match collector.run_full_collection().await {
                    Ok(report) => tracing::info!(?report, "Full collection finished"),
                    Err(e) => tracing::error!("Full collection failed: {}", e),
                },
            }
        });

        Ok(())
    }

    async fn throttle(&self) {
        self.limiter.acquire().await;
    }

    /// Fetches the team ranking and stores the first `limit` teams along with
    /// their rosters.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_top_teams(&self, limit: usize) -> Result<Vec<Team>, CollectionError> {
        tracing::info!("Fetching top {} teams", limit);

        self.throttle().await;
        let ranking = self.provider.team_ranking().await?;

        let mut stored = Vec::new();
        for entry in ranking.into_iter().take(limit) {
            let Some(team_id) = entry.team.id else {
                tracing::warn!(name = %entry.team.name, "Ranking entry without team id");
                continue;
            };

            match self.fetch_team(team_id, &entry).await {
                Ok(team) => stored.push(team),
                Err(e) => tracing::error!(team_id, "Storing team failed: {}", e),
            }
        }

        tracing::info!("Stored {} teams", stored.len());
        Ok(stored)
    }

    async fn fetch_team(
        &self,
        team_id: i32,
        entry: &RankingEntry,
    ) -> Result<Team, CollectionError> {
        pause(self.pacing.team_delay).await;
        self.throttle().await;

        let details = match self.provider.team(team_id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::error!(team_id, "Fetching team details failed: {}", e);
                let team = self
                    .store
                    .upsert_team(NewTeam {
                        id: team_id,
                        name: entry.team.name.clone(),
                        logo: None,
                        rank: Some(entry.place),
                        country: None,
                        hltv_url: Some(hltv::bare_team_url(team_id)),
                        last_updated: Some(Utc::now()),
                    })
                    .await?;
                return Ok(team);
            }
        };

        let team = self
            .store
            .upsert_team(NewTeam {
                id: team_id,
                name: entry.team.name.clone(),
                logo: details.logo,
                rank: Some(entry.place),
                country: details.country.map(|c| c.name),
                hltv_url: Some(hltv::team_url(team_id, &entry.team.name)),
                last_updated: Some(Utc::now()),
            })
            .await?;

        for player in details.players {
            let Some(player_id) = player.id else {
                tracing::debug!(name = %player.name, "Roster entry without player id");
                continue;
            };

            let stored = self
                .store
                .upsert_player(NewPlayer {
                    id: player_id,
                    hltv_url: Some(hltv::player_url(player_id, &player.name)),
                    name: player.name,
                    real_name: None,
                    team_id: Some(team_id),
                    country: None,
                    avatar: None,
                })
                .await;
            if let Err(e) = stored {
                tracing::error!(team_id, player_id, "Storing player failed: {}", e);
            }
        }

        tracing::info!(team_id, name = %team.name, "Stored team");
        Ok(team)
    }

    /// Puts the team's job back to pending, creating it if needed.
    async fn queue_job(
        &self,
        team_id: i32,
        target: usize,
    ) -> Result<CollectionJob, CollectionError> {
        let target = i32::try_from(target).unwrap_or(i32::MAX);

        let Some(job) = self.store.collection_job(team_id).await? else {
            let job = CollectionJob {
                id: uuid::Uuid::now_v7().to_string(),
                team_id,
                status: JobStatus::Pending,
                matches_collected: 0,
                matches_target: target,
                started_at: None,
                completed_at: None,
                error: None,
            };
            return Ok(self.store.create_collection_job(job).await?);
        };

        self.move_job(
            &job,
            JobStatus::Pending,
            JobUpdate {
                matches_collected: Some(0),
                matches_target: Some(target),
                completed_at: Some(None),
                error: Some(None),
                ..Default::default()
            },
        )
        .await
    }

    async fn move_job(
        &self,
        job: &CollectionJob,
        next: JobStatus,
        update: JobUpdate,
    ) -> Result<CollectionJob, CollectionError> {
        let next = job.status.transition(next)?;
        self.store
            .update_collection_job(&job.id, update.with_status(next))
            .await?
            .ok_or_else(|| CollectionError::MissingJob(job.id.clone()))
    }

    /// Collects up to `limit` recent results of one team, tracking progress on
    /// the team's collection job. Returns the number of stored matches.
    #[tracing::instrument(skip(self))]
    pub async fn collect_team_matches(
        &self,
        team_id: i32,
        limit: usize,
    ) -> Result<usize, CollectionError> {
        let job = self.queue_job(team_id, limit).await?;
        let job = self
            .move_job(
                &job,
                JobStatus::InProgress,
                JobUpdate {
                    started_at: Some(Some(Utc::now())),
                    ..Default::default()
                },
            )
            .await?;

        match self.collect_results(&job, limit).await {
            Ok(collected) => {
                self.move_job(
                    &job,
                    JobStatus::Completed,
                    JobUpdate {
                        matches_collected: Some(i32::try_from(collected).unwrap_or(i32::MAX)),
                        completed_at: Some(Some(Utc::now())),
                        ..Default::default()
                    },
                )
                .await?;

                tracing::info!("Collected {} matches", collected);
                Ok(collected)
            }
            Err(e) => {
                let failed = self
                    .move_job(
                        &job,
                        JobStatus::Failed,
                        JobUpdate {
                            completed_at: Some(Some(Utc::now())),
                            error: Some(Some(e.to_string())),
                            ..Default::default()
                        },
                    )
                    .await;
                if let Err(update_error) = failed {
                    tracing::error!("Marking job as failed: {}", update_error);
                }

                Err(e)
            }
        }
    }

    async fn collect_results(
        &self,
        job: &CollectionJob,
        limit: usize,
    ) -> Result<usize, CollectionError> {
        self.throttle().await;
        let results = self.provider.results(job.team_id).await?;

        let mut collected: usize = 0;
        for result in results.into_iter().take(limit) {
            pause(self.pacing.match_delay).await;

            match self.store_result(&result).await {
                Ok(()) => {
                    collected += 1;
                    let count = i32::try_from(collected).unwrap_or(i32::MAX);
                    let progress = JobUpdate::progress(count);
                    self.store.update_collection_job(&job.id, progress).await?;
                }
                Err(e) => {
                    tracing::error!(match_id = result.id, "Storing match failed: {}", e);
                }
            }
        }

        Ok(collected)
    }

    async fn resolve_team(&self, team: Option<&TeamRef>) -> Result<Option<i32>, StoreError> {
        let Some(team) = team else {
            return Ok(None);
        };
        Ok(self.store.team_by_name(&team.name).await?.map(|t| t.id))
    }

    async fn store_result(&self, result: &MatchResult) -> Result<(), CollectionError> {
        let team1_id = self.resolve_team(result.team1.as_ref()).await?;
        let team2_id = self.resolve_team(result.team2.as_ref()).await?;
        let team1_score = result.result.map(|s| s.team1);
        let team2_score = result.result.map(|s| s.team2);

        self.store
            .upsert_match(NewMatch {
                id: result.id,
                team1_id,
                team2_id,
                team1_score,
                team2_score,
                winner_id: analysis::matches::winner(team1_id, team2_id, team1_score, team2_score),
                map_name: result.map.clone().filter(|m| !m.is_empty()),
                event_name: result.event.as_ref().map(|e| e.name.clone()),
                date: result.date.and_then(chrono::DateTime::from_timestamp_millis),
                hltv_url: Some(hltv::match_url(result.id)),
            })
            .await?;

        tracing::debug!(match_id = result.id, "Stored match");
        Ok(())
    }

    /// Fetches the per-player statistics of a stored match. Returns the number
    /// of stored rows.
    ///
    /// Collections are serialized, a second request for the same match sees
    /// the flag set by the first one.
    #[tracing::instrument(skip(self))]
    pub async fn collect_match_stats(&self, match_id: i32) -> Result<usize, CollectionError> {
        let _stats = self.stats.lock().await;

        let stored = self
            .store
            .get_match(match_id)
            .await?
            .ok_or(CollectionError::UnknownMatch(match_id))?;
        if stored.stats_collected {
            return Err(CollectionError::StatsAlreadyCollected(match_id));
        }

        self.throttle().await;
        let stats = self.provider.match_stats(match_id).await?;

        let sides = [
            (stored.team1_id, stats.player_stats.team1),
            (stored.team2_id, stats.player_stats.team2),
        ];

        let mut count = 0;
        for (team_id, lines) in sides {
            for line in lines {
                let Some((player_id, name)) = line
                    .player
                    .as_ref()
                    .and_then(|p| p.id.map(|id| (id, p.name.clone())))
                else {
                    tracing::warn!("Stat line without player id");
                    continue;
                };

                if self.store.player(player_id).await?.is_none() {
                    self.store
                        .upsert_player(NewPlayer {
                            id: player_id,
                            hltv_url: Some(hltv::player_url(player_id, &name)),
                            name,
                            real_name: None,
                            team_id,
                            country: None,
                            avatar: None,
                        })
                        .await?;
                }

                self.store
                    .insert_match_player_stats(MatchPlayerStats {
                        id: uuid::Uuid::now_v7().to_string(),
                        match_id,
                        player_id,
                        team_id,
                        kills: line.kills.unwrap_or(0),
                        deaths: line.deaths.unwrap_or(0),
                        assists: line.assists.unwrap_or(0),
                        adr: line.adr,
                        kast: line.kast,
                        rating: line.rating(),
                        ..Default::default()
                    })
                    .await?;
                count += 1;
            }
        }

        self.store.mark_stats_collected(match_id).await?;
        tracing::info!("Stored {} player stat lines", count);
        Ok(count)
    }

    /// Re-queues every team and collects them one after another. A failing
    /// team does not stop the run.
    #[tracing::instrument(skip(self))]
    pub async fn run_full_collection(&self) -> Result<CollectionReport, CollectionError> {
        let teams = self.store.teams().await?;
        let limit = self.limits.matches_per_team;
        tracing::info!("Starting collection of {} teams", teams.len());

        for team in teams.iter() {
            if let Err(e) = self.queue_job(team.id, limit).await {
                tracing::error!(team_id = team.id, "Queueing job failed: {}", e);
            }
        }

        let mut report = CollectionReport::default();
        for (idx, team) in teams.iter().enumerate() {
            if idx > 0 {
                pause(self.pacing.between_teams).await;
            }

            report.teams += 1;
            match self.collect_team_matches(team.id, limit).await {
                Ok(collected) => {
                    report.succeeded += 1;
                    report.matches += collected;
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        team_id = team.id,
                        name = %team.name,
                        "Team collection failed: {}",
                        e
                    );
                }
            }
        }

        Ok(report)
    }
}
