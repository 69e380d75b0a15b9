use common::{
    CollectionJob, CollectionJobWithTeam, Kill, Match, MatchPlayerStats, Player, Round, Team,
};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use super::{Store, StoreError};
use crate::models::{
    CollectionJobRow, JobUpdate, KillRow, MatchPlayerStatsRow, MatchRow, NewMatch, NewPlayer,
    NewTeam, PlayerRow, RoundRow, TeamRow,
};
use crate::schema::{
    data_collection_jobs, kills, match_player_stats, matches, players, rounds, teams,
};

const MIGRATIONS: diesel_async_migrations::EmbeddedMigrations =
    diesel_async_migrations::embed_migrations!("../migrations/");

pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    /// Applies pending migrations and opens a pool of `max_connections`.
    pub async fn connect(database_url: &str, max_connections: usize) -> Result<Self, StoreError> {
        let mut connection = AsyncPgConnection::establish(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!("Applying Migrations");
        MIGRATIONS
            .run_pending_migrations(&mut connection)
            .await
            .map_err(|e| StoreError::Connection(format!("applying migrations: {}", e)))?;
        tracing::info!("Completed Migrations");

        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = Pool::builder(manager)
            .max_size(max_connections)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> Result<Object<AsyncPgConnection>, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn teams(&self) -> Result<Vec<Team>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<TeamRow> = teams::table
            .order((teams::rank.asc(), teams::id.asc()))
            .select(TeamRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn team(&self, id: i32) -> Result<Option<Team>, StoreError> {
        let mut con = self.connection().await?;
        let row: Option<TeamRow> = teams::table
            .find(id)
            .select(TeamRow::as_select())
            .first(&mut con)
            .await
            .optional()?;
        Ok(row.map(Team::from))
    }

    async fn team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError> {
        let mut con = self.connection().await?;
        let row: Option<TeamRow> = teams::table
            .filter(teams::name.eq(name))
            .select(TeamRow::as_select())
            .first(&mut con)
            .await
            .optional()?;
        Ok(row.map(Team::from))
    }

    async fn upsert_team(&self, team: NewTeam) -> Result<Team, StoreError> {
        let mut con = self.connection().await?;
        let row: TeamRow = diesel::insert_into(teams::table)
            .values(&team)
            .on_conflict(teams::id)
            .do_update()
            .set(&team)
            .returning(TeamRow::as_returning())
            .get_result(&mut con)
            .await?;
        Ok(row.into())
    }

    async fn players(&self) -> Result<Vec<Player>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<PlayerRow> = players::table
            .order(players::id.asc())
            .select(PlayerRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn player(&self, id: i32) -> Result<Option<Player>, StoreError> {
        let mut con = self.connection().await?;
        let row: Option<PlayerRow> = players::table
            .find(id)
            .select(PlayerRow::as_select())
            .first(&mut con)
            .await
            .optional()?;
        Ok(row.map(Player::from))
    }

    async fn players_by_team(&self, team_id: i32) -> Result<Vec<Player>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<PlayerRow> = players::table
            .filter(players::team_id.eq(team_id))
            .order(players::id.asc())
            .select(PlayerRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn upsert_player(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let mut con = self.connection().await?;
        let row: PlayerRow = diesel::insert_into(players::table)
            .values(&player)
            .on_conflict(players::id)
            .do_update()
            .set(&player)
            .returning(PlayerRow::as_returning())
            .get_result(&mut con)
            .await?;
        Ok(row.into())
    }

    async fn matches(&self, limit: Option<usize>) -> Result<Vec<Match>, StoreError> {
        let mut con = self.connection().await?;
        let limit = limit.map(|l| l as i64).unwrap_or(i64::MAX);
        let rows: Vec<MatchRow> = matches::table
            .order((matches::date.is_null(), matches::date.desc(), matches::id.desc()))
            .limit(limit)
            .select(MatchRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Match::from).collect())
    }

    async fn matches_by_team(&self, team_id: i32) -> Result<Vec<Match>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<MatchRow> = matches::table
            .filter(
                matches::team1_id
                    .eq(team_id)
                    .or(matches::team2_id.eq(team_id)),
            )
            .order((matches::date.is_null(), matches::date.desc(), matches::id.desc()))
            .select(MatchRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Match::from).collect())
    }

    async fn get_match(&self, id: i32) -> Result<Option<Match>, StoreError> {
        let mut con = self.connection().await?;
        let row: Option<MatchRow> = matches::table
            .find(id)
            .select(MatchRow::as_select())
            .first(&mut con)
            .await
            .optional()?;
        Ok(row.map(Match::from))
    }

    async fn count_matches(&self) -> Result<usize, StoreError> {
        let mut con = self.connection().await?;
        let count: i64 = matches::table.count().get_result(&mut con).await?;
        Ok(count as usize)
    }

    async fn upsert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let mut con = self.connection().await?;
        let row: MatchRow = diesel::insert_into(matches::table)
            .values(&new_match)
            .on_conflict(matches::id)
            .do_update()
            .set(&new_match)
            .returning(MatchRow::as_returning())
            .get_result(&mut con)
            .await?;
        Ok(row.into())
    }

    async fn mark_stats_collected(&self, id: i32) -> Result<(), StoreError> {
        let mut con = self.connection().await?;
        diesel::update(matches::table.find(id))
            .set(matches::stats_collected.eq(true))
            .execute(&mut con)
            .await?;
        Ok(())
    }

    async fn mark_demo_parsed(&self, id: i32, demo_url: Option<String>) -> Result<(), StoreError> {
        let mut con = self.connection().await?;
        match demo_url {
            Some(url) => {
                diesel::update(matches::table.find(id))
                    .set((matches::demo_parsed.eq(true), matches::demo_url.eq(url)))
                    .execute(&mut con)
                    .await?
            }
            None => {
                diesel::update(matches::table.find(id))
                    .set(matches::demo_parsed.eq(true))
                    .execute(&mut con)
                    .await?
            }
        };
        Ok(())
    }

    async fn rounds_by_match(&self, match_id: i32) -> Result<Vec<Round>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<RoundRow> = rounds::table
            .filter(rounds::match_id.eq(match_id))
            .order(rounds::round_number.asc())
            .select(RoundRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Round::from).collect())
    }

    async fn insert_rounds(&self, new_rounds: Vec<Round>) -> Result<usize, StoreError> {
        if new_rounds.is_empty() {
            return Ok(0);
        }

        let rows: Vec<RoundRow> = new_rounds.into_iter().map(RoundRow::from).collect();
        let mut con = self.connection().await?;
        Ok(diesel::insert_into(rounds::table)
            .values(&rows)
            .execute(&mut con)
            .await?)
    }

    async fn kills_by_match(&self, match_id: i32) -> Result<Vec<Kill>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<KillRow> = kills::table
            .filter(kills::match_id.eq(match_id))
            .order(kills::tick.asc())
            .select(KillRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Kill::from).collect())
    }

    async fn grenade_kills(&self) -> Result<Vec<Kill>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<KillRow> = kills::table
            .filter(kills::is_grenade.eq(true))
            .select(KillRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(Kill::from).collect())
    }

    async fn insert_kills(&self, new_kills: Vec<Kill>) -> Result<usize, StoreError> {
        if new_kills.is_empty() {
            return Ok(0);
        }

        let rows: Vec<KillRow> = new_kills.into_iter().map(KillRow::from).collect();
        let mut con = self.connection().await?;
        Ok(diesel::insert_into(kills::table)
            .values(&rows)
            .execute(&mut con)
            .await?)
    }

    async fn match_player_stats(&self, match_id: i32) -> Result<Vec<MatchPlayerStats>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<MatchPlayerStatsRow> = match_player_stats::table
            .filter(match_player_stats::match_id.eq(match_id))
            .select(MatchPlayerStatsRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(MatchPlayerStats::from).collect())
    }

    async fn all_match_player_stats(&self) -> Result<Vec<MatchPlayerStats>, StoreError> {
        let mut con = self.connection().await?;
        let rows: Vec<MatchPlayerStatsRow> = match_player_stats::table
            .select(MatchPlayerStatsRow::as_select())
            .load(&mut con)
            .await?;
        Ok(rows.into_iter().map(MatchPlayerStats::from).collect())
    }

    async fn insert_match_player_stats(
        &self,
        stats: MatchPlayerStats,
    ) -> Result<MatchPlayerStats, StoreError> {
        let key = format!("{}/{}", stats.match_id, stats.player_id);

        let mut con = self.connection().await?;
        let row: MatchPlayerStatsRow = diesel::insert_into(match_player_stats::table)
            .values(MatchPlayerStatsRow::from(stats))
            .returning(MatchPlayerStatsRow::as_returning())
            .get_result(&mut con)
            .await
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    StoreError::Duplicate {
                        table: "match_player_stats",
                        id: key,
                    }
                }
                other => StoreError::Query(other),
            })?;
        Ok(row.into())
    }

    async fn collection_jobs(&self) -> Result<Vec<CollectionJobWithTeam>, StoreError> {
        let rows: Vec<CollectionJobRow> = {
            let mut con = self.connection().await?;
            data_collection_jobs::table
                .select(CollectionJobRow::as_select())
                .load(&mut con)
                .await?
        };
        let jobs = rows
            .into_iter()
            .map(CollectionJob::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let teams = self.teams().await?;
        Ok(super::jobs_with_teams(jobs, &teams))
    }

    async fn collection_job(&self, team_id: i32) -> Result<Option<CollectionJob>, StoreError> {
        let mut con = self.connection().await?;
        let row: Option<CollectionJobRow> = data_collection_jobs::table
            .filter(data_collection_jobs::team_id.eq(team_id))
            .select(CollectionJobRow::as_select())
            .first(&mut con)
            .await
            .optional()?;
        Ok(row.map(CollectionJob::try_from).transpose()?)
    }

    async fn create_collection_job(&self, job: CollectionJob) -> Result<CollectionJob, StoreError> {
        let mut con = self.connection().await?;
        let row: CollectionJobRow = diesel::insert_into(data_collection_jobs::table)
            .values(CollectionJobRow::from(job))
            .returning(CollectionJobRow::as_returning())
            .get_result(&mut con)
            .await?;
        Ok(row.try_into()?)
    }

    async fn update_collection_job(
        &self,
        id: &str,
        update: JobUpdate,
    ) -> Result<Option<CollectionJob>, StoreError> {
        let mut con = self.connection().await?;
        let row: Option<CollectionJobRow> = diesel::update(data_collection_jobs::table.find(id))
            .set(&update)
            .returning(CollectionJobRow::as_returning())
            .get_result(&mut con)
            .await
            .optional()?;
        Ok(row.map(CollectionJob::try_from).transpose()?)
    }
}
