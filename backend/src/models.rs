use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamRow {
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
    pub rank: Option<i32>,
    pub country: Option<String>,
    pub hltv_url: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Insert and full replacement of a team, keyed by its HLTV id.
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(treat_none_as_null = true)]
pub struct NewTeam {
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
    pub rank: Option<i32>,
    pub country: Option<String>,
    pub hltv_url: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlayerRow {
    pub id: i32,
    pub name: String,
    pub real_name: Option<String>,
    pub team_id: Option<i32>,
    pub country: Option<String>,
    pub avatar: Option<String>,
    pub hltv_url: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::players)]
#[diesel(treat_none_as_null = true)]
pub struct NewPlayer {
    pub id: i32,
    pub name: String,
    pub real_name: Option<String>,
    pub team_id: Option<i32>,
    pub country: Option<String>,
    pub avatar: Option<String>,
    pub hltv_url: Option<String>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::matches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MatchRow {
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

/// A match result as reported by the provider.
///
/// The demo and stats flags are left out so re-collecting a result never
/// resets them.
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::matches)]
#[diesel(treat_none_as_null = true)]
pub struct NewMatch {
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
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::rounds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoundRow {
    pub id: String,
    pub match_id: i32,
    pub round_number: i32,
    pub winner_team_id: Option<i32>,
    pub win_reason: Option<String>,
    pub ct_score: Option<i32>,
    pub t_score: Option<i32>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::kills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct KillRow {
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

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::match_player_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MatchPlayerStatsRow {
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

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::data_collection_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CollectionJobRow {
    pub id: String,
    pub team_id: i32,
    pub status: String,
    pub matches_collected: i32,
    pub matches_target: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// Partial update of a collection job. `None` leaves a column untouched,
/// `Some(None)` clears a nullable one.
#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = crate::schema::data_collection_jobs)]
pub struct JobUpdate {
    pub status: Option<String>,
    pub matches_collected: Option<i32>,
    pub matches_target: Option<i32>,
    pub started_at: Option<Option<DateTime<Utc>>>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
    pub error: Option<Option<String>>,
}

impl JobUpdate {
    pub fn progress(matches_collected: i32) -> Self {
        Self {
            matches_collected: Some(matches_collected),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: common::JobStatus) -> Self {
        self.status = Some(status.as_str().to_owned());
        self
    }

    /// Applies the update to an in-memory job.
    pub fn apply(
        &self,
        job: &mut common::CollectionJob,
    ) -> Result<(), common::collection::UnknownStatus> {
        if let Some(status) = &self.status {
            job.status = status.parse()?;
        }
        if let Some(count) = self.matches_collected {
            job.matches_collected = count;
        }
        if let Some(target) = self.matches_target {
            job.matches_target = target;
        }
        if let Some(started_at) = self.started_at {
            job.started_at = started_at;
        }
        if let Some(completed_at) = self.completed_at {
            job.completed_at = completed_at;
        }
        if let Some(error) = &self.error {
            job.error = error.clone();
        }
        Ok(())
    }
}

impl From<TeamRow> for common::Team {
    fn from(row: TeamRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            logo: row.logo,
            rank: row.rank,
            country: row.country,
            hltv_url: row.hltv_url,
            last_updated: row.last_updated,
        }
    }
}

impl From<NewTeam> for common::Team {
    fn from(team: NewTeam) -> Self {
        Self {
            id: team.id,
            name: team.name,
            logo: team.logo,
            rank: team.rank,
            country: team.country,
            hltv_url: team.hltv_url,
            last_updated: team.last_updated,
        }
    }
}

impl From<PlayerRow> for common::Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            real_name: row.real_name,
            team_id: row.team_id,
            country: row.country,
            avatar: row.avatar,
            hltv_url: row.hltv_url,
        }
    }
}

impl From<NewPlayer> for common::Player {
    fn from(player: NewPlayer) -> Self {
        Self {
            id: player.id,
            name: player.name,
            real_name: player.real_name,
            team_id: player.team_id,
            country: player.country,
            avatar: player.avatar,
            hltv_url: player.hltv_url,
        }
    }
}

impl From<MatchRow> for common::Match {
    fn from(row: MatchRow) -> Self {
        Self {
            id: row.id,
            team1_id: row.team1_id,
            team2_id: row.team2_id,
            team1_score: row.team1_score,
            team2_score: row.team2_score,
            winner_id: row.winner_id,
            map_name: row.map_name,
            event_name: row.event_name,
            date: row.date,
            hltv_url: row.hltv_url,
            demo_url: row.demo_url,
            demo_parsed: row.demo_parsed,
            stats_collected: row.stats_collected,
        }
    }
}

impl NewMatch {
    /// Applies the result to a stored match, keeping its demo and stats state.
    pub fn apply(self, existing: Option<&common::Match>) -> common::Match {
        common::Match {
            id: self.id,
            team1_id: self.team1_id,
            team2_id: self.team2_id,
            team1_score: self.team1_score,
            team2_score: self.team2_score,
            winner_id: self.winner_id,
            map_name: self.map_name,
            event_name: self.event_name,
            date: self.date,
            hltv_url: self.hltv_url,
            demo_url: existing.and_then(|m| m.demo_url.clone()),
            demo_parsed: existing.map(|m| m.demo_parsed).unwrap_or(false),
            stats_collected: existing.map(|m| m.stats_collected).unwrap_or(false),
        }
    }
}

impl From<RoundRow> for common::Round {
    fn from(row: RoundRow) -> Self {
        Self {
            id: row.id,
            match_id: row.match_id,
            round_number: row.round_number,
            winner_team_id: row.winner_team_id,
            win_reason: row.win_reason,
            ct_score: row.ct_score,
            t_score: row.t_score,
        }
    }
}

impl From<KillRow> for common::Kill {
    fn from(row: KillRow) -> Self {
        Self {
            id: row.id,
            round_id: row.round_id,
            match_id: row.match_id,
            attacker_id: row.attacker_id,
            victim_id: row.victim_id,
            weapon: row.weapon,
            is_headshot: row.is_headshot,
            is_wallbang: row.is_wallbang,
            is_grenade: row.is_grenade,
            grenade_type: row.grenade_type,
            position_x: row.position_x,
            position_y: row.position_y,
            position_z: row.position_z,
            tick: row.tick,
        }
    }
}

impl From<MatchPlayerStatsRow> for common::MatchPlayerStats {
    fn from(row: MatchPlayerStatsRow) -> Self {
        Self {
            id: row.id,
            match_id: row.match_id,
            player_id: row.player_id,
            team_id: row.team_id,
            kills: row.kills,
            deaths: row.deaths,
            assists: row.assists,
            adr: row.adr,
            kast: row.kast,
            rating: row.rating,
            he_grenade_kills: row.he_grenade_kills,
            he_grenade_damage: row.he_grenade_damage,
            he_grenades_bought: row.he_grenades_bought,
            molotov_kills: row.molotov_kills,
            molotov_damage: row.molotov_damage,
            flashes_thrown: row.flashes_thrown,
            enemies_flashed: row.enemies_flashed,
            smokes_thrown: row.smokes_thrown,
            headshots: row.headshots,
            headshot_percentage: row.headshot_percentage,
        }
    }
}

impl TryFrom<CollectionJobRow> for common::CollectionJob {
    type Error = common::collection::UnknownStatus;

    fn try_from(row: CollectionJobRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            team_id: row.team_id,
            status: row.status.parse()?,
            matches_collected: row.matches_collected,
            matches_target: row.matches_target,
            started_at: row.started_at,
            completed_at: row.completed_at,
            error: row.error,
        })
    }
}

impl From<common::Round> for RoundRow {
    fn from(round: common::Round) -> Self {
        Self {
            id: round.id,
            match_id: round.match_id,
            round_number: round.round_number,
            winner_team_id: round.winner_team_id,
            win_reason: round.win_reason,
            ct_score: round.ct_score,
            t_score: round.t_score,
        }
    }
}

impl From<common::Kill> for KillRow {
    fn from(kill: common::Kill) -> Self {
        Self {
            id: kill.id,
            round_id: kill.round_id,
            match_id: kill.match_id,
            attacker_id: kill.attacker_id,
            victim_id: kill.victim_id,
            weapon: kill.weapon,
            is_headshot: kill.is_headshot,
            is_wallbang: kill.is_wallbang,
            is_grenade: kill.is_grenade,
            grenade_type: kill.grenade_type,
            position_x: kill.position_x,
            position_y: kill.position_y,
            position_z: kill.position_z,
            tick: kill.tick,
        }
    }
}

impl From<common::MatchPlayerStats> for MatchPlayerStatsRow {
    fn from(stats: common::MatchPlayerStats) -> Self {
        Self {
            id: stats.id,
            match_id: stats.match_id,
            player_id: stats.player_id,
            team_id: stats.team_id,
            kills: stats.kills,
            deaths: stats.deaths,
            assists: stats.assists,
            adr: stats.adr,
            kast: stats.kast,
            rating: stats.rating,
            he_grenade_kills: stats.he_grenade_kills,
            he_grenade_damage: stats.he_grenade_damage,
            he_grenades_bought: stats.he_grenades_bought,
            molotov_kills: stats.molotov_kills,
            molotov_damage: stats.molotov_damage,
            flashes_thrown: stats.flashes_thrown,
            enemies_flashed: stats.enemies_flashed,
            smokes_thrown: stats.smokes_thrown,
            headshots: stats.headshots,
            headshot_percentage: stats.headshot_percentage,
        }
    }
}

impl From<common::CollectionJob> for CollectionJobRow {
    fn from(job: common::CollectionJob) -> Self {
        Self {
            id: job.id,
            team_id: job.team_id,
            status: job.status.as_str().to_owned(),
            matches_collected: job.matches_collected,
            matches_target: job.matches_target,
            started_at: job.started_at,
            completed_at: job.completed_at,
            error: job.error,
        }
    }
}
