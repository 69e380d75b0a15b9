use std::collections::BTreeMap;

use common::{
    CollectionJob, CollectionJobWithTeam, Kill, Match, MatchPlayerStats, Player, Round, Team,
};
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{JobUpdate, NewMatch, NewPlayer, NewTeam};

#[derive(Debug, Default)]
struct Tables {
    teams: BTreeMap<i32, Team>,
    players: BTreeMap<i32, Player>,
    matches: BTreeMap<i32, Match>,
    rounds: Vec<Round>,
    kills: Vec<Kill>,
    stats: Vec<MatchPlayerStats>,
    jobs: Vec<CollectionJob>,
}

impl Tables {
    fn require_team(&self, table: &'static str, id: Option<i32>) -> Result<(), StoreError> {
        match id {
            Some(id) if !self.teams.contains_key(&id) => Err(StoreError::MissingReference {
                table,
                id: id.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn require_player(&self, table: &'static str, id: Option<i32>) -> Result<(), StoreError> {
        match id {
            Some(id) if !self.players.contains_key(&id) => Err(StoreError::MissingReference {
                table,
                id: id.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn require_match(&self, table: &'static str, id: i32) -> Result<(), StoreError> {
        if self.matches.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::MissingReference {
                table,
                id: id.to_string(),
            })
        }
    }

    fn ranked_teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = self.teams.values().cloned().collect();
        teams.sort_by_key(|t| (t.rank.is_none(), t.rank));
        teams
    }
}

/// Newest first, undated matches last, like the Postgres ordering.
fn newest_first(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        a.date
            .is_none()
            .cmp(&b.date.is_none())
            .then(b.date.cmp(&a.date))
            .then(b.id.cmp(&a.id))
    });
}

/// Keeps every table in process memory. Enforces the same references the
/// database schema does, so both stores reject the same writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn teams(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.tables.read().await.ranked_teams())
    }

    async fn team(&self, id: i32) -> Result<Option<Team>, StoreError> {
        Ok(self.tables.read().await.teams.get(&id).cloned())
    }

    async fn team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.teams.values().find(|t| t.name == name).cloned())
    }

    async fn upsert_team(&self, team: NewTeam) -> Result<Team, StoreError> {
        let team = Team::from(team);
        self.tables.write().await.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.tables.read().await.players.values().cloned().collect())
    }

    async fn player(&self, id: i32) -> Result<Option<Player>, StoreError> {
        Ok(self.tables.read().await.players.get(&id).cloned())
    }

    async fn players_by_team(&self, team_id: i32) -> Result<Vec<Player>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .players
            .values()
            .filter(|p| p.team_id == Some(team_id))
            .cloned()
            .collect())
    }

    async fn upsert_player(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_team("players", player.team_id)?;

        let player = Player::from(player);
        tables.players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn matches(&self, limit: Option<usize>) -> Result<Vec<Match>, StoreError> {
        let mut matches: Vec<Match> = self.tables.read().await.matches.values().cloned().collect();
        newest_first(&mut matches);
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }

    async fn matches_by_team(&self, team_id: i32) -> Result<Vec<Match>, StoreError> {
        let mut matches: Vec<Match> = self
            .tables
            .read()
            .await
            .matches
            .values()
            .filter(|m| m.involves(team_id))
            .cloned()
            .collect();
        newest_first(&mut matches);
        Ok(matches)
    }

    async fn get_match(&self, id: i32) -> Result<Option<Match>, StoreError> {
        Ok(self.tables.read().await.matches.get(&id).cloned())
    }

    async fn count_matches(&self) -> Result<usize, StoreError> {
        Ok(self.tables.read().await.matches.len())
    }

    async fn upsert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_team("matches", new_match.team1_id)?;
        tables.require_team("matches", new_match.team2_id)?;
        tables.require_team("matches", new_match.winner_id)?;

        let existing = tables.matches.get(&new_match.id).cloned();
        let stored = new_match.apply(existing.as_ref());
        tables.matches.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn mark_stats_collected(&self, id: i32) -> Result<(), StoreError> {
        if let Some(m) = self.tables.write().await.matches.get_mut(&id) {
            m.stats_collected = true;
        }
        Ok(())
    }

    async fn mark_demo_parsed(&self, id: i32, demo_url: Option<String>) -> Result<(), StoreError> {
        if let Some(m) = self.tables.write().await.matches.get_mut(&id) {
            m.demo_parsed = true;
            if demo_url.is_some() {
                m.demo_url = demo_url;
            }
        }
        Ok(())
    }

    async fn rounds_by_match(&self, match_id: i32) -> Result<Vec<Round>, StoreError> {
        let tables = self.tables.read().await;
        let mut rounds: Vec<Round> = tables
            .rounds
            .iter()
            .filter(|r| r.match_id == match_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| r.round_number);
        Ok(rounds)
    }

    async fn insert_rounds(&self, rounds: Vec<Round>) -> Result<usize, StoreError> {
        let mut tables = self.tables.write().await;
        for round in rounds.iter() {
            tables.require_match("rounds", round.match_id)?;
            tables.require_team("rounds", round.winner_team_id)?;
            if tables.rounds.iter().any(|r| r.id == round.id) {
                return Err(StoreError::Duplicate {
                    table: "rounds",
                    id: round.id.clone(),
                });
            }
        }

        let count = rounds.len();
        tables.rounds.extend(rounds);
        Ok(count)
    }

    async fn kills_by_match(&self, match_id: i32) -> Result<Vec<Kill>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .kills
            .iter()
            .filter(|k| k.match_id == match_id)
            .cloned()
            .collect())
    }

    async fn grenade_kills(&self) -> Result<Vec<Kill>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.kills.iter().filter(|k| k.is_grenade).cloned().collect())
    }

    async fn insert_kills(&self, kills: Vec<Kill>) -> Result<usize, StoreError> {
        let mut tables = self.tables.write().await;
        for kill in kills.iter() {
            tables.require_match("kills", kill.match_id)?;
            tables.require_player("kills", kill.attacker_id)?;
            tables.require_player("kills", kill.victim_id)?;
            if let Some(round_id) = kill.round_id.as_ref() {
                if !tables.rounds.iter().any(|r| &r.id == round_id) {
                    return Err(StoreError::MissingReference {
                        table: "kills",
                        id: round_id.clone(),
                    });
                }
            }
        }

        let count = kills.len();
        tables.kills.extend(kills);
        Ok(count)
    }

    async fn match_player_stats(&self, match_id: i32) -> Result<Vec<MatchPlayerStats>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stats
            .iter()
            .filter(|s| s.match_id == match_id)
            .cloned()
            .collect())
    }

    async fn all_match_player_stats(&self) -> Result<Vec<MatchPlayerStats>, StoreError> {
        Ok(self.tables.read().await.stats.clone())
    }

    async fn insert_match_player_stats(
        &self,
        stats: MatchPlayerStats,
    ) -> Result<MatchPlayerStats, StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_match("match_player_stats", stats.match_id)?;
        tables.require_player("match_player_stats", Some(stats.player_id))?;
        tables.require_team("match_player_stats", stats.team_id)?;
        if tables
            .stats
            .iter()
            .any(|s| s.match_id == stats.match_id && s.player_id == stats.player_id)
        {
            return Err(StoreError::Duplicate {
                table: "match_player_stats",
                id: format!("{}/{}", stats.match_id, stats.player_id),
            });
        }

        tables.stats.push(stats.clone());
        Ok(stats)
    }

    async fn collection_jobs(&self) -> Result<Vec<CollectionJobWithTeam>, StoreError> {
        let tables = self.tables.read().await;
        Ok(super::jobs_with_teams(tables.jobs.clone(), &tables.ranked_teams()))
    }

    async fn collection_job(&self, team_id: i32) -> Result<Option<CollectionJob>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.jobs.iter().find(|j| j.team_id == team_id).cloned())
    }

    async fn create_collection_job(&self, job: CollectionJob) -> Result<CollectionJob, StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_team("data_collection_jobs", Some(job.team_id))?;
        if tables.jobs.iter().any(|j| j.team_id == job.team_id) {
            return Err(StoreError::Duplicate {
                table: "data_collection_jobs",
                id: job.team_id.to_string(),
            });
        }

        tables.jobs.push(job.clone());
        Ok(job)
    }

    async fn update_collection_job(
        &self,
        id: &str,
        update: JobUpdate,
    ) -> Result<Option<CollectionJob>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(job) = tables.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };

        update.apply(job)?;
        Ok(Some(job.clone()))
    }
}
