use common::stats::{PlayerWithStats, TeamStats};
use common::{Match, MatchWithTeams, Player, Team};

/// Number of matches returned with a team's details.
pub const DETAIL_MATCH_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Record {
    pub matches: usize,
    pub wins: usize,
}

impl Record {
    pub fn losses(&self) -> usize {
        self.matches - self.wins
    }

    /// Win rate in percent, zero without matches.
    pub fn win_rate(&self) -> f64 {
        crate::percentage(self.wins, self.matches)
    }
}

pub fn record<'m, I>(team_id: i32, matches: I) -> Record
where
    I: IntoIterator<Item = &'m Match>,
{
    matches
        .into_iter()
        .filter(|m| m.involves(team_id))
        .fold(Record::default(), |mut record, m| {
            record.matches += 1;
            if m.winner_id == Some(team_id) {
                record.wins += 1;
            }
            record
        })
}

/// Assembles the team page: roster, recent matches and team-wide averages of
/// the players' stats.
pub fn details(
    team: Team,
    players: Vec<Player>,
    mut matches: Vec<MatchWithTeams>,
    all_player_stats: &[PlayerWithStats],
) -> common::stats::TeamDetails {
    let record = record(team.id, matches.iter().map(|m| &m.info));

    let player_stats: Vec<PlayerWithStats> = all_player_stats
        .iter()
        .filter(|p| p.player.team_id == Some(team.id))
        .cloned()
        .collect();

    let kills: f64 = player_stats.iter().map(|p| p.avg_kills).sum();
    let deaths: f64 = player_stats.iter().map(|p| p.avg_deaths).sum();

    let stats = TeamStats {
        total_matches: record.matches,
        wins: record.wins,
        losses: record.losses(),
        win_rate: record.win_rate(),
        avg_kills: crate::average(kills, player_stats.len()),
        avg_deaths: crate::average(deaths, player_stats.len()),
        total_grenade_kills: player_stats.iter().map(|p| p.total_grenade_kills).sum(),
    };

    matches.truncate(DETAIL_MATCH_LIMIT);

    common::stats::TeamDetails {
        team,
        players,
        matches,
        stats,
        player_stats,
    }
}
