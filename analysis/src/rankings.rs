use common::stats::{PlayerWithStats, Rankings, TeamRanking};
use common::{Match, Team};

pub const TOP_PLAYERS: usize = 20;
pub const TOP_TEAMS: usize = 15;

fn top_by<F>(
    players: &[PlayerWithStats],
    keep: F,
    key: fn(&PlayerWithStats) -> f64,
) -> Vec<PlayerWithStats>
where
    F: Fn(&PlayerWithStats) -> bool,
{
    let mut selected: Vec<PlayerWithStats> = players.iter().filter(|&p| keep(p)).cloned().collect();
    selected.sort_by(|a, b| key(b).total_cmp(&key(a)));
    selected.truncate(TOP_PLAYERS);
    selected
}

pub fn compute(players: &[PlayerWithStats], teams: &[Team], matches: &[Match]) -> Rankings {
    let top_players = top_by(players, |p| p.matches_played > 0, |p| p.avg_rating);
    let top_fraggers = top_by(players, |p| p.matches_played > 0, |p| p.avg_kills);
    let top_grenade_killers = top_by(
        players,
        |p| p.total_grenade_kills > 0,
        |p| p.total_grenade_kills as f64,
    );

    let mut top_teams: Vec<TeamRanking> = teams
        .iter()
        .map(|team| {
            let record = crate::teams::record(team.id, matches);

            let ratings: Vec<f64> = players
                .iter()
                .filter(|p| p.player.team_id == Some(team.id))
                .map(|p| p.avg_rating)
                .collect();

            TeamRanking {
                team: team.clone(),
                win_rate: record.win_rate(),
                total_matches: record.matches,
                avg_rating: crate::average(ratings.iter().sum(), ratings.len()),
            }
        })
        .filter(|t| t.total_matches > 0)
        .collect();
    top_teams.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    top_teams.truncate(TOP_TEAMS);

    Rankings {
        top_players,
        top_teams,
        top_fraggers,
        top_grenade_killers,
    }
}
