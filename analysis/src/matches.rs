use std::collections::HashMap;

use common::{Match, MatchWithTeams, Team};

/// Resolves the team references of every match against `teams`.
///
/// References to teams that are not in `teams` resolve to `None`.
pub fn with_teams(matches: Vec<Match>, teams: &[Team]) -> Vec<MatchWithTeams> {
    let teams: HashMap<i32, &Team> = teams.iter().map(|t| (t.id, t)).collect();
    let lookup = |id: Option<i32>| id.and_then(|id| teams.get(&id)).map(|t| (*t).clone());

    matches
        .into_iter()
        .map(|info| MatchWithTeams {
            team1: lookup(info.team1_id),
            team2: lookup(info.team2_id),
            winner: lookup(info.winner_id),
            info,
        })
        .collect()
}

/// The winning side of a result: the team with the higher score.
///
/// Draws and missing scores have no winner.
pub fn winner(
    team1: Option<i32>,
    team2: Option<i32>,
    score1: Option<i32>,
    score2: Option<i32>,
) -> Option<i32> {
    match (score1, score2) {
        (Some(s1), Some(s2)) if s1 > s2 => team1,
        (Some(s1), Some(s2)) if s2 > s1 => team2,
        _ => None,
    }
}
