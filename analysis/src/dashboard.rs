use common::stats::{DashboardStats, GrenadeStats, MapGrenadeStats};
use common::{CollectionJob, JobStatus, Kill, MatchWithTeams};

pub const RECENT_MATCHES: usize = 10;
pub const TOP_GRENADE_KILLERS: usize = 5;
pub const TOP_MAPS: usize = 7;

/// Everything the dashboard summary is reduced from.
#[derive(Debug)]
pub struct DashboardInput<'a> {
    pub team_count: usize,
    pub match_count: usize,
    pub kills: &'a [Kill],
    pub jobs: &'a [CollectionJob],
    /// Most recent first
    pub recent_matches: Vec<MatchWithTeams>,
    pub grenade_leaderboard: Vec<GrenadeStats>,
    pub map_stats: Vec<MapGrenadeStats>,
}

/// Share of teams with a completed collection job, in whole percent.
pub fn collection_progress(completed: usize, teams: usize) -> u32 {
    if teams == 0 {
        return 0;
    }
    (completed as f64 / teams as f64 * 100.0).round() as u32
}

pub fn summarize(input: DashboardInput<'_>) -> DashboardStats {
    let DashboardInput {
        team_count,
        match_count,
        kills,
        jobs,
        mut recent_matches,
        mut grenade_leaderboard,
        mut map_stats,
    } = input;

    let completed = jobs
        .iter()
        .filter(|j| j.status == JobStatus::Completed)
        .count();

    recent_matches.truncate(RECENT_MATCHES);
    grenade_leaderboard.truncate(TOP_GRENADE_KILLERS);
    map_stats.truncate(TOP_MAPS);

    DashboardStats {
        total_teams: team_count,
        total_matches: match_count,
        total_grenade_kills: kills.iter().filter(|k| k.is_grenade).count(),
        collection_progress: collection_progress(completed, team_count),
        recent_matches,
        top_grenade_killers: grenade_leaderboard,
        map_stats,
    }
}
