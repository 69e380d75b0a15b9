use common::collection::{CollectionOverview, CollectionSummary};
use common::{CollectionJobWithTeam, JobStatus, Team};

pub fn overview(
    teams: Vec<Team>,
    jobs: Vec<CollectionJobWithTeam>,
    match_count: usize,
) -> CollectionOverview {
    let count = |status: JobStatus| jobs.iter().filter(|j| j.job.status == status).count();

    let completed_teams = count(JobStatus::Completed);
    let in_progress_teams = count(JobStatus::InProgress);

    let summary = CollectionSummary {
        total_teams: teams.len(),
        completed_teams,
        // Teams without any job count as pending too
        pending_teams: teams
            .len()
            .saturating_sub(completed_teams + in_progress_teams),
        in_progress_teams,
        total_matches: match_count,
    };

    CollectionOverview {
        teams,
        jobs,
        summary,
    }
}
