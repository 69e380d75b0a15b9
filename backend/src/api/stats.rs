use axum::extract::State;
use axum::response::Json;
use common::stats::{DashboardStats, GrenadeOverview, MapOverview, Rankings};

use super::{ApiError, AppState, Context};

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/dashboard", axum::routing::get(dashboard))
        .route("/grenades", axum::routing::get(grenades))
        .route("/maps", axum::routing::get(maps))
        .route("/rankings", axum::routing::get(rankings))
}

#[tracing::instrument(skip(state))]
async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    const MESSAGE: &str = "Failed to fetch dashboard stats";

    let teams = state.store.teams().await.context(MESSAGE)?;
    let matches = state.store.matches(None).await.context(MESSAGE)?;
    let players = state.store.players().await.context(MESSAGE)?;
    let stats = state.store.all_match_player_stats().await.context(MESSAGE)?;
    let kills = state.store.grenade_kills().await.context(MESSAGE)?;
    let jobs: Vec<common::CollectionJob> = state
        .store
        .collection_jobs()
        .await
        .context(MESSAGE)?
        .into_iter()
        .map(|j| j.job)
        .collect();

    let map_stats = analysis::maps::grenade_deaths(&matches, &kills);
    let grenade_leaderboard = analysis::grenades::leaderboard(&players, &teams, &stats);
    let match_count = matches.len();
    let recent: Vec<common::Match> = matches
        .into_iter()
        .take(analysis::dashboard::RECENT_MATCHES)
        .collect();

    Ok(Json(analysis::dashboard::summarize(
        analysis::dashboard::DashboardInput {
            team_count: teams.len(),
            match_count,
            kills: &kills,
            jobs: &jobs,
            recent_matches: analysis::matches::with_teams(recent, &teams),
            grenade_leaderboard,
            map_stats,
        },
    )))
}

#[tracing::instrument(skip(state))]
async fn grenades(State(state): State<AppState>) -> Result<Json<GrenadeOverview>, ApiError> {
    const MESSAGE: &str = "Failed to fetch grenade stats";

    let players = state.store.players().await.context(MESSAGE)?;
    let teams = state.store.teams().await.context(MESSAGE)?;
    let stats = state.store.all_match_player_stats().await.context(MESSAGE)?;
    let match_count = state.store.count_matches().await.context(MESSAGE)?;

    let leaderboard = analysis::grenades::leaderboard(&players, &teams, &stats);
    Ok(Json(analysis::grenades::overview(leaderboard, match_count)))
}

#[tracing::instrument(skip(state))]
async fn maps(State(state): State<AppState>) -> Result<Json<MapOverview>, ApiError> {
    const MESSAGE: &str = "Failed to fetch map stats";

    let matches = state.store.matches(None).await.context(MESSAGE)?;
    let kills = state.store.grenade_kills().await.context(MESSAGE)?;

    let per_map = analysis::maps::grenade_deaths(&matches, &kills);
    Ok(Json(analysis::maps::overview(per_map)))
}

#[tracing::instrument(skip(state))]
async fn rankings(State(state): State<AppState>) -> Result<Json<Rankings>, ApiError> {
    const MESSAGE: &str = "Failed to fetch rankings";

    let players = state.store.players().await.context(MESSAGE)?;
    let teams = state.store.teams().await.context(MESSAGE)?;
    let matches = state.store.matches(None).await.context(MESSAGE)?;
    let stats = state.store.all_match_player_stats().await.context(MESSAGE)?;

    let player_stats = analysis::players::with_stats(&players, &teams, &stats);
    Ok(Json(analysis::rankings::compute(&player_stats, &teams, &matches)))
}
