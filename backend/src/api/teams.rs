use axum::extract::State;
use axum::response::Json;
use common::api::CountResponse;
use common::stats::TeamDetails;
use common::Team;

use super::{ApiError, AppState, Context, PathParam};

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(list))
        .route("/fetch", axum::routing::post(fetch))
        .route("/:id", axum::routing::get(details))
}

#[tracing::instrument(skip(state))]
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = state.store.teams().await.context("Failed to fetch teams")?;
    Ok(Json(teams))
}

#[tracing::instrument(skip(state))]
async fn details(
    State(state): State<AppState>,
    PathParam(team_id): PathParam<i32>,
) -> Result<Json<TeamDetails>, ApiError> {
    const MESSAGE: &str = "Failed to fetch team details";

    let team = state
        .store
        .team(team_id)
        .await
        .context(MESSAGE)?
        .ok_or(ApiError::NotFound("Team"))?;

    let teams = state.store.teams().await.context(MESSAGE)?;
    let roster = state.store.players_by_team(team_id).await.context(MESSAGE)?;
    let matches = state.store.matches_by_team(team_id).await.context(MESSAGE)?;
    let players = state.store.players().await.context(MESSAGE)?;
    let stats = state.store.all_match_player_stats().await.context(MESSAGE)?;

    let player_stats = analysis::players::with_stats(&players, &teams, &stats);
    let matches = analysis::matches::with_teams(matches, &teams);

    Ok(Json(analysis::teams::details(team, roster, matches, &player_stats)))
}

#[tracing::instrument(skip(state))]
async fn fetch(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let limit = state.collector.limits().top_teams;
    let teams = state
        .collector
        .fetch_top_teams(limit)
        .await
        .map_err(|e| ApiError::from_collection(e, "Failed to fetch teams"))?;

    Ok(Json(CountResponse {
        success: true,
        count: teams.len(),
    }))
}
