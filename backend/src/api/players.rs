use axum::extract::State;
use axum::response::Json;
use common::stats::PlayerWithStats;

use super::{ApiError, AppState, Context, PathParam};

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(list))
        .route("/:id", axum::routing::get(player))
}

#[tracing::instrument(skip(state))]
async fn list(State(state): State<AppState>) -> Result<Json<Vec<PlayerWithStats>>, ApiError> {
    const MESSAGE: &str = "Failed to fetch players";

    let players = state.store.players().await.context(MESSAGE)?;
    let teams = state.store.teams().await.context(MESSAGE)?;
    let stats = state.store.all_match_player_stats().await.context(MESSAGE)?;

    Ok(Json(analysis::players::with_stats(&players, &teams, &stats)))
}

#[tracing::instrument(skip(state))]
async fn player(
    State(state): State<AppState>,
    PathParam(player_id): PathParam<i32>,
) -> Result<Json<PlayerWithStats>, ApiError> {
    const MESSAGE: &str = "Failed to fetch player";

    let player = state
        .store
        .player(player_id)
        .await
        .context(MESSAGE)?
        .ok_or(ApiError::NotFound("Player"))?;
    let teams = state.store.teams().await.context(MESSAGE)?;
    let stats = state.store.all_match_player_stats().await.context(MESSAGE)?;

    analysis::players::with_stats(&[player], &teams, &stats)
        .pop()
        .map(Json)
        .ok_or(ApiError::NotFound("Player"))
}
