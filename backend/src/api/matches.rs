use axum::extract::State;
use axum::response::Json;
use common::api::{CountResponse, DemoImport, ImportedDemo, MatchDetails};
use common::MatchWithTeams;

use super::{ApiError, AppState, Context, JsonBody, PathParam};

/// Number of matches in the match list.
pub const MATCH_LIST_LIMIT: usize = 100;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(list))
        .route("/:id", axum::routing::get(details))
        .route("/:id/stats", axum::routing::post(collect_stats))
        .route("/:id/demo", axum::routing::post(import_demo))
}

#[tracing::instrument(skip(state))]
async fn list(State(state): State<AppState>) -> Result<Json<Vec<MatchWithTeams>>, ApiError> {
    const MESSAGE: &str = "Failed to fetch matches";

    let matches = state
        .store
        .matches(Some(MATCH_LIST_LIMIT))
        .await
        .context(MESSAGE)?;
    let teams = state.store.teams().await.context(MESSAGE)?;

    Ok(Json(analysis::matches::with_teams(matches, &teams)))
}

#[tracing::instrument(skip(state))]
async fn details(
    State(state): State<AppState>,
    PathParam(match_id): PathParam<i32>,
) -> Result<Json<MatchDetails>, ApiError> {
    const MESSAGE: &str = "Failed to fetch match details";

    let info = state
        .store
        .get_match(match_id)
        .await
        .context(MESSAGE)?
        .ok_or(ApiError::NotFound("Match"))?;

    Ok(Json(MatchDetails {
        info,
        rounds: state.store.rounds_by_match(match_id).await.context(MESSAGE)?,
        kills: state.store.kills_by_match(match_id).await.context(MESSAGE)?,
        player_stats: state
            .store
            .match_player_stats(match_id)
            .await
            .context(MESSAGE)?,
    }))
}

#[tracing::instrument(skip(state))]
async fn collect_stats(
    State(state): State<AppState>,
    PathParam(match_id): PathParam<i32>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state
        .collector
        .collect_match_stats(match_id)
        .await
        .map_err(|e| ApiError::from_collection(e, "Failed to collect match stats"))?;

    Ok(Json(CountResponse {
        success: true,
        count,
    }))
}

#[tracing::instrument(skip(state, demo))]
async fn import_demo(
    State(state): State<AppState>,
    PathParam(match_id): PathParam<i32>,
    JsonBody(demo): JsonBody<DemoImport>,
) -> Result<Json<ImportedDemo>, ApiError> {
    let imported = crate::demo::import(state.store.as_ref(), match_id, demo).await?;
    Ok(Json(imported))
}
