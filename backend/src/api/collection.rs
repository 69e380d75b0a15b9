use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use common::api::{MessageResponse, StartCollection};
use common::collection::CollectionOverview;

use super::{ApiError, AppState, Context};

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(overview))
        .route("/start", axum::routing::post(start))
}

#[tracing::instrument(skip(state))]
async fn overview(State(state): State<AppState>) -> Result<Json<CollectionOverview>, ApiError> {
    const MESSAGE: &str = "Failed to fetch collection status";

    let teams = state.store.teams().await.context(MESSAGE)?;
    let jobs = state.store.collection_jobs().await.context(MESSAGE)?;
    let match_count = state.store.count_matches().await.context(MESSAGE)?;

    Ok(Json(analysis::collection::overview(teams, jobs, match_count)))
}

/// Starts a background run. The body may be empty to collect every team.
#[tracing::instrument(skip(state, body))]
async fn start(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let team_id = requested_team(&body)?;

    state
        .collector
        .start(team_id)
        .await
        .map_err(|e| ApiError::from_collection(e, "Failed to start collection"))?;

    let message = match team_id {
        Some(id) => format!("Started collecting matches of team {}", id),
        None => "Started full data collection".to_owned(),
    };
    tracing::info!("{}", message);

    Ok(Json(MessageResponse {
        success: true,
        message,
    }))
}

fn requested_team(body: &[u8]) -> Result<Option<i32>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let request: StartCollection = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;
    Ok(request.team_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_collects_every_team() {
        assert_eq!(None, requested_team(b"").unwrap());
        assert_eq!(None, requested_team(b" \n").unwrap());
        assert_eq!(None, requested_team(b"{}").unwrap());
    }

    #[test]
    fn team_is_read_from_body() {
        assert_eq!(Some(7), requested_team(br#"{"teamId": 7}"#).unwrap());
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert!(matches!(
            requested_team(br#"{"teamId": "abc"}"#),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(requested_team(b"not json"), Err(ApiError::BadRequest(_))));
    }
}
