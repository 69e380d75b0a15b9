use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::collection::{CollectionError, Collector};
use crate::demo::ImportError;
use crate::store::Store;

pub mod collection;
pub mod matches;
pub mod players;
pub mod stats;
pub mod teams;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub collector: Arc<Collector>,
}

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .nest("/teams", teams::router())
        .nest("/players", players::router())
        .nest("/matches", matches::router())
        .nest("/stats", stats::router())
        .nest("/collection", collection::router())
        .with_state(state)
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// [`axum::Json`] reporting malformed bodies as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// [`axum::extract::Path`] reporting unparsable segments as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    /// The source is logged, only the message is returned
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, source } = &self {
            tracing::error!("{}: {}", message, source);
        }

        let body = common::api::ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Attaches the message returned to clients when an internal step fails.
pub trait Context<T> {
    fn context(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn context(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::Internal {
            message,
            source: e.into(),
        })
    }
}

impl ApiError {
    /// Maps the caller-facing collection errors to their status, anything else
    /// is internal.
    pub fn from_collection(error: CollectionError, message: &'static str) -> Self {
        match error {
            CollectionError::AlreadyRunning => {
                Self::Conflict("Collection already in progress".to_owned())
            }
            CollectionError::StatsAlreadyCollected(_) => Self::Conflict(error.to_string()),
            CollectionError::UnknownTeam(_) => Self::NotFound("Team"),
            CollectionError::UnknownMatch(_) => Self::NotFound("Match"),
            other => Self::Internal {
                message,
                source: Box::new(other),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ImportError> for ApiError {
    fn from(error: ImportError) -> Self {
        match error {
            ImportError::UnknownMatch(_) => Self::NotFound("Match"),
            ImportError::AlreadyParsed(_) => Self::Conflict(error.to_string()),
            ImportError::UnknownPlayer(_) => Self::BadRequest(error.to_string()),
            ImportError::Store(e) => Self::Internal {
                message: "Failed to import demo",
                source: Box::new(e),
            },
        }
    }
}
