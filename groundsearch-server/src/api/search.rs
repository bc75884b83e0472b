//! Search and follow-up handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{debug, error, warn, Level};

use groundsearch_types::{
    ErrorBody, FollowUpRequest, FormattedResponse, SearchError, SearchResponse,
};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// `SearchError` rendered as `{message}` with the mapped status.
#[derive(Debug)]
pub struct ApiError(pub SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let level = log_level(&self.0);
        if level == Level::DEBUG {
            debug!("Request rejected ({}): {}", status, self.0);
        } else if level == Level::WARN {
            warn!("Request failed, retry may succeed ({}): {}", status, self.0);
        } else {
            error!("Request failed ({}): {}", status, self.0);
        }

        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

/// Severity used when logging a failed request.
pub(crate) fn log_level(err: &SearchError) -> Level {
    if err.is_client_error() {
        Level::DEBUG
    } else if err.is_retryable() {
        Level::WARN
    } else {
        Level::ERROR
    }
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!("Malformed search query string: {}", rejection.body_text());
            SearchParams::default()
        },
    };

    let response = state.service().initiate_search(params.q.as_deref()).await?;
    Ok(Json(response))
}

pub async fn follow_up(
    State(state): State<AppState>,
    payload: Result<Json<FollowUpRequest>, JsonRejection>,
) -> Result<Json<FormattedResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Malformed follow-up body: {}", rejection.body_text());
        SearchError::invalid("Both sessionId and query are required")
    })?;

    let response = state
        .service()
        .continue_search(request.session_id.as_deref(), request.query.as_deref())
        .await?;
    Ok(Json(response))
}
