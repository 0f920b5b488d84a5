use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{error, info};

use crate::domains::search::{SearchError, SearchRequest, SearchResponse};
use crate::server::{ApiError, AppState};

/// `POST /search` - one city-scoped search, fully paginated
pub async fn search_handler(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    info!(
        city = request.city.as_deref().unwrap_or_default(),
        state = request.state.as_deref().unwrap_or_default(),
        "Executing search"
    );

    match state.proxy.search(&request).await {
        Ok(results) => Ok(Json(SearchResponse { results })),
        Err(err) => {
            if let SearchError::UpstreamUnavailable(source) = &err {
                error!(error = %source, "API Error");
            }
            Err(err.into())
        }
    }
}

pub async fn search_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed".to_string())
}
