//! Cache endpoint handlers

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json, SearchRequest, SearchResponse, StoreQueryRequest, StoreQueryResponse,
};
use crate::domain::{DomainError, LookupOutcome};

/// POST /query
pub async fn store_query(
    State(state): State<AppState>,
    Json(request): Json<StoreQueryRequest>,
) -> Result<Json<StoreQueryResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        query_len = request.query.len(),
        "Processing store request"
    );

    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("Query must not be empty"));
    }

    let receipt = state
        .cache_service
        .store(&request.query, &request.response)
        .await?;

    Ok(Json(StoreQueryResponse::success(
        receipt.query_hash.as_str(),
    )))
}

/// POST /search
pub async fn search_query(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        query_len = request.query.len(),
        "Processing search request"
    );

    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("Query must not be empty"));
    }

    match state.cache_service.lookup(&request.query).await {
        Ok(LookupOutcome::Hit { query, response }) => Ok(Json(SearchResponse::hit(query, response))),
        Ok(LookupOutcome::Miss) => Ok(Json(SearchResponse::miss())),
        // consistency violation keeps its own status code
        Err(err @ DomainError::PayloadMissing { .. }) => Err(err.into()),
        Err(err) => Err(ApiError::internal(format!(
            "Failed to perform search: {}",
            err
        ))),
    }
}
