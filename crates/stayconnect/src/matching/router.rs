use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::directory::{ListingCatalog, ProfileDirectory};
use super::domain::{HostId, MatchedHostView, UserId};
use super::engine::{MatchingEngine, MatchingError, DEFAULT_RANKING_LIMIT};

/// Router builder exposing the ranking and single-listing scoring endpoints.
pub fn matching_router<D, C>(engine: Arc<MatchingEngine<D, C>>) -> Router
where
    D: ProfileDirectory + 'static,
    C: ListingCatalog + 'static,
{
    Router::new()
        .route("/api/v1/matching/hosts", get(ranking_handler::<D, C>))
        .route(
            "/api/v1/matching/rate/:host_id",
            get(rate_handler::<D, C>),
        )
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankingParams {
    pub(crate) guest_id: u64,
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateParams {
    pub(crate) guest_id: u64,
}

pub(crate) async fn ranking_handler<D, C>(
    State(engine): State<Arc<MatchingEngine<D, C>>>,
    Query(params): Query<RankingParams>,
) -> Response
where
    D: ProfileDirectory + 'static,
    C: ListingCatalog + 'static,
{
    let limit = params.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    match engine.rank_hosts_for_guest(UserId(params.guest_id), limit) {
        Ok(matched) => {
            let views: Vec<MatchedHostView> = matched.iter().map(|host| host.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(MatchingError::Directory(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(not_found) => {
            let payload = json!({ "error": not_found.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn rate_handler<D, C>(
    State(engine): State<Arc<MatchingEngine<D, C>>>,
    Path(host_id): Path<u64>,
    Query(params): Query<RateParams>,
) -> Response
where
    D: ProfileDirectory + 'static,
    C: ListingCatalog + 'static,
{
    match engine.score_single_host(UserId(params.guest_id), HostId(host_id)) {
        Ok(rate) => (StatusCode::OK, axum::Json(rate)).into_response(),
        Err(MatchingError::Directory(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(not_found) => {
            let payload = json!({ "error": not_found.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
