use crate::infra::{AppState, CatalogState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use stayconnect::error::AppError;
use stayconnect::matching::{
    matching_router, HostId, HostListing, ListingCatalog, MatchingEngine, MatchingError,
    OwnerSummary, ProfileDirectory,
};

/// Page size ceiling for the browse endpoint.
pub(crate) const BROWSE_PAGE_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub(crate) struct BrowseParams {
    pub(crate) location: Option<String>,
    pub(crate) guests: Option<u8>,
    #[serde(default)]
    pub(crate) skip: usize,
    pub(crate) limit: Option<usize>,
}

/// Listing detail plus the owner identity, when the owner profile still
/// resolves.
#[derive(Debug, Serialize)]
pub(crate) struct HostDetailView {
    #[serde(flatten)]
    pub(crate) listing: HostListing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) owner: Option<OwnerSummary>,
}

pub(crate) fn with_matching_routes<D, C>(engine: Arc<MatchingEngine<D, C>>) -> axum::Router
where
    D: ProfileDirectory + 'static,
    C: ListingCatalog + 'static,
{
    matching_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/hosts", axum::routing::get(browse_hosts_endpoint))
        .route(
            "/api/v1/hosts/:host_id",
            axum::routing::get(host_detail_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn browse_hosts_endpoint(
    Extension(state): Extension<CatalogState>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<Vec<HostListing>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(BROWSE_PAGE_LIMIT)
        .min(BROWSE_PAGE_LIMIT);

    let page: Vec<HostListing> = state
        .catalog
        .active_listings()?
        .into_iter()
        .filter(|listing| matches_browse_filters(listing, &params))
        .skip(params.skip)
        .take(limit)
        .collect();

    Ok(Json(page))
}

pub(crate) async fn host_detail_endpoint(
    Extension(state): Extension<CatalogState>,
    Path(host_id): Path<u64>,
) -> Result<Json<HostDetailView>, AppError> {
    let listing = match state.catalog.listing(HostId(host_id))? {
        Some(listing) if listing.is_active => listing,
        _ => return Err(MatchingError::ListingNotFound(HostId(host_id)).into()),
    };

    let owner = state
        .directory
        .user_profile(listing.owner)?
        .map(|profile| OwnerSummary::from_profile(&profile));

    Ok(Json(HostDetailView { listing, owner }))
}

fn matches_browse_filters(listing: &HostListing, params: &BrowseParams) -> bool {
    if let Some(location) = &params.location {
        if !listing
            .location
            .to_lowercase()
            .contains(&location.to_lowercase())
        {
            return false;
        }
    }

    if let Some(guests) = params.guests {
        if listing.max_guests < guests {
            return false;
        }
    }

    true
}
