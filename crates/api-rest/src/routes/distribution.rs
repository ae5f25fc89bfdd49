//! Herb distribution map.

use crate::error::{map_error, ApiError};
use crate::state::AppState;
use api_shared::{AddDistributionReq, AddLocationReq, TextQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use herbal_core::distribution::{DistributionRecord, RegionSummary};

#[utoipa::path(
    get,
    path = "/distribution",
    params(TextQuery),
    responses(
        (status = 200, description = "Records whose herb name matches", body = [DistributionRecord]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_distribution(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Result<Json<Vec<DistributionRecord>>, ApiError> {
    let session = state.session()?;
    let records = session
        .distribution
        .search(query.q.as_deref().unwrap_or_default());
    Ok(Json(records.into_iter().cloned().collect()))
}

#[utoipa::path(
    get,
    path = "/distribution/regions",
    responses(
        (status = 200, description = "Map regions in map order with their herbs", body = [RegionSummary]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegionSummary>>, ApiError> {
    let session = state.session()?;
    Ok(Json(session.distribution.regions()))
}

#[utoipa::path(
    post,
    path = "/distribution",
    request_body = AddDistributionReq,
    responses(
        (status = 201, description = "Record added", body = DistributionRecord),
        (status = 400, description = "Missing fields or unknown region"),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_record(
    State(state): State<AppState>,
    Json(req): Json<AddDistributionReq>,
) -> Result<(StatusCode, Json<DistributionRecord>), ApiError> {
    let mut session = state.session()?;
    session.require_admin()?;
    let record = session
        .distribution
        .add_record(&req.name, &req.description, &req.locations)
        .map_err(map_error)?
        .clone();
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    post,
    path = "/distribution/{id}/locations",
    params(("id" = u32, Path, description = "Distribution record id")),
    request_body = AddLocationReq,
    responses(
        (status = 200, description = "Location added", body = DistributionRecord),
        (status = 400, description = "Empty or unknown location"),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Distribution record not found"),
        (status = 409, description = "Location already recorded"),
        (status = 500, description = "Internal server error")
    )
)]
/// Add a region to a herb's distribution (admin)
///
/// # Errors
/// Returns `400 Bad Request` for an empty location or one outside the six map regions, and
/// `409 Conflict` if the record already lists it.
pub async fn add_location(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<AddLocationReq>,
) -> Result<Json<DistributionRecord>, ApiError> {
    let mut session = state.session()?;
    session.require_admin()?;
    session
        .distribution
        .add_location(id, &req.location)
        .cloned()
        .map(Json)
        .map_err(map_error)
}

#[utoipa::path(
    delete,
    path = "/distribution/{id}/locations/{location}",
    params(
        ("id" = u32, Path, description = "Distribution record id"),
        ("location" = String, Path, description = "Region name")
    ),
    responses(
        (status = 200, description = "Location removed if it was listed", body = DistributionRecord),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Distribution record not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_location(
    State(state): State<AppState>,
    Path((id, location)): Path<(u32, String)>,
) -> Result<Json<DistributionRecord>, ApiError> {
    let mut session = state.session()?;
    session.require_admin()?;
    session
        .distribution
        .remove_location(id, &location)
        .cloned()
        .map(Json)
        .map_err(map_error)
}
