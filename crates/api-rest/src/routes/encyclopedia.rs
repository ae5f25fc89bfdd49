//! Herb encyclopedia, remedies and preparation methods.

use crate::error::{not_found, ApiError};
use crate::state::AppState;
use api_shared::{HerbsQuery, InteractionCheckReq, TextQuery};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use herbal_core::catalog::{Condition, Herb, PreparationMethod};
use herbal_core::encyclopedia::{self, ConditionDetail, HerbDetail, InteractionReport};
use herbal_core::search::filter_and_sort;

#[utoipa::path(
    get,
    path = "/herbs",
    params(HerbsQuery),
    responses(
        (status = 200, description = "Herbs matching the query, sorted by name", body = [Herb])
    )
)]
/// Search the encyclopedia
///
/// An empty query returns every herb. Category membership ignores case.
#[axum::debug_handler]
pub async fn list_herbs(
    State(state): State<AppState>,
    Query(query): Query<HerbsQuery>,
) -> Json<Vec<Herb>> {
    let herbs = filter_and_sort(
        state.catalog.herbs(),
        query.q.as_deref().unwrap_or_default(),
        query.category.as_deref(),
        query.sort.unwrap_or_default(),
    );
    Json(herbs.into_iter().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/herbs/categories",
    responses(
        (status = 200, description = "Sorted unique herb categories", body = [String])
    )
)]
pub async fn herb_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.categories())
}

#[utoipa::path(
    get,
    path = "/herbs/{id}",
    params(("id" = String, Path, description = "Herb id")),
    responses(
        (status = 200, description = "Herb with interactions, methods and remedies", body = HerbDetail),
        (status = 404, description = "Herb not found")
    )
)]
/// Herb detail
///
/// # Errors
/// Returns `404 Not Found` for an unknown herb id.
#[axum::debug_handler]
pub async fn get_herb(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HerbDetail>, ApiError> {
    encyclopedia::herb_detail(&state.catalog, &id)
        .map(Json)
        .ok_or_else(|| not_found("Herb not found"))
}

#[utoipa::path(
    post,
    path = "/interactions/check",
    request_body = InteractionCheckReq,
    responses(
        (status = 200, description = "Known interactions within the blend", body = InteractionReport)
    )
)]
/// Check a blend for interactions
///
/// Unknown herb ids are listed in the report rather than rejected.
pub async fn check_interactions(
    State(state): State<AppState>,
    Json(req): Json<InteractionCheckReq>,
) -> Json<InteractionReport> {
    Json(encyclopedia::check_interactions(
        &state.catalog,
        &req.herbs,
        req.drug.as_deref(),
    ))
}

#[utoipa::path(
    get,
    path = "/preparations",
    params(TextQuery),
    responses(
        (status = 200, description = "Preparation methods matching the query", body = [PreparationMethod])
    )
)]
pub async fn list_preparations(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Json<Vec<PreparationMethod>> {
    let methods =
        encyclopedia::search_preparations(&state.catalog, query.q.as_deref().unwrap_or_default());
    Json(methods.into_iter().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/conditions",
    params(TextQuery),
    responses(
        (status = 200, description = "Conditions matching the query", body = [Condition])
    )
)]
pub async fn list_conditions(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Json<Vec<Condition>> {
    let conditions =
        encyclopedia::search_conditions(&state.catalog, query.q.as_deref().unwrap_or_default());
    Json(conditions.into_iter().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/conditions/{id}",
    params(("id" = String, Path, description = "Condition id")),
    responses(
        (status = 200, description = "Condition with resolved remedies", body = ConditionDetail),
        (status = 404, description = "Condition not found")
    )
)]
pub async fn get_condition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConditionDetail>, ApiError> {
    encyclopedia::condition_detail(&state.catalog, &id)
        .map(Json)
        .ok_or_else(|| not_found("Condition not found"))
}
