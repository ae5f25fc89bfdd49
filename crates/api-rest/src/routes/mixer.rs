//! Blend recommendations, the ingredient selector with its blend draft, and favorites.

use crate::error::{map_error, not_found, ApiError};
use crate::state::AppState;
use api_shared::{
    AddDraftItemReq, BlendValidationRes, IngredientsQuery, IngredientsRes, RecommendReq,
    RecommendRes, SaveFavoriteRes, UpdateDraftItemReq,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use herbal_core::classifier::classify;
use herbal_core::favorites::{Favorite, SaveOutcome};
use herbal_core::ingredients::{self, BlendDraft, BlendForm};
use herbal_core::mixer::{self, Recommendation};
use herbal_core::NonEmptyText;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/mixer/recommendations",
    request_body = RecommendReq,
    responses(
        (status = 200, description = "Synthesized blends for the prompt", body = RecommendRes),
        (status = 400, description = "Empty prompt"),
        (status = 500, description = "Internal server error")
    )
)]
/// Recommend blends for a free-text prompt
///
/// Classifies the prompt, synthesizes one blend per template of the chosen tier and keeps
/// those matching the purpose.
///
/// # Errors
/// Returns `400 Bad Request` if the prompt is blank.
#[axum::debug_handler]
pub async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendReq>,
) -> Result<Json<RecommendRes>, ApiError> {
    let prompt = NonEmptyText::new(&req.prompt).map_err(|e| map_error(e.into()))?;
    let mut session = state.session()?;
    let recommendations =
        mixer::recommend(&state.catalog, &prompt, req.tier, req.purpose, &mut session.rng);

    Ok(Json(RecommendRes {
        flags: classify(prompt.as_str()),
        recommendations,
    }))
}

#[utoipa::path(
    get,
    path = "/mixer/ingredients",
    params(IngredientsQuery),
    responses(
        (status = 200, description = "Ingredients matching the filters", body = IngredientsRes)
    )
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientsQuery>,
) -> Json<IngredientsRes> {
    let all = state.catalog.ingredients();
    let matching = ingredients::filter_ingredients(
        all,
        query.q.as_deref().unwrap_or_default(),
        query.property.as_deref(),
    );
    Json(IngredientsRes {
        ingredients: matching.into_iter().cloned().collect(),
        properties: ingredients::property_list(all),
    })
}

#[utoipa::path(
    get,
    path = "/mixer/draft",
    responses(
        (status = 200, description = "Ingredients picked for the blend", body = BlendDraft),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_draft(State(state): State<AppState>) -> Result<Json<BlendDraft>, ApiError> {
    let session = state.session()?;
    Ok(Json(session.draft.clone()))
}

#[utoipa::path(
    post,
    path = "/mixer/draft/items",
    request_body = AddDraftItemReq,
    responses(
        (status = 201, description = "Ingredient added with amount 1 sendok teh", body = BlendDraft),
        (status = 200, description = "Ingredient was already in the blend", body = BlendDraft),
        (status = 404, description = "Ingredient not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Add an ingredient to the blend draft
///
/// Each ingredient appears at most once; adding it again leaves the draft unchanged.
pub async fn add_draft_item(
    State(state): State<AppState>,
    Json(req): Json<AddDraftItemReq>,
) -> Result<(StatusCode, Json<BlendDraft>), ApiError> {
    let ingredient = state
        .catalog
        .ingredient(&req.ingredient_id)
        .ok_or_else(|| not_found("Ingredient not found"))?;

    let mut session = state.session()?;
    let status = if session.draft.add(ingredient) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(session.draft.clone())))
}

#[utoipa::path(
    put,
    path = "/mixer/draft/items/{id}",
    params(("id" = String, Path, description = "Ingredient id")),
    request_body = UpdateDraftItemReq,
    responses(
        (status = 200, description = "Amount and/or unit updated", body = BlendDraft),
        (status = 404, description = "Ingredient not in blend"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_draft_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDraftItemReq>,
) -> Result<Json<BlendDraft>, ApiError> {
    let mut session = state.session()?;
    if !session.draft.contains(&id) {
        return Err(not_found("Ingredient not in blend"));
    }
    if let Some(amount) = req.amount {
        session.draft.set_amount(&id, amount);
    }
    if let Some(unit) = req.unit {
        session.draft.set_unit(&id, unit);
    }
    Ok(Json(session.draft.clone()))
}

#[utoipa::path(
    delete,
    path = "/mixer/draft/items/{id}",
    params(("id" = String, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient removed", body = BlendDraft),
        (status = 404, description = "Ingredient not in blend"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_draft_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlendDraft>, ApiError> {
    let mut session = state.session()?;
    if !session.draft.remove(&id) {
        return Err(not_found("Ingredient not in blend"));
    }
    Ok(Json(session.draft.clone()))
}

#[utoipa::path(
    post,
    path = "/mixer/blends/validate",
    request_body = BlendForm,
    responses(
        (status = 200, description = "Validation result with every field error", body = BlendValidationRes)
    )
)]
pub async fn validate_blend(Json(form): Json<BlendForm>) -> Json<BlendValidationRes> {
    let errors = ingredients::validate_blend_form(&form).err().unwrap_or_default();
    Json(BlendValidationRes {
        valid: errors.is_empty(),
        errors,
    })
}

#[utoipa::path(
    get,
    path = "/mixer/favorites",
    responses(
        (status = 200, description = "Saved favorites in insertion order", body = [Favorite]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let session = state.session()?;
    Ok(Json(session.favorites.list().to_vec()))
}

#[utoipa::path(
    post,
    path = "/mixer/favorites",
    request_body = Recommendation,
    responses(
        (status = 201, description = "Favorite saved", body = SaveFavoriteRes),
        (status = 200, description = "An identical favorite already exists", body = SaveFavoriteRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Save a recommendation as a favorite
///
/// Saving the same blend twice keeps the first entry.
pub async fn save_favorite(
    State(state): State<AppState>,
    Json(recommendation): Json<Recommendation>,
) -> Result<(StatusCode, Json<SaveFavoriteRes>), ApiError> {
    let mut session = state.session()?;
    let (status, added, favorite) = match session.favorites.save(recommendation) {
        SaveOutcome::Added(favorite) => (StatusCode::CREATED, true, favorite),
        SaveOutcome::AlreadySaved(favorite) => (StatusCode::OK, false, favorite),
    };
    Ok((status, Json(SaveFavoriteRes { added, favorite })))
}

#[utoipa::path(
    delete,
    path = "/mixer/favorites/{id}",
    params(("id" = Uuid, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "Favorite removed", body = Favorite),
        (status = 404, description = "Favorite not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Favorite>, ApiError> {
    let mut session = state.session()?;
    session
        .favorites
        .remove(id)
        .map(Json)
        .ok_or_else(|| not_found("Favorite not found"))
}
