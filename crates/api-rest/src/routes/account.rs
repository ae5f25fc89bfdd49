//! Mock sign-in. Not a security boundary.

use crate::error::{map_error, ApiError};
use crate::state::AppState;
use api_shared::{LoginReq, RegisterReq};
use axum::{extract::State, http::StatusCode, response::Json};
use herbal_core::auth::User;

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Signed in", body = User),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<User>, ApiError> {
    let mut guard = state.session()?;
    let session = &mut *guard;
    session
        .accounts
        .login(session.store.as_mut(), &req.email, &req.password)
        .map(Json)
        .map_err(map_error)
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created and signed in", body = User),
        (status = 400, description = "Blank name, malformed email or short password"),
        (status = 409, description = "Email is already registered"),
        (status = 500, description = "Internal server error")
    )
)]
/// Register a user account
///
/// New accounts always get the `user` role and are signed in immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let mut guard = state.session()?;
    let session = &mut *guard;
    let user = session
        .accounts
        .register(session.store.as_mut(), &req.name, &req.email, &req.password)
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let mut guard = state.session()?;
    let session = &mut *guard;
    session
        .accounts
        .logout(session.store.as_mut())
        .map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The signed-in user", body = User),
        (status = 401, description = "Nobody is signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn me(State(state): State<AppState>) -> Result<Json<User>, ApiError> {
    let session = state.session()?;
    session
        .accounts
        .current()
        .cloned()
        .map(Json)
        .ok_or((StatusCode::UNAUTHORIZED, "Sign in required"))
}
