//! Newsletter subscription and the admin mailing tools.

use crate::error::{map_error, not_found, ApiError};
use crate::state::AppState;
use api_shared::{SendNewsletterReq, SetSubscribedReq, SubscribeReq, SubscribersQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use herbal_core::newsletter::{SentNewsletter, Subscriber};
use herbal_core::search::SortDirection;

#[utoipa::path(
    post,
    path = "/newsletter/subscribe",
    request_body = SubscribeReq,
    responses(
        (status = 201, description = "Subscribed", body = Subscriber),
        (status = 400, description = "Malformed email"),
        (status = 409, description = "Email is already subscribed"),
        (status = 500, description = "Internal server error")
    )
)]
/// Subscribe to the newsletter
///
/// An address that unsubscribed earlier is re-activated.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeReq>,
) -> Result<(StatusCode, Json<Subscriber>), ApiError> {
    let mut session = state.session()?;
    let subscriber = session
        .newsletter
        .subscribe(&req.email, req.name.as_deref(), Utc::now().date_naive())
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(subscriber)))
}

#[utoipa::path(
    get,
    path = "/newsletter/subscribers",
    params(SubscribersQuery),
    responses(
        (status = 200, description = "Subscribers in the requested order", body = [Subscriber]),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    )
)]
/// List subscribers (admin)
///
/// Defaults to newest first. Subscribers without a name sort last.
pub async fn list_subscribers(
    State(state): State<AppState>,
    Query(query): Query<SubscribersQuery>,
) -> Result<Json<Vec<Subscriber>>, ApiError> {
    let session = state.session()?;
    session.require_admin()?;
    let sorted = session.newsletter.subscribers_sorted(
        query.sort.unwrap_or_default(),
        query.dir.unwrap_or(SortDirection::Desc),
    );
    Ok(Json(sorted.into_iter().cloned().collect()))
}

#[utoipa::path(
    put,
    path = "/newsletter/subscribers/{id}",
    params(("id" = String, Path, description = "Subscriber id")),
    request_body = SetSubscribedReq,
    responses(
        (status = 200, description = "Subscription flag updated", body = Subscriber),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Subscriber not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn set_subscribed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetSubscribedReq>,
) -> Result<Json<Subscriber>, ApiError> {
    let mut session = state.session()?;
    session.require_admin()?;
    session
        .newsletter
        .set_subscribed(&id, req.subscribed)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Subscriber not found"))
}

#[utoipa::path(
    get,
    path = "/newsletter/sent",
    responses(
        (status = 200, description = "Newsletters sent so far", body = [SentNewsletter]),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_sent(
    State(state): State<AppState>,
) -> Result<Json<Vec<SentNewsletter>>, ApiError> {
    let session = state.session()?;
    session.require_admin()?;
    Ok(Json(session.newsletter.newsletters().to_vec()))
}

#[utoipa::path(
    post,
    path = "/newsletter/send",
    request_body = SendNewsletterReq,
    responses(
        (status = 201, description = "Newsletter recorded as sent", body = SentNewsletter),
        (status = 400, description = "Missing subject or content, or no active recipients"),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    )
)]
/// Send a newsletter (admin)
///
/// Nothing is delivered; the newsletter is recorded with its recipient count.
///
/// # Errors
/// Returns `400 Bad Request` when the subject or content is blank or no active subscriber is
/// selected.
pub async fn send_newsletter(
    State(state): State<AppState>,
    Json(req): Json<SendNewsletterReq>,
) -> Result<(StatusCode, Json<SentNewsletter>), ApiError> {
    let mut session = state.session()?;
    session.require_admin()?;
    let sent = session
        .newsletter
        .send(
            &req.subject,
            &req.content,
            req.recipients.as_deref(),
            Utc::now().date_naive(),
        )
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(sent)))
}
