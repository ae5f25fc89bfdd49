//! Mapping of domain errors onto HTTP status codes.

use api_shared::AccessDenied;
use axum::http::StatusCode;
use herbal_core::HerbalError;

pub type ApiError = (StatusCode, &'static str);

pub fn internal() -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

pub fn not_found(what: &'static str) -> ApiError {
    (StatusCode::NOT_FOUND, what)
}

/// Convert a core error into a status and a short message, logging it.
///
/// Client mistakes are logged at `warn`, storage and catalog failures at `error`.
pub fn map_error(err: HerbalError) -> ApiError {
    let mapped = match &err {
        HerbalError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
        HerbalError::MissingFields(_) => (StatusCode::BAD_REQUEST, "Required fields missing"),
        HerbalError::OutOfStock(_) => (StatusCode::BAD_REQUEST, "Product is out of stock"),
        HerbalError::EmptyCart => (StatusCode::BAD_REQUEST, "Cart is empty"),
        HerbalError::UnknownRegion(_) => (StatusCode::BAD_REQUEST, "Unknown region"),
        HerbalError::NoRecipients => (StatusCode::BAD_REQUEST, "No recipients selected"),
        HerbalError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
        HerbalError::UnknownProduct(_) => (StatusCode::NOT_FOUND, "Product not found"),
        HerbalError::UnknownDistribution(_) => {
            (StatusCode::NOT_FOUND, "Distribution record not found")
        }
        HerbalError::EmailTaken => (StatusCode::CONFLICT, "Email is already registered"),
        HerbalError::AlreadySubscribed => (StatusCode::CONFLICT, "Email is already subscribed"),
        HerbalError::DuplicateLocation(_) => (StatusCode::CONFLICT, "Location already recorded"),
        HerbalError::CatalogParse { .. }
        | HerbalError::CatalogRead(_)
        | HerbalError::CatalogIntegrity(_)
        | HerbalError::StoreRead(_)
        | HerbalError::StoreWrite(_)
        | HerbalError::StoreSerialization(_) => internal(),
    };

    if mapped.0.is_server_error() {
        tracing::error!("Request failed: {:?}", err);
    } else {
        tracing::warn!("Request rejected: {}", err);
    }
    mapped
}

pub fn map_access(denied: AccessDenied) -> ApiError {
    tracing::warn!("Access denied: {}", denied);
    match denied {
        AccessDenied::NotSignedIn => (StatusCode::UNAUTHORIZED, "Sign in required"),
        AccessDenied::NotAdmin => (StatusCode::FORBIDDEN, "Admin role required"),
    }
}
