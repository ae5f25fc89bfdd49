use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use herbal_core::constants::CSV_TEMPLATE_FILENAME;
use herbal_core::export::{csv_template, CSV_CONTENT_TYPE};

#[utoipa::path(
    get,
    path = "/export/template.csv",
    responses(
        (status = 200, description = "CSV template for bulk herb data", body = String, content_type = "text/csv"),
        (status = 401, description = "Sign in required"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    )
)]
/// Download the herb data CSV template (admin)
pub async fn csv_template_download(State(state): State<AppState>) -> Result<Response, ApiError> {
    state.session()?.require_admin()?;
    let disposition = format!("attachment; filename=\"{CSV_TEMPLATE_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv_template(),
    )
        .into_response())
}
