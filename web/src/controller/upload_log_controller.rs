use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{upload_log as UploadLogApi, upload_logs};

use service::config::ApiVersion;

use log::*;

/// GET the authenticated user's upload audit trail, newest first.
#[utoipa::path(
    get,
    path = "/upload_logs",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Upload Logs", body = [upload_logs::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all UploadLogs for user: {}", user.id);

    let upload_logs = UploadLogApi::find_by_user(app_state.db_conn_ref(), user.id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), upload_logs)))
}
