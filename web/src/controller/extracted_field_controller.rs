use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{extracted_fields, review as ReviewApi, Id};
use serde::Deserialize;
use utoipa::ToSchema;

use service::config::ApiVersion;

use log::*;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateValueParams {
    pub(crate) field_value: Option<String>,
}

/// GET all of a document's extracted fields in extraction order.
#[utoipa::path(
    get,
    path = "/documents/{id}/fields",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Document id whose fields to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Extracted Fields", body = [extracted_fields::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(document_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all ExtractedFields for Document: {document_id}");

    let fields = ReviewApi::find_fields_by_document(app_state.db_conn_ref(), document_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), fields)))
}

/// PUT a reviewer's correction to one extracted field's value.
///
/// The extraction confidence is left untouched; the correcting user is
/// recorded on the field instead.
#[utoipa::path(
    put,
    path = "/extracted_fields/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of extracted field to update"),
    ),
    request_body = UpdateValueParams,
    responses(
        (status = 200, description = "Successfully Updated Extracted Field", body = [extracted_fields::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Extracted Field not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateValueParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update ExtractedField with id: {id}");

    let field = ReviewApi::update_field_value(
        app_state.db_conn_ref(),
        id,
        params.field_value,
        user.id,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), field)))
}
