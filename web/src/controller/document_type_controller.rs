use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::document_type::UpdateParams;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{document_type as DocumentTypeApi, document_types, document_types::Model, Id};

use serde_json::json;
use service::config::ApiVersion;

use log::*;

/// POST create a new DocumentType
#[utoipa::path(
    post,
    path = "/document_types",
    params(ApiVersion),
    request_body = document_types::Model,
    responses(
        (status = 201, description = "Successfully Created a New Document Type", body = [document_types::Model]),
        (status = 422, description = "Unprocessable Entity"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(document_type_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New DocumentType from: {document_type_model:?}");

    let document_type =
        DocumentTypeApi::create(app_state.db_conn_ref(), document_type_model, user.id).await?;

    debug!("New DocumentType: {document_type:?}");

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        document_type,
    )))
}

/// GET all of the authenticated user's DocumentTypes, each with its per-status
/// document counts.
#[utoipa::path(
    get,
    path = "/document_types",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Document Types with document counts", body = [domain::document_type::DocumentTypeWithStats]),
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
    debug!("GET all DocumentTypes for user: {}", user.id);

    let document_types =
        DocumentTypeApi::find_by_user_with_stats(app_state.db_conn_ref(), user.id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        document_types,
    )))
}

/// GET a particular DocumentType specified by its id.
#[utoipa::path(
    get,
    path = "/document_types/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "DocumentType id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Document Type by its id", body = [document_types::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document Type not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET DocumentType by id: {id}");

    let document_type = DocumentTypeApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), document_type)))
}

#[utoipa::path(
    put,
    path = "/document_types/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of document type to update"),
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Document Type", body = [document_types::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update DocumentType with id: {id}");

    let document_type = DocumentTypeApi::update(app_state.db_conn_ref(), id, params).await?;

    debug!("Updated DocumentType: {document_type:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), document_type)))
}

/// DELETE a DocumentType specified by its primary key.
///
/// Deleting a document type cascades to its documents, their extracted fields
/// and line items.
#[utoipa::path(
    delete,
    path = "/document_types/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "DocumentType id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted a certain Document Type by its id", body = [Uuid]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document Type not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE DocumentType by id: {id}");

    DocumentTypeApi::delete_by_id(app_state.db_conn_ref(), id).await?;
    Ok(Json(json!({"id": id})))
}
