use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::document::{IndexParams, UpdateStatusParams};
use crate::response::review::ReviewResponse;
use crate::{AppState, Error};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::upload::UploadFile;
use domain::{document as DocumentApi, documents, review as ReviewApi, upload as UploadApi, Id};

use serde_json::json;
use service::config::ApiVersion;

use log::*;

fn multipart_error(err: axum::extract::multipart::MultipartError) -> Error {
    Error::from(domain::error::Error {
        source: Some(Box::new(err)),
        error_kind: domain::error::DomainErrorKind::Internal(
            domain::error::InternalErrorKind::Entity(domain::error::EntityErrorKind::Invalid),
        ),
    })
}

/// POST one or more files into a document type, creating one document per
/// stored file. Returns a per-file report rather than failing the whole batch
/// when a single file cannot be stored.
#[utoipa::path(
    post,
    path = "/document_types/{id}/documents",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "DocumentType id to upload documents into")
    ),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Upload processed, returns a per-file report", body = domain::upload::UploadReport),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document Type not found"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn upload(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(document_type_id): Path<Id>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Upload documents into DocumentType: {document_type_id}");

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        // Only fields carrying an actual file are part of the upload batch.
        let file_name = match field.file_name() {
            Some(file_name) => file_name.to_string(),
            None => continue,
        };
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();

        files.push(UploadFile {
            file_name,
            mime_type,
            bytes,
        });
    }

    let report = UploadApi::upload_documents(
        app_state.db_conn_ref(),
        app_state.object_store.as_ref(),
        user.id,
        document_type_id,
        files,
    )
    .await?;

    debug!(
        "Upload report: {} succeeded, {} failed",
        report.succeeded, report.failed
    );

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), report)))
}

/// GET all of the authenticated user's documents, newest first, optionally
/// filtered by document type.
#[utoipa::path(
    get,
    path = "/documents",
    params(
        ApiVersion,
        ("document_type_id" = Option<Uuid>, Query, description = "Filter by document_type_id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Documents", body = [documents::Model]),
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
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Documents");
    debug!("Filter Params: {params:?}");

    let documents = DocumentApi::find_by_user(app_state.db_conn_ref(), user.id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), documents)))
}

/// GET a particular Document specified by its id.
#[utoipa::path(
    get,
    path = "/documents/{id}",
    params(
        ApiVersion,
        ("id" = String, Path, description = "Document id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Document by its id", body = [documents::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found"),
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
    debug!("GET Document by id: {id}");

    let document = DocumentApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), document)))
}

/// GET the full review workspace for one document: the document, its fields
/// grouped into sections, its line items and the derived totals.
#[utoipa::path(
    get,
    path = "/documents/{id}/review",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Document id to review")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the review workspace", body = ReviewResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn review(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Review workspace for Document: {id}");

    let workspace = ReviewApi::load(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        ReviewResponse::from(workspace),
    )))
}

/// PUT transition a Document's review status (pending, approved or rejected).
#[utoipa::path(
    put,
    path = "/documents/{id}/status",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of document to update"),
    ),
    request_body = UpdateStatusParams,
    responses(
        (status = 200, description = "Successfully Updated Document status", body = [documents::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_status(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateStatusParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Document {id} status to {:?}", params.status);

    let document =
        DocumentApi::update_status(app_state.db_conn_ref(), id, params.status).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), document)))
}

/// DELETE a Document specified by its primary key.
///
/// Removes the document row (cascading to its extracted fields and line
/// items) and then its stored file.
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Document id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted a certain Document by its id", body = [Uuid]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found"),
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
    debug!("DELETE Document by id: {id}");

    DocumentApi::delete_by_id(
        app_state.db_conn_ref(),
        app_state.object_store.as_ref(),
        id,
    )
    .await?;
    Ok(Json(json!({"id": id})))
}
