use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::line_item::DeleteAllParams;
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::review::{self as ReviewApi, LineItemEdits};
use domain::{line_items, Id};

use serde_json::json;
use service::config::ApiVersion;

use log::*;

/// GET all of a document's line items in insertion order.
#[utoipa::path(
    get,
    path = "/documents/{id}/line_items",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Document id whose line items to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Line Items", body = [line_items::Model]),
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
    debug!("GET all LineItems for Document: {document_id}");

    let line_items =
        ReviewApi::find_line_items_by_document(app_state.db_conn_ref(), document_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), line_items)))
}

/// POST a new empty line item onto a document for the reviewer to fill in.
#[utoipa::path(
    post,
    path = "/documents/{id}/line_items",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Document id to add a line item to")
    ),
    responses(
        (status = 201, description = "Successfully Created a New Line Item", body = [line_items::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(document_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New LineItem for Document: {document_id}");

    let line_item = ReviewApi::add_line_item(app_state.db_conn_ref(), document_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        line_item,
    )))
}

/// PUT reviewer edits to one line item.
///
/// The stored amount is recomputed from the effective quantity and unit
/// price; unparseable numeric input falls back to zero.
#[utoipa::path(
    put,
    path = "/line_items/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of line item to update"),
    ),
    request_body = domain::review::LineItemEdits,
    responses(
        (status = 200, description = "Successfully Updated Line Item", body = [line_items::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Line Item not found"),
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
    Json(edits): Json<LineItemEdits>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update LineItem with id: {id}");

    let line_item = ReviewApi::update_line_item(app_state.db_conn_ref(), id, edits).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), line_item)))
}

/// DELETE a Line Item specified by its primary key.
#[utoipa::path(
    delete,
    path = "/line_items/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Line Item id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted a certain Line Item by its id", body = [Uuid]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Line Item not found"),
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
    debug!("DELETE LineItem by id: {id}");

    ReviewApi::delete_line_item(app_state.db_conn_ref(), id).await?;
    Ok(Json(json!({"id": id})))
}

/// DELETE every line item belonging to one document.
///
/// Requires `confirm=true` as a query parameter; without it the request is
/// rejected and nothing is deleted.
#[utoipa::path(
    delete,
    path = "/documents/{id}/line_items",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Document id whose line items to delete"),
        ("confirm" = Option<bool>, Query, description = "Must be true to actually delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted all of a Document's line items", body = [u64]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found"),
        (status = 422, description = "Missing confirm=true"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete_all(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(document_id): Path<Id>,
    Query(params): Query<DeleteAllParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE all LineItems for Document: {document_id}");

    if !params.confirmed() {
        warn!("Bulk line item deletion attempted without confirm=true");
        return Err(Error::from(domain::error::Error {
            source: None,
            error_kind: domain::error::DomainErrorKind::Internal(
                domain::error::InternalErrorKind::Entity(
                    domain::error::EntityErrorKind::Invalid,
                ),
            ),
        }));
    }

    let deleted = ReviewApi::delete_all_line_items(app_state.db_conn_ref(), document_id).await?;

    Ok(Json(json!({"deleted": deleted})))
}
