use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use log::error;

use domain::{document, review, Id};

/// Checks that the line item referenced by the path id exists and belongs to
/// a document uploaded by the authenticated user.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn modify(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(line_item_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let line_item = match review::find_line_item(app_state.db_conn_ref(), line_item_id).await {
        Ok(line_item) => line_item,
        Err(_) => return (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
    };

    match document::find_by_id(app_state.db_conn_ref(), line_item.document_id).await {
        Ok(document) => {
            if document.uploaded_by == user.id {
                next.run(request).await
            } else {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED").into_response()
            }
        }
        Err(e) => {
            error!("Authorization error finding line item's document: {e:?}");
            (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
        }
    }
}
