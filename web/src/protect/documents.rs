use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};

use domain::{document, Id};

/// Checks that the document referenced by the path id exists and was uploaded
/// by the authenticated user.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn modify(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(document_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    match document::find_by_id(app_state.db_conn_ref(), document_id).await {
        Ok(document) => {
            if document.uploaded_by == user.id {
                next.run(request).await
            } else {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED").into_response()
            }
        }
        // document with given ID not found
        Err(_) => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
    }
}
