use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};

use domain::{document_type, Id};

/// Checks that the document type referenced by the path id exists and is
/// owned by the authenticated user.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn modify(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(document_type_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    match document_type::find_by_id(app_state.db_conn_ref(), document_type_id).await {
        Ok(document_type) => {
            if document_type.user_id == user.id {
                next.run(request).await
            } else {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED").into_response()
            }
        }
        // document type with given ID not found
        Err(_) => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
    }
}
