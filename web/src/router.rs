use crate::{
    controller::health_check_controller, middleware::auth::require_auth, params, protect, AppState,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::controller::{
    document_controller, document_type_controller, extracted_field_controller,
    line_item_controller, upload_log_controller, user_session_controller,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Docuflow API"
        ),
        paths(
            document_type_controller::create,
            document_type_controller::update,
            document_type_controller::index,
            document_type_controller::read,
            document_type_controller::delete,
            document_controller::upload,
            document_controller::index,
            document_controller::read,
            document_controller::review,
            document_controller::update_status,
            document_controller::delete,
            extracted_field_controller::index,
            extracted_field_controller::update,
            line_item_controller::index,
            line_item_controller::create,
            line_item_controller::update,
            line_item_controller::delete,
            line_item_controller::delete_all,
            upload_log_controller::index,
            user_session_controller::login,
            user_session_controller::me,
            user_session_controller::delete,
        ),
        components(
            schemas(
                domain::document_types::Model,
                domain::documents::Model,
                domain::extracted_fields::Model,
                domain::line_items::Model,
                domain::upload_logs::Model,
                domain::users::Model,
                domain::user::Credentials,
                domain::document_status::DocumentStatus,
                domain::upload_status::UploadStatus,
                domain::document_type::DocumentTypeWithStats,
                domain::document_type::DocumentStats,
                domain::review::LineItemEdits,
                domain::upload::UploadReport,
                params::document_type::UpdateParams,
                params::document::UpdateStatusParams,
                extracted_field_controller::UpdateValueParams,
                crate::response::review::ReviewResponse,
                domain::review::FieldSection,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "docuflow", description = "Docuflow document management API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session based authentication requirement for gaining access to our
// API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id value returned from successful login via Set-Cookie header",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(document_type_routes(app_state.clone()))
        .merge(document_routes(app_state.clone()))
        .merge(extracted_field_routes(app_state.clone()))
        .merge(line_item_routes(app_state.clone()))
        .merge(upload_log_routes(app_state.clone()))
        .merge(health_routes())
        .merge(user_session_routes())
        .merge(user_session_protected_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes())
}

fn document_type_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/document_types", post(document_type_controller::create))
        .route("/document_types", get(document_type_controller::index))
        .merge(
            // Routes addressing one document type by id require ownership
            Router::new()
                .route("/document_types/:id", get(document_type_controller::read))
                .route("/document_types/:id", put(document_type_controller::update))
                .route(
                    "/document_types/:id",
                    delete(document_type_controller::delete),
                )
                .route(
                    "/document_types/:id/documents",
                    post(document_controller::upload),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::document_types::modify,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn document_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/documents", get(document_controller::index))
        .merge(
            // Routes addressing one document by id require ownership
            Router::new()
                .route("/documents/:id", get(document_controller::read))
                .route("/documents/:id/review", get(document_controller::review))
                .route(
                    "/documents/:id/status",
                    put(document_controller::update_status),
                )
                .route("/documents/:id", delete(document_controller::delete))
                .route(
                    "/documents/:id/fields",
                    get(extracted_field_controller::index),
                )
                .route(
                    "/documents/:id/line_items",
                    get(line_item_controller::index),
                )
                .route(
                    "/documents/:id/line_items",
                    post(line_item_controller::create),
                )
                .route(
                    "/documents/:id/line_items",
                    delete(line_item_controller::delete_all),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::documents::modify,
                )),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn extracted_field_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/extracted_fields/:id",
            put(extracted_field_controller::update),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            protect::extracted_fields::update,
        ))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn line_item_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/line_items/:id", put(line_item_controller::update))
        .route("/line_items/:id", delete(line_item_controller::delete))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            protect::line_items::modify,
        ))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn upload_log_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/upload_logs", get(upload_log_controller::index))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

pub fn user_session_routes() -> Router {
    Router::new().route("/login", post(user_session_controller::login))
}

fn user_session_protected_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/logout", delete(user_session_controller::delete))
        .route("/me", get(user_session_controller::me))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

pub fn static_routes() -> Router {
    Router::new().nest_service("/", ServeDir::new("./"))
}
