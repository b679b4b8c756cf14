use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use axum_login::AuthManagerLayerBuilder;
use domain::gateway::object_store::ObjectStore;
use domain::user::Backend;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;
use time::Duration;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

pub use self::error::{Error, Result};

mod error;

pub(crate) mod controller;
pub(crate) mod extractors;
pub(crate) mod middleware;
pub(crate) mod params;
pub(crate) mod protect;
pub(crate) mod response;
pub(crate) mod router;

// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub database_connection: Arc<DatabaseConnection>,
    pub object_store: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: &Arc<DatabaseConnection>,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            config,
            database_connection: Arc::clone(db),
            object_store,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}

pub async fn init_server(app_state: AppState) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&server_url).await?;

    let allowed_origins = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    debug!("allowed_origins: {allowed_origins:?}");

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_credentials(true)
        .allow_origin(allowed_origins)
        .allow_headers([
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-version"),
        ]);

    // Sessions are stored in Postgres alongside the application data so that a
    // server restart does not log everyone out.
    let session_store = PostgresStore::new(
        app_state
            .database_connection
            .get_postgres_connection_pool()
            .clone(),
    );
    session_store.migrate().await?;

    let deletion_task = tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(tokio::time::Duration::from_secs(60)),
    );

    let session_expiry_seconds = app_state.config.backend_session_expiry_seconds;
    info!("Session expiry configured: {session_expiry_seconds} seconds");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(app_state.config.is_production())
        .with_same_site(SameSite::Strict)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            session_expiry_seconds as i64,
        )));

    let backend = Backend::new(&app_state.database_connection);
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    let router = router::define_routes(app_state)
        .layer(auth_layer)
        .layer(cors_layer);

    info!("Server starting... listening on {server_url}");
    axum::serve(listener, router).await?;

    deletion_task.await??;

    Ok(())
}
