use domain::gateway::object_store::{FsObjectStore, ObjectStore};
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!("Starting Docuflow API [{}]", config.api_version());

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(db.as_ref(), None).await {
        error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let object_store: Arc<dyn ObjectStore> = match FsObjectStore::new(&config.storage_root) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(
                "Failed to initialize file storage at {}: {e:?}",
                config.storage_root
            );
            std::process::exit(1);
        }
    };

    let app_state = web::AppState::new(config, &db, object_store);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
