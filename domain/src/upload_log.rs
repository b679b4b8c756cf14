use crate::{error::Error, upload_logs::Model, Id};
use sea_orm::DatabaseConnection;

/// A user's upload audit trail, newest first.
pub async fn find_by_user(db: &DatabaseConnection, user_id: Id) -> Result<Vec<Model>, Error> {
    Ok(entity_api::upload_log::find_by_user(db, user_id).await?)
}
