use super::error::Error;
use entity::upload_logs::{ActiveModel, Column, Entity, Model};
use entity::upload_status::UploadStatus;
use entity::Id;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder};

use log::*;

/// Appends one audit row for a single upload attempt. Rows are never updated
/// or deleted by the application.
pub async fn create(
    db: &impl ConnectionTrait,
    user_id: Id,
    document_id: Option<Id>,
    file_name: String,
    status: UploadStatus,
    error_message: Option<String>,
) -> Result<Model, Error> {
    debug!("New UploadLog row for file {file_name:?} with status {status}");

    let upload_log_active_model: ActiveModel = ActiveModel {
        user_id: Set(user_id),
        document_id: Set(document_id),
        file_name: Set(file_name),
        status: Set(status),
        error_message: Set(error_message),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    Ok(upload_log_active_model.insert(db).await?)
}

/// A user's upload audit trail, newest first.
pub async fn find_by_user(db: &DatabaseConnection, user_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn create_returns_a_failed_audit_row_without_a_document_id() -> Result<(), Error> {
        let now = chrono::Utc::now();
        let model = Model {
            id: Id::new_v4(),
            user_id: Id::new_v4(),
            document_id: None,
            file_name: "broken.pdf".to_owned(),
            status: UploadStatus::Failed,
            error_message: Some("storage write failed".to_owned()),
            created_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let log = create(
            &db,
            model.user_id,
            None,
            "broken.pdf".to_owned(),
            UploadStatus::Failed,
            Some("storage write failed".to_owned()),
        )
        .await?;

        assert_eq!(log.document_id, None);
        assert_eq!(log.status, UploadStatus::Failed);

        Ok(())
    }
}
