use super::error::{EntityApiErrorKind, Error};
use entity::document_status::DocumentStatus;
use entity::documents::{ActiveModel, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, TryIntoModel,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, document_model: Model) -> Result<Model, Error> {
    debug!("New Document Model to be inserted: {document_model:?}");

    let now = chrono::Utc::now();

    let document_active_model: ActiveModel = ActiveModel {
        document_type_id: Set(document_model.document_type_id),
        uploaded_by: Set(document_model.uploaded_by),
        file_path: Set(document_model.file_path),
        original_filename: Set(document_model.original_filename),
        file_size: Set(document_model.file_size),
        mime_type: Set(document_model.mime_type),
        status: Set(document_model.status),
        confidence_score: Set(document_model.confidence_score),
        requires_hitl: Set(document_model.requires_hitl),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(document_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Transitions a document's review status (e.g. pending -> approved on the
/// review screen's confirm action).
pub async fn update_status(
    db: &DatabaseConnection,
    id: Id,
    status: DocumentStatus,
) -> Result<Model, Error> {
    let document = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(document.id),
        document_type_id: Unchanged(document.document_type_id),
        uploaded_by: Unchanged(document.uploaded_by),
        file_path: Unchanged(document.file_path),
        original_filename: Unchanged(document.original_filename),
        file_size: Unchanged(document.file_size),
        mime_type: Unchanged(document.mime_type),
        status: Set(status),
        confidence_score: Unchanged(document.confidence_score),
        requires_hitl: Unchanged(document.requires_hitl),
        created_at: Unchanged(document.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let result = find_by_id(db, id).await?;

    result.delete(db).await?;
    Ok(())
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn document_model() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            document_type_id: Id::new_v4(),
            uploaded_by: Id::new_v4(),
            file_path: "user/type/invoice.pdf".to_owned(),
            original_filename: "invoice.pdf".to_owned(),
            file_size: 1024,
            mime_type: "application/pdf".to_owned(),
            status: DocumentStatus::Pending,
            confidence_score: None,
            requires_hitl: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_document_model() -> Result<(), Error> {
        let model = document_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let document = create(&db, model.clone()).await?;

        assert_eq!(document.id, model.id);
        assert_eq!(document.file_path, model.file_path);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_transitions_to_approved() -> Result<(), Error> {
        let model = document_model();
        let mut approved = model.clone();
        approved.status = DocumentStatus::Approved;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()], vec![approved.clone()]])
            .into_connection();

        let document = update_status(&db, model.id, DocumentStatus::Approved).await?;

        assert_eq!(document.status, DocumentStatus::Approved);

        Ok(())
    }
}
