use super::error::{EntityApiErrorKind, Error};
use entity::document_types::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel,
};

use log::*;

/// Creates a new document type owned by `user_id`. A name that is empty or
/// whitespace-only is rejected before any database call.
pub async fn create(
    db: &DatabaseConnection,
    document_type_model: Model,
    user_id: Id,
) -> Result<Model, Error> {
    if document_type_model.name.trim().is_empty() {
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::ValidationError,
        });
    }

    debug!("New DocumentType Model to be inserted: {document_type_model:?}");

    let now = chrono::Utc::now();

    let document_type_active_model: ActiveModel = ActiveModel {
        user_id: Set(user_id),
        name: Set(document_type_model.name),
        description: Set(document_type_model.description),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(document_type_active_model.save(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let result = find_by_id(db, id).await?;

    result.delete(db).await?;
    Ok(())
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// All document types owned by `user_id`, newest first.
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
    use entity::{document_types::Model, Id};
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    fn document_type_model(name: &str) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            user_id: Id::new_v4(),
            name: name.to_owned(),
            description: Some("test".to_owned()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_document_type_model() -> Result<(), Error> {
        let model = document_type_model("Invoices");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let document_type = create(&db, model.clone(), Id::new_v4()).await?;

        assert_eq!(document_type.id, model.id);
        assert_eq!(document_type.name, model.name);

        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_a_blank_name_without_touching_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = create(&db, document_type_model("   "), Id::new_v4()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::ValidationError
        );
        // No statements were issued before the rejection
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_an_empty_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = create(&db, document_type_model(""), Id::new_v4()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::ValidationError
        );
    }

    #[tokio::test]
    async fn find_by_user_lists_a_users_document_types_newest_first() -> Result<(), Error> {
        let user_id = Id::new_v4();
        let newest = document_type_model("Invoices");
        let oldest = document_type_model("Receipts");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![newest.clone(), oldest.clone()]])
            .into_connection();

        let document_types = find_by_user(&db, user_id).await?;

        assert_eq!(document_types.len(), 2);
        assert_eq!(document_types[0].id, newest.id);
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "document_types"."id", "document_types"."user_id", "document_types"."name", "document_types"."description", "document_types"."created_at", "document_types"."updated_at" FROM "docuflow"."document_types" WHERE "document_types"."user_id" = $1 ORDER BY "document_types"."created_at" DESC"#,
                [user_id.into()]
            )]
        );

        Ok(())
    }
}
