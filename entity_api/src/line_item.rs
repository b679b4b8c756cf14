use super::error::{EntityApiErrorKind, Error};
use entity::line_items::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, TryIntoModel,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, line_item_model: Model) -> Result<Model, Error> {
    debug!("New LineItem Model to be inserted: {line_item_model:?}");

    let now = chrono::Utc::now();

    let line_item_active_model: ActiveModel = ActiveModel {
        document_id: Set(line_item_model.document_id),
        date: Set(line_item_model.date),
        description: Set(line_item_model.description),
        quantity: Set(line_item_model.quantity),
        unit_price: Set(line_item_model.unit_price),
        amount: Set(line_item_model.amount),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(line_item_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// A document's line items in insertion order, matching the table's stable
/// row ordering in the review workspace.
pub async fn find_by_document(
    db: &DatabaseConnection,
    document_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::DocumentId.eq(document_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Persists new attribute values for one line item. Callers are responsible
/// for having recomputed `amount` from quantity and unit price; this layer
/// stores what it is given.
pub async fn update(db: &DatabaseConnection, id: Id, model: Model) -> Result<Model, Error> {
    let line_item = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(line_item.id),
        document_id: Unchanged(line_item.document_id),
        date: Set(model.date),
        description: Set(model.description),
        quantity: Set(model.quantity),
        unit_price: Set(model.unit_price),
        amount: Set(model.amount),
        created_at: Unchanged(line_item.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let result = find_by_id(db, id).await?;

    result.delete(db).await?;
    Ok(())
}

/// Bulk delete of every line item belonging to one document.
pub async fn delete_by_document(db: &DatabaseConnection, document_id: Id) -> Result<u64, Error> {
    let result = Entity::delete_many()
        .filter(Column::DocumentId.eq(document_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    #[tokio::test]
    async fn create_returns_a_new_line_item_model() -> Result<(), Error> {
        let now = chrono::Utc::now();
        let model = Model {
            id: Id::new_v4(),
            document_id: Id::new_v4(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 4, 15),
            description: "Consulting services".to_owned(),
            quantity: 80.0,
            unit_price: 23.0,
            amount: 1840.0,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let line_item = create(&db, model.clone()).await?;

        assert_eq!(line_item.id, model.id);
        assert_eq!(line_item.amount, 1840.0);

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_id_deletes_only_the_addressed_row() -> Result<(), Error> {
        let now = chrono::Utc::now();
        let model = Model {
            id: Id::new_v4(),
            document_id: Id::new_v4(),
            date: None,
            description: "Consulting services".to_owned(),
            quantity: 1.0,
            unit_price: 2.0,
            amount: 2.0,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        delete_by_id(&db, model.id).await?;

        // The delete is keyed by primary key, so sibling rows are untouched
        assert_eq!(
            db.into_transaction_log(),
            [
                Transaction::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    r#"SELECT "line_items"."id", "line_items"."document_id", "line_items"."date", "line_items"."description", "line_items"."quantity", "line_items"."unit_price", "line_items"."amount", "line_items"."created_at", "line_items"."updated_at" FROM "docuflow"."line_items" WHERE "line_items"."id" = $1 LIMIT $2"#,
                    [model.id.into(), sea_orm::Value::BigUnsigned(Some(1))]
                ),
                Transaction::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    r#"DELETE FROM "docuflow"."line_items" WHERE "line_items"."id" = $1"#,
                    [model.id.into()]
                )
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_document_issues_a_single_bulk_delete() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();

        let document_id = Id::new_v4();
        let deleted = delete_by_document(&db, document_id).await?;

        assert_eq!(deleted, 3);
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"DELETE FROM "docuflow"."line_items" WHERE "line_items"."document_id" = $1"#,
                [document_id.into()]
            )]
        );

        Ok(())
    }
}
