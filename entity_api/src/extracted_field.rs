use super::error::{EntityApiErrorKind, Error};
use entity::extracted_fields::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, TryIntoModel,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, field_model: Model) -> Result<Model, Error> {
    debug!("New ExtractedField Model to be inserted: {field_model:?}");

    let now = chrono::Utc::now();

    let field_active_model: ActiveModel = ActiveModel {
        document_id: Set(field_model.document_id),
        field_name: Set(field_model.field_name),
        field_value: Set(field_model.field_value),
        confidence_score: Set(field_model.confidence_score),
        section: Set(field_model.section),
        corrected_by_user_id: Set(field_model.corrected_by_user_id),
        bbox_x: Set(field_model.bbox_x),
        bbox_y: Set(field_model.bbox_y),
        bbox_width: Set(field_model.bbox_width),
        bbox_height: Set(field_model.bbox_height),
        page: Set(field_model.page),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(field_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// A document's extracted fields in insertion order, so the summary panel and
/// the viewer overlay render the same sequence.
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

/// Replaces a field's value in place. Confidence is deliberately left at the
/// original extraction value; the correcting user is recorded instead.
pub async fn update_value(
    db: &DatabaseConnection,
    id: Id,
    field_value: Option<String>,
    corrected_by: Id,
) -> Result<Model, Error> {
    let field = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(field.id),
        document_id: Unchanged(field.document_id),
        field_name: Unchanged(field.field_name),
        field_value: Set(field_value),
        confidence_score: Unchanged(field.confidence_score),
        section: Unchanged(field.section),
        corrected_by_user_id: Set(Some(corrected_by)),
        bbox_x: Unchanged(field.bbox_x),
        bbox_y: Unchanged(field.bbox_y),
        bbox_width: Unchanged(field.bbox_width),
        bbox_height: Unchanged(field.bbox_height),
        page: Unchanged(field.page),
        created_at: Unchanged(field.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn field_model(confidence: f64) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            document_id: Id::new_v4(),
            field_name: "Invoice Number".to_owned(),
            field_value: Some("INV-2025-0042".to_owned()),
            confidence_score: confidence,
            section: Some("Header".to_owned()),
            corrected_by_user_id: None,
            bbox_x: None,
            bbox_y: None,
            bbox_width: None,
            bbox_height: None,
            page: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn update_value_keeps_the_original_confidence() -> Result<(), Error> {
        let model = field_model(0.65);
        let corrected_by = Id::new_v4();

        let mut updated = model.clone();
        updated.field_value = Some("INV-2025-0043".to_owned());
        updated.corrected_by_user_id = Some(corrected_by);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()], vec![updated.clone()]])
            .into_connection();

        let field = update_value(
            &db,
            model.id,
            Some("INV-2025-0043".to_owned()),
            corrected_by,
        )
        .await?;

        assert_eq!(field.field_value, Some("INV-2025-0043".to_owned()));
        assert_eq!(field.confidence_score, 0.65);
        assert_eq!(field.corrected_by_user_id, Some(corrected_by));

        Ok(())
    }
}
