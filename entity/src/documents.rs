//! SeaORM Entity for the documents table.
//! One row per successfully uploaded file.

use crate::document_status::DocumentStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::documents::Model)]
#[sea_orm(schema_name = "docuflow", table_name = "documents")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = Uuid)]
    pub document_type_id: Id,

    /// User who uploaded the file
    #[serde(skip_deserializing)]
    pub uploaded_by: Id,

    /// Object-store path the file bytes were written to
    pub file_path: String,

    pub original_filename: String,

    pub file_size: i64,

    pub mime_type: String,

    pub status: DocumentStatus,

    /// Aggregate extraction confidence (0.0 - 1.0), absent until extraction ran
    pub confidence_score: Option<f64>,

    /// Whether the document was flagged for human-in-the-loop review
    pub requires_hitl: bool,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_types::Entity",
        from = "Column::DocumentTypeId",
        to = "super::document_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DocumentTypes,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedBy",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,

    #[sea_orm(has_many = "super::extracted_fields::Entity")]
    ExtractedFields,

    #[sea_orm(has_many = "super::line_items::Entity")]
    LineItems,
}

impl Related<super::document_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentTypes.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::extracted_fields::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtractedFields.def()
    }
}

impl Related<super::line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
