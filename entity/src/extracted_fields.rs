//! SeaORM Entity for the extracted_fields table.
//! Stores named values pulled from a document by the extraction pipeline.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::extracted_fields::Model)]
#[sea_orm(schema_name = "docuflow", table_name = "extracted_fields")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = Uuid)]
    pub document_id: Id,

    pub field_name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub field_value: Option<String>,

    /// Extraction confidence for this field (0.0 - 1.0)
    pub confidence_score: f64,

    /// Optional grouping label; fields without one are displayed under "Other"
    pub section: Option<String>,

    /// User who last manually corrected the value, if any
    #[schema(value_type = Option<Uuid>)]
    pub corrected_by_user_id: Option<Id>,

    /// Bounding box of the value on the source page, for overlay display
    pub bbox_x: Option<f64>,
    pub bbox_y: Option<f64>,
    pub bbox_width: Option<f64>,
    pub bbox_height: Option<f64>,
    pub page: Option<i32>,

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
        belongs_to = "super::documents::Entity",
        from = "Column::DocumentId",
        to = "super::documents::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Documents,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CorrectedByUserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
