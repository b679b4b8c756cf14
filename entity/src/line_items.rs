//! SeaORM Entity for the line_items table.
//! One row of a document's tabular breakdown (e.g. an invoice line).

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::line_items::Model)]
#[sea_orm(schema_name = "docuflow", table_name = "line_items")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = Uuid)]
    pub document_id: Id,

    /// Nullable so that a freshly added, not-yet-edited row can exist
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<Date>,

    pub description: String,

    pub quantity: f64,

    pub unit_price: f64,

    /// Always quantity * unit_price; recomputed on every quantity or
    /// unit price change, never edited independently.
    pub amount: f64,

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
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
