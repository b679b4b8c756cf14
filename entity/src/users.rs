//! SeaORM Entity for the users table.

use crate::Id;
use axum_login::AuthUser;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::users::Model)]
#[sea_orm(schema_name = "docuflow", table_name = "users")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[sea_orm(unique)]
    pub email: String,

    pub first_name: String,

    pub last_name: String,

    pub display_name: Option<String>,

    /// Argon2 password hash, never serialized back to clients
    #[serde(skip_serializing)]
    pub password: String,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_types::Entity")]
    DocumentTypes,

    #[sea_orm(has_many = "super::documents::Entity")]
    Documents,

    #[sea_orm(has_many = "super::upload_logs::Entity")]
    UploadLogs,
}

impl Related<super::document_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentTypes.def()
    }
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl Related<super::upload_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl AuthUser for Model {
    type Id = Id;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn session_auth_hash(&self) -> &[u8] {
        // Changing the password invalidates all of the user's sessions
        self.password.as_bytes()
    }
}
