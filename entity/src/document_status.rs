use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Review status of an uploaded document.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_status")]
pub enum DocumentStatus {
    /// Uploaded, awaiting human review
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    /// Reviewed and confirmed
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Reviewed and rejected
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Pending => write!(fmt, "pending"),
            DocumentStatus::Approved => write!(fmt, "approved"),
            DocumentStatus::Rejected => write!(fmt, "rejected"),
        }
    }
}
