use crate::document_types::Model;
use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::{documents, Id, IntoUpdateMap};
use entity::document_status::DocumentStatus;
use entity_api::{document_type, mutate};
use sea_orm::{DatabaseConnection, IntoActiveModel, Value};
use serde::Serialize;
use utoipa::ToSchema;

pub use entity_api::document_type::{create, delete_by_id, find_by_id, find_by_user};

/// Per-status document counts for one document type's dashboard card.
#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct DocumentStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// A document type together with the counts of its documents, computed
/// server-side so the dashboard renders from a single response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentTypeWithStats {
    #[serde(flatten)]
    pub document_type: Model,
    pub stats: DocumentStats,
}

/// All of a user's document types, newest first, each carrying its document
/// counts.
pub async fn find_by_user_with_stats(
    db: &DatabaseConnection,
    user_id: Id,
) -> Result<Vec<DocumentTypeWithStats>, Error> {
    let document_types = document_type::find_by_user(db, user_id).await?;
    let documents = crate::document::find_by_user(db, user_id, crate::QueryFilterMap::new()).await?;

    Ok(aggregate_stats(document_types, &documents))
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    params: impl IntoUpdateMap,
) -> Result<Model, Error> {
    let mut update_map = params.into_update_map();

    if let Some(Value::String(Some(name))) = update_map.get("name") {
        if name.trim().is_empty() {
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                    EntityErrorKind::Invalid,
                )),
            });
        }
    }
    update_map.insert(
        "updated_at".to_string(),
        Some(Value::from(chrono::DateTime::<chrono::FixedOffset>::from(
            chrono::Utc::now(),
        ))),
    );

    let existing_document_type = find_by_id(db, id).await?;
    let active_model = existing_document_type.into_active_model();
    Ok(mutate::update::<
        crate::document_types::ActiveModel,
        crate::document_types::Column,
    >(db, active_model, update_map)
    .await?)
}

fn aggregate_stats(
    document_types: Vec<Model>,
    documents: &[documents::Model],
) -> Vec<DocumentTypeWithStats> {
    document_types
        .into_iter()
        .map(|document_type| {
            let mut stats = DocumentStats::default();

            for document in documents
                .iter()
                .filter(|document| document.document_type_id == document_type.id)
            {
                stats.total += 1;
                match document.status {
                    DocumentStatus::Pending => stats.pending += 1,
                    DocumentStatus::Approved => stats.approved += 1,
                    DocumentStatus::Rejected => stats.rejected += 1,
                }
            }

            DocumentTypeWithStats {
                document_type,
                stats,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_type(name: &str) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            user_id: Id::new_v4(),
            name: name.to_owned(),
            description: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn document(document_type_id: Id, status: DocumentStatus) -> documents::Model {
        let now = chrono::Utc::now();
        documents::Model {
            id: Id::new_v4(),
            document_type_id,
            uploaded_by: Id::new_v4(),
            file_path: "path".to_owned(),
            original_filename: "file.pdf".to_owned(),
            file_size: 1,
            mime_type: "application/pdf".to_owned(),
            status,
            confidence_score: None,
            requires_hitl: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn aggregate_stats_counts_documents_per_type_and_status() {
        let invoices = document_type("Invoices");
        let receipts = document_type("Receipts");

        let documents = vec![
            document(invoices.id, DocumentStatus::Pending),
            document(invoices.id, DocumentStatus::Approved),
            document(invoices.id, DocumentStatus::Approved),
            document(receipts.id, DocumentStatus::Rejected),
        ];

        let with_stats = aggregate_stats(vec![invoices, receipts], &documents);

        assert_eq!(
            with_stats[0].stats,
            DocumentStats {
                total: 3,
                pending: 1,
                approved: 2,
                rejected: 0
            }
        );
        assert_eq!(
            with_stats[1].stats,
            DocumentStats {
                total: 1,
                pending: 0,
                approved: 0,
                rejected: 1
            }
        );
    }

    #[test]
    fn aggregate_stats_returns_zeroed_stats_for_a_type_without_documents() {
        let empty_type = document_type("Contracts");

        let with_stats = aggregate_stats(vec![empty_type], &[]);

        assert_eq!(with_stats.len(), 1);
        assert_eq!(with_stats[0].stats, DocumentStats::default());
    }
}
