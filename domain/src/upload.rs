//! Upload pipeline for document files.
//!
//! Files are processed sequentially. Each file is first written to the object
//! store and then recorded as a document row; either step failing marks that
//! one file as failed and the pipeline moves on to the next. Every attempt,
//! successful or not, appends one row to the upload audit trail.
use crate::document_status::DocumentStatus;
use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::gateway::object_store::ObjectStore;
use crate::upload_status::UploadStatus;
use crate::{documents, Id};
use entity_api::{document, document_type, upload_log};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use log::*;

/// One file submitted for upload.
#[derive(Debug)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Outcome of one upload batch. `progress` maps each submitted file name to
/// its completion percentage (100 for stored files, 0 for failed ones).
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadReport {
    pub succeeded: usize,
    pub failed: usize,
    pub progress: HashMap<String, u8>,
}

/// Uploads a batch of files into one document type owned by `user_id`.
///
/// An empty batch is rejected before any work happens. A missing document
/// type fails the whole batch; individual file failures do not.
pub async fn upload_documents(
    db: &DatabaseConnection,
    object_store: &dyn ObjectStore,
    user_id: Id,
    document_type_id: Id,
    files: Vec<UploadFile>,
) -> Result<UploadReport, Error> {
    if files.is_empty() {
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Invalid,
            )),
        });
    }

    // The whole batch targets one document type; a missing id fails fast.
    document_type::find_by_id(db, document_type_id).await?;

    let mut report = UploadReport {
        succeeded: 0,
        failed: 0,
        progress: HashMap::with_capacity(files.len()),
    };

    for file in files {
        report.progress.insert(file.file_name.clone(), 0);

        // Paths are derived from owner, type and filename only, so re-uploading
        // the same filename overwrites the stored object (last write wins).
        let file_path = format!("{user_id}/{document_type_id}/{}", file.file_name);

        if let Err(err) = object_store.put(&file_path, &file.bytes).await {
            warn!("Failed to store uploaded file {:?}: {err:?}", file.file_name);
            upload_log::create(
                db,
                user_id,
                None,
                file.file_name,
                UploadStatus::Failed,
                Some("Failed to write file to storage".to_string()),
            )
            .await?;
            report.failed += 1;
            continue;
        }

        let document_model = documents::Model {
            id: Id::new_v4(),
            document_type_id,
            uploaded_by: user_id,
            file_path: file_path.clone(),
            original_filename: file.file_name.clone(),
            file_size: file.bytes.len() as i64,
            mime_type: file.mime_type,
            status: DocumentStatus::Pending,
            confidence_score: None,
            requires_hitl: false,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        };

        match document::create(db, document_model).await {
            Ok(document) => {
                upload_log::create(
                    db,
                    user_id,
                    Some(document.id),
                    file.file_name.clone(),
                    UploadStatus::Success,
                    None,
                )
                .await?;
                report.succeeded += 1;
                report.progress.insert(file.file_name, 100);
            }
            Err(err) => {
                warn!(
                    "Stored file {file_path:?} but failed to record its document row: {err:?}"
                );
                upload_log::create(
                    db,
                    user_id,
                    None,
                    file.file_name,
                    UploadStatus::Failed,
                    Some("Failed to record document".to_string()),
                )
                .await?;
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::gateway::object_store::InMemoryObjectStore;
    use crate::{document_types, upload_logs};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn upload_file(file_name: &str) -> UploadFile {
        UploadFile {
            file_name: file_name.to_owned(),
            mime_type: "application/pdf".to_owned(),
            bytes: b"%PDF-1.7".to_vec(),
        }
    }

    fn document_type_model(id: Id, user_id: Id) -> document_types::Model {
        let now = chrono::Utc::now();
        document_types::Model {
            id,
            user_id,
            name: "Invoices".to_owned(),
            description: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn document_model(document_type_id: Id, user_id: Id, file_name: &str) -> documents::Model {
        let now = chrono::Utc::now();
        documents::Model {
            id: Id::new_v4(),
            document_type_id,
            uploaded_by: user_id,
            file_path: format!("{user_id}/{document_type_id}/{file_name}"),
            original_filename: file_name.to_owned(),
            file_size: 8,
            mime_type: "application/pdf".to_owned(),
            status: DocumentStatus::Pending,
            confidence_score: None,
            requires_hitl: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn upload_log_model(
        user_id: Id,
        document_id: Option<Id>,
        file_name: &str,
        status: UploadStatus,
    ) -> upload_logs::Model {
        upload_logs::Model {
            id: Id::new_v4(),
            user_id,
            document_id,
            file_name: file_name.to_owned(),
            status,
            error_message: None,
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn upload_documents_reports_partial_failure_per_file() -> Result<(), Error> {
        let user_id = Id::new_v4();
        let document_type_id = Id::new_v4();

        let good_document = document_model(document_type_id, user_id, "good.pdf");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![document_type_model(document_type_id, user_id)]])
            .append_query_results(vec![vec![good_document.clone()]])
            .append_query_results(vec![vec![upload_log_model(
                user_id,
                Some(good_document.id),
                "good.pdf",
                UploadStatus::Success,
            )]])
            .append_query_results(vec![vec![upload_log_model(
                user_id,
                None,
                "bad.pdf",
                UploadStatus::Failed,
            )]])
            .into_connection();

        let object_store = InMemoryObjectStore::failing_on(["bad.pdf".to_owned()]);

        let report = upload_documents(
            &db,
            &object_store,
            user_id,
            document_type_id,
            vec![upload_file("good.pdf"), upload_file("bad.pdf")],
        )
        .await?;

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.progress.get("good.pdf"), Some(&100));
        assert_eq!(report.progress.get("bad.pdf"), Some(&0));
        // Only the good file made it into storage
        assert_eq!(object_store.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn upload_documents_stores_files_under_user_and_type_path() -> Result<(), Error> {
        let user_id = Id::new_v4();
        let document_type_id = Id::new_v4();
        let document = document_model(document_type_id, user_id, "a.pdf");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![document_type_model(document_type_id, user_id)]])
            .append_query_results(vec![vec![document.clone()]])
            .append_query_results(vec![vec![upload_log_model(
                user_id,
                Some(document.id),
                "a.pdf",
                UploadStatus::Success,
            )]])
            .into_connection();

        let object_store = InMemoryObjectStore::new();

        let report = upload_documents(
            &db,
            &object_store,
            user_id,
            document_type_id,
            vec![upload_file("a.pdf")],
        )
        .await?;

        assert_eq!(report.succeeded, 1);
        // The stored key is fully determined by owner, type and filename
        assert!(object_store.contains(&format!("{user_id}/{document_type_id}/a.pdf")));
        assert_eq!(object_store.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn upload_documents_rejects_an_empty_batch_without_touching_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let object_store = InMemoryObjectStore::new();

        let result =
            upload_documents(&db, &object_store, Id::new_v4(), Id::new_v4(), vec![]).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
        assert!(db.into_transaction_log().is_empty());
        assert!(object_store.is_empty());
    }

    #[tokio::test]
    async fn upload_documents_fails_the_batch_for_an_unknown_document_type() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<document_types::Model>::new()])
            .into_connection();
        let object_store = InMemoryObjectStore::new();

        let result = upload_documents(
            &db,
            &object_store,
            Id::new_v4(),
            Id::new_v4(),
            vec![upload_file("orphan.pdf")],
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound))
        );
        assert!(object_store.is_empty());
    }
}
