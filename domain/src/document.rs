use crate::documents::{Column, Entity, Model};
use crate::error::Error;
use crate::gateway::object_store::ObjectStore;
use crate::{Id, IntoQueryFilterMap};
use entity_api::{document, query};
use sea_orm::{DatabaseConnection, Value};

use log::*;

pub use entity_api::document::{find_by_id, update_status};

/// Documents uploaded by `user_id`, newest first, optionally narrowed to one
/// document type.
pub async fn find_by_user(
    db: &DatabaseConnection,
    user_id: Id,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    let mut query_filter_map = params.into_query_filter_map();
    query_filter_map.insert(
        "uploaded_by".to_string(),
        Some(Value::Uuid(Some(Box::new(user_id)))),
    );

    let mut documents = query::find_by::<Entity, Column>(db, query_filter_map).await?;
    documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(documents)
}

/// Deletes the document row and then its stored file. The row delete cascades
/// to extracted fields, line items and upload log references; a failure to
/// remove the stored file is logged but does not fail the operation.
pub async fn delete_by_id(
    db: &DatabaseConnection,
    object_store: &dyn ObjectStore,
    id: Id,
) -> Result<(), Error> {
    let document = document::find_by_id(db, id).await?;

    document::delete_by_id(db, id).await?;

    if let Err(err) = object_store.delete(&document.file_path).await {
        warn!(
            "Document {id} deleted but its file {:?} could not be removed: {err:?}",
            document.file_path
        );
    }

    Ok(())
}
