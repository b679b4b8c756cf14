use domain::document_status::DocumentStatus;
use domain::Id;
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{IntoQueryFilterMap, QueryFilterMap};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    #[param(value_type = Option<Uuid>)]
    pub(crate) document_type_id: Option<Id>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        if let Some(document_type_id) = self.document_type_id {
            query_filter_map.insert(
                "document_type_id".to_string(),
                Some(Value::Uuid(Some(Box::new(document_type_id)))),
            );
        }

        query_filter_map
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusParams {
    pub(crate) status: DocumentStatus,
}
