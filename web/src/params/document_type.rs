use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{IntoUpdateMap, UpdateMap};

/// Full-replace update of a document type. A `description` of `null` clears
/// the stored description.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpdateParams {
    pub name: String,
    pub description: Option<String>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        update_map.insert(
            "name".to_string(),
            Some(Value::String(Some(Box::new(self.name)))),
        );
        update_map.insert(
            "description".to_string(),
            Some(Value::String(self.description.map(Box::new))),
        );
        update_map
    }
}
