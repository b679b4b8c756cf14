use serde::Deserialize;
use utoipa::IntoParams;

/// Bulk deletion of a document's line items requires an explicit
/// `confirm=true`, mirroring the confirmation dialog in the dashboard.
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct DeleteAllParams {
    pub(crate) confirm: Option<bool>,
}

impl DeleteAllParams {
    pub(crate) fn confirmed(&self) -> bool {
        self.confirm.unwrap_or(false)
    }
}
