use domain::review::{FieldSection, ReviewWorkspace};
use serde::Serialize;
use utoipa::ToSchema;

/// Everything the review screen renders for one document: the document row,
/// its fields grouped into sections, its line items and the derived totals.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub document: domain::documents::Model,
    pub sections: Vec<FieldSection>,
    pub line_items: Vec<domain::line_items::Model>,
    pub needs_attention_count: usize,
    pub subtotal: f64,
    pub total: f64,
}

impl From<ReviewWorkspace> for ReviewResponse {
    fn from(workspace: ReviewWorkspace) -> Self {
        let sections = workspace.grouped_fields();
        let needs_attention_count = workspace.needs_attention_count();
        let subtotal = workspace.subtotal();
        let total = workspace.total();

        Self {
            document: workspace.document,
            sections,
            line_items: workspace.line_items,
            needs_attention_count,
            subtotal,
            total,
        }
    }
}
