//! Review workspace for a single document.
//!
//! Bundles the document row with its extracted fields and line items, and
//! carries the pure review rules: which fields need reviewer attention, how
//! fields group into sections, and how line item amounts and totals derive
//! from quantity and unit price.
use crate::error::Error;
use crate::{extracted_fields, line_items, Id};
use entity_api::{document, extracted_field, line_item};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use entity_api::{
    extracted_field::find_by_id as find_field, line_item::find_by_id as find_line_item,
};

/// Fields extracted below this confidence are flagged for reviewer attention.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Section name under which fields without a section are grouped.
pub const UNSECTIONED_GROUP: &str = "Other";

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewWorkspace {
    pub document: crate::documents::Model,
    pub fields: Vec<extracted_fields::Model>,
    pub line_items: Vec<line_items::Model>,
}

/// One section of the field summary panel, in first-seen field order.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldSection {
    pub section: String,
    pub fields: Vec<extracted_fields::Model>,
}

/// Reviewer edits to one line item. Quantity and unit price arrive as the raw
/// strings typed into the table; unparseable input falls back to zero rather
/// than rejecting the edit.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LineItemEdits {
    pub date: Option<chrono::NaiveDate>,
    pub description: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
}

impl ReviewWorkspace {
    /// Groups fields by section, preserving the order sections first appear
    /// in. Fields without a section land in an "Other" group, which only
    /// exists when at least one such field does.
    pub fn grouped_fields(&self) -> Vec<FieldSection> {
        let mut sections: Vec<FieldSection> = Vec::new();

        for field in &self.fields {
            let section = field
                .section
                .clone()
                .unwrap_or_else(|| UNSECTIONED_GROUP.to_string());

            match sections.iter_mut().find(|group| group.section == section) {
                Some(group) => group.fields.push(field.clone()),
                None => sections.push(FieldSection {
                    section,
                    fields: vec![field.clone()],
                }),
            }
        }

        sections
    }

    /// Number of extracted fields flagged for reviewer attention.
    pub fn needs_attention_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| needs_attention(field))
            .count()
    }

    pub fn subtotal(&self) -> f64 {
        self.line_items.iter().map(|item| item.amount).sum()
    }

    /// No tax is modeled, so the total equals the subtotal.
    pub fn total(&self) -> f64 {
        self.subtotal()
    }
}

pub fn needs_attention(field: &extracted_fields::Model) -> bool {
    field.confidence_score < LOW_CONFIDENCE_THRESHOLD
}

/// Loads the full review workspace for one document.
pub async fn load(db: &DatabaseConnection, document_id: Id) -> Result<ReviewWorkspace, Error> {
    let document = document::find_by_id(db, document_id).await?;
    let fields = extracted_field::find_by_document(db, document_id).await?;
    let line_items = line_item::find_by_document(db, document_id).await?;

    Ok(ReviewWorkspace {
        document,
        fields,
        line_items,
    })
}

/// A document's extracted fields in extraction order.
pub async fn find_fields_by_document(
    db: &DatabaseConnection,
    document_id: Id,
) -> Result<Vec<extracted_fields::Model>, Error> {
    Ok(extracted_field::find_by_document(db, document_id).await?)
}

/// A document's line items in insertion order.
pub async fn find_line_items_by_document(
    db: &DatabaseConnection,
    document_id: Id,
) -> Result<Vec<line_items::Model>, Error> {
    Ok(line_item::find_by_document(db, document_id).await?)
}

/// Persists a reviewer's correction to one extracted field. The extraction
/// confidence is kept as-is; the correcting user is recorded.
pub async fn update_field_value(
    db: &DatabaseConnection,
    field_id: Id,
    field_value: Option<String>,
    corrected_by: Id,
) -> Result<extracted_fields::Model, Error> {
    Ok(extracted_field::update_value(db, field_id, field_value, corrected_by).await?)
}

/// Applies reviewer edits to one line item and persists the result. The
/// stored amount is always recomputed from the effective quantity and unit
/// price, so it can never drift from its factors.
pub async fn update_line_item(
    db: &DatabaseConnection,
    line_item_id: Id,
    edits: LineItemEdits,
) -> Result<line_items::Model, Error> {
    let existing = line_item::find_by_id(db, line_item_id).await?;
    let merged = apply_edits(&existing, &edits);

    Ok(line_item::update(db, line_item_id, merged).await?)
}

/// Appends an empty line item row for the reviewer to fill in.
pub async fn add_line_item(
    db: &DatabaseConnection,
    document_id: Id,
) -> Result<line_items::Model, Error> {
    let now = chrono::Utc::now();
    let blank = line_items::Model {
        id: Id::new_v4(),
        document_id,
        date: None,
        description: String::new(),
        quantity: 0.0,
        unit_price: 0.0,
        amount: 0.0,
        created_at: now.into(),
        updated_at: now.into(),
    };

    Ok(line_item::create(db, blank).await?)
}

pub async fn delete_line_item(db: &DatabaseConnection, line_item_id: Id) -> Result<(), Error> {
    Ok(line_item::delete_by_id(db, line_item_id).await?)
}

/// Removes every line item belonging to `document_id`, returning how many
/// rows were deleted.
pub async fn delete_all_line_items(
    db: &DatabaseConnection,
    document_id: Id,
) -> Result<u64, Error> {
    Ok(line_item::delete_by_document(db, document_id).await?)
}

fn apply_edits(existing: &line_items::Model, edits: &LineItemEdits) -> line_items::Model {
    let quantity = match &edits.quantity {
        Some(raw) => parse_decimal(raw),
        None => existing.quantity,
    };
    let unit_price = match &edits.unit_price {
        Some(raw) => parse_decimal(raw),
        None => existing.unit_price,
    };

    line_items::Model {
        date: edits.date.or(existing.date),
        description: edits
            .description
            .clone()
            .unwrap_or_else(|| existing.description.clone()),
        quantity,
        unit_price,
        amount: quantity * unit_price,
        ..existing.clone()
    }
}

fn parse_decimal(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(
        name: &str,
        confidence: f64,
        section: Option<&str>,
    ) -> extracted_fields::Model {
        let now = chrono::Utc::now();
        extracted_fields::Model {
            id: Id::new_v4(),
            document_id: Id::new_v4(),
            field_name: name.to_owned(),
            field_value: Some("value".to_owned()),
            confidence_score: confidence,
            section: section.map(str::to_owned),
            corrected_by_user_id: None,
            bbox_x: None,
            bbox_y: None,
            bbox_width: None,
            bbox_height: None,
            page: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn line_item(quantity: f64, unit_price: f64) -> line_items::Model {
        let now = chrono::Utc::now();
        line_items::Model {
            id: Id::new_v4(),
            document_id: Id::new_v4(),
            date: None,
            description: "item".to_owned(),
            quantity,
            unit_price,
            amount: quantity * unit_price,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn workspace(
        fields: Vec<extracted_fields::Model>,
        line_items: Vec<line_items::Model>,
    ) -> ReviewWorkspace {
        let now = chrono::Utc::now();
        ReviewWorkspace {
            document: crate::documents::Model {
                id: Id::new_v4(),
                document_type_id: Id::new_v4(),
                uploaded_by: Id::new_v4(),
                file_path: "path".to_owned(),
                original_filename: "invoice.pdf".to_owned(),
                file_size: 1,
                mime_type: "application/pdf".to_owned(),
                status: crate::document_status::DocumentStatus::Pending,
                confidence_score: None,
                requires_hitl: false,
                created_at: now.into(),
                updated_at: now.into(),
            },
            fields,
            line_items,
        }
    }

    #[test]
    fn fields_at_the_confidence_threshold_are_not_flagged() {
        assert!(!needs_attention(&field("Total", 0.8, None)));
        assert!(needs_attention(&field("Amount", 0.79, None)));
        assert!(!needs_attention(&field("Vendor", 0.95, None)));
    }

    #[test]
    fn grouped_fields_preserves_section_order_and_buckets_unsectioned_into_other() {
        let workspace = workspace(
            vec![
                field("Invoice Number", 0.98, Some("Header")),
                field("Amount", 0.65, Some("Totals")),
                field("Date", 0.95, Some("Header")),
                field("Total", 0.88, None),
            ],
            vec![],
        );

        let sections = workspace.grouped_fields();

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].section, "Header");
        assert_eq!(sections[0].fields.len(), 2);
        assert_eq!(sections[1].section, "Totals");
        assert_eq!(sections[2].section, "Other");
        assert_eq!(sections[2].fields[0].field_name, "Total");
    }

    #[test]
    fn grouped_fields_omits_the_other_group_when_every_field_has_a_section() {
        let workspace = workspace(vec![field("Vendor", 0.92, Some("Header"))], vec![]);

        let sections = workspace.grouped_fields();

        assert!(!sections.iter().any(|group| group.section == "Other"));
    }

    #[test]
    fn needs_attention_count_only_counts_low_confidence_fields() {
        let workspace = workspace(
            vec![
                field("Invoice Number", 0.98, Some("Header")),
                field("Amount", 0.65, Some("Totals")),
                field("Tax", 0.72, Some("Totals")),
            ],
            vec![],
        );

        assert_eq!(workspace.needs_attention_count(), 2);
    }

    #[test]
    fn subtotal_and_total_sum_line_item_amounts() {
        let workspace = workspace(vec![], vec![line_item(80.0, 23.0), line_item(2.0, 10.5)]);

        assert_eq!(workspace.subtotal(), 1861.0);
        assert_eq!(workspace.total(), workspace.subtotal());
    }

    #[test]
    fn apply_edits_recomputes_the_amount_from_both_factors() {
        let existing = line_item(80.0, 23.0);

        let merged = apply_edits(
            &existing,
            &LineItemEdits {
                quantity: Some("3".to_owned()),
                ..Default::default()
            },
        );

        assert_eq!(merged.quantity, 3.0);
        assert_eq!(merged.unit_price, 23.0);
        assert_eq!(merged.amount, 69.0);
    }

    #[test]
    fn apply_edits_falls_back_to_zero_for_unparseable_numbers() {
        let existing = line_item(80.0, 23.0);

        let merged = apply_edits(
            &existing,
            &LineItemEdits {
                quantity: Some("eighty".to_owned()),
                ..Default::default()
            },
        );

        assert_eq!(merged.quantity, 0.0);
        assert_eq!(merged.amount, 0.0);
    }

    #[test]
    fn apply_edits_keeps_untouched_attributes() {
        let mut existing = line_item(1.0, 2.0);
        existing.description = "Consulting services".to_owned();

        let merged = apply_edits(
            &existing,
            &LineItemEdits {
                unit_price: Some("3.5".to_owned()),
                ..Default::default()
            },
        );

        assert_eq!(merged.description, "Consulting services");
        assert_eq!(merged.date, existing.date);
        assert_eq!(merged.amount, 3.5);
    }
}
