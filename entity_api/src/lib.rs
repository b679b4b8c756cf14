use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, Value};
use std::collections::HashMap;

pub use entity::{
    document_status, document_types, documents, extracted_fields, line_items, upload_logs,
    upload_status, users, Id,
};

pub mod document;
pub mod document_type;
pub mod error;
pub mod extracted_field;
pub mod line_item;
pub mod mutate;
pub mod query;
pub mod upload_log;
pub mod user;

/// `QueryFilterMap` is a data structure that serves as a bridge for translating filter parameters
/// between different layers of the application. It is essentially a wrapper around a `HashMap`
/// where the keys are filter parameter names (as `String`) and the values are optional `Value` types
/// from `sea_orm`.
///
/// This structure is particularly useful in scenarios where you need to pass filter parameters
/// from a web request down to the database query layer in a type-safe and organized manner.
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // HashMap.get returns an Option and so we need to "flatten" this to a single Option
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// `IntoQueryFilterMap` is a trait that provides a method for converting a struct into a
/// `QueryFilterMap`, typically implemented by web-layer param structs so that request
/// parameters can travel down to the query layer without the layers knowing about
/// each other's concrete types.
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

// A pre-built map passes through unchanged, for callers inside the domain
// layer that assemble their filters by hand.
impl IntoQueryFilterMap for QueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap {
        self
    }
}

/// Seeds a development database with a user, a few document types, one reviewed
/// document, its extracted fields and line items.
pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();

    let dev_user = users::ActiveModel {
        email: Set("dev@docuflow.dev".to_owned()),
        first_name: Set("Dev".to_owned()),
        last_name: Set("User".to_owned()),
        display_name: Set(Some("Dev User".to_owned())),
        password: Set(user::generate_hash("password".to_owned())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let user_id = dev_user.id.clone().unwrap();

    let invoices = document_types::ActiveModel {
        user_id: Set(user_id),
        name: Set("Invoices".to_owned()),
        description: Set(Some("Vendor invoices".to_owned())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    document_types::ActiveModel {
        user_id: Set(user_id),
        name: Set("Onboarding Forms".to_owned()),
        description: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let invoice_doc = documents::ActiveModel {
        document_type_id: Set(invoices.id.clone().unwrap()),
        uploaded_by: Set(user_id),
        file_path: Set(format!(
            "{}/{}/acme-invoice-0042.pdf",
            user_id,
            invoices.id.clone().unwrap()
        )),
        original_filename: Set("acme-invoice-0042.pdf".to_owned()),
        file_size: Set(48_221),
        mime_type: Set("application/pdf".to_owned()),
        status: Set(document_status::DocumentStatus::Pending),
        confidence_score: Set(Some(0.85)),
        requires_hitl: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let document_id = invoice_doc.id.clone().unwrap();

    let fields: [(&str, &str, f64, Option<&str>); 6] = [
        ("Invoice Number", "INV-2025-0042", 0.98, Some("Header")),
        ("Date", "2025-04-15", 0.95, Some("Header")),
        ("Vendor", "Acme Corporation", 0.92, Some("Header")),
        ("Amount", "$1,250.00", 0.65, Some("Totals")),
        ("Tax", "$112.50", 0.72, Some("Totals")),
        ("Total", "$1,362.50", 0.88, None),
    ];
    for (name, value, confidence, section) in fields {
        extracted_fields::ActiveModel {
            document_id: Set(document_id),
            field_name: Set(name.to_owned()),
            field_value: Set(Some(value.to_owned())),
            confidence_score: Set(confidence),
            section: Set(section.map(str::to_owned)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .save(db)
        .await
        .unwrap();
    }

    line_items::ActiveModel {
        document_id: Set(document_id),
        date: Set(Some(chrono::NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())),
        description: Set("Consulting services".to_owned()),
        quantity: Set(80.0),
        unit_price: Set(23.0),
        amount: Set(1840.0),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
}
