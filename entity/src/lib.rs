use uuid::Uuid;

pub mod document_status;
pub mod document_types;
pub mod documents;
pub mod extracted_fields;
pub mod line_items;
pub mod upload_logs;
pub mod upload_status;
pub mod users;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
