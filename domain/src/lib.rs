//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with query filters within the domain layer, while encapsulating
//! the underlying implementation details remain in the `entity_api` crate.
pub use entity_api::{
    mutate::{IntoUpdateMap, UpdateMap},
    IntoQueryFilterMap, QueryFilterMap,
};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{
    document_status, document_types, documents, extracted_fields, line_items, upload_logs,
    upload_status, users, Id,
};

pub mod document;
pub mod document_type;
pub mod error;
pub mod review;
pub mod upload;
pub mod upload_log;
pub mod user;

pub mod gateway;
