//! This module provides protection mechanisms for various resources in the web application.
//!
//! Each submodule contains ownership checks for one resource, intended to be
//! installed with `axum::middleware::from_fn_with_state` on the routes that
//! read or modify that resource. Every record in the system is owned by the
//! user who created it; the checks here make sure the authenticated user can
//! only reach their own data.

pub(crate) mod document_types;
pub(crate) mod documents;
pub(crate) mod extracted_fields;
pub(crate) mod line_items;
