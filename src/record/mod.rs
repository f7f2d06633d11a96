//! Record field extraction
//!
//! The paginator reads the sort value and the identifier off the first and
//! last record of a page. Records declare which in-memory field backs each
//! external (filter/sort) name, so any record shape can be paginated without
//! an accessor per sort field.

mod schema;

pub use schema::{lookup_path, resolve_field_name, FieldDef, Record};
