//! Field schema metadata and the `Record` capability

use bson::{Bson, Document};

/// Maps an in-memory field to its external name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// In-memory field name
    pub name: &'static str,
    /// Name used in stored documents, filters, and sorts
    pub external: &'static str,
}

impl FieldDef {
    /// Declare a field
    pub const fn new(name: &'static str, external: &'static str) -> Self {
        Self { name, external }
    }
}

/// A value the paginator can read sort keys from
///
/// ```
/// use keyset_paginate::record::{FieldDef, Record};
/// use bson::Bson;
///
/// struct User {
///     id: i64,
///     email: String,
/// }
///
/// impl Record for User {
///     fn schema() -> &'static [FieldDef] {
///         const FIELDS: &[FieldDef] = &[FieldDef::new("id", "_id"), FieldDef::new("email", "email")];
///         FIELDS
///     }
///
///     fn field(&self, name: &str) -> Option<Bson> {
///         match name {
///             "id" => Some(Bson::Int64(self.id)),
///             "email" => Some(Bson::String(self.email.clone())),
///             _ => None,
///         }
///     }
/// }
///
/// let user = User { id: 7, email: "a@example.com".into() };
/// assert_eq!(user.value_of("_id"), Some(Bson::Int64(7)));
/// ```
pub trait Record {
    /// Declared fields of this record type
    fn schema() -> &'static [FieldDef]
    where
        Self: Sized;

    /// Read a field by its in-memory name
    fn field(&self, name: &str) -> Option<Bson>;

    /// Read a field by its external name
    fn value_of(&self, external: &str) -> Option<Bson>
    where
        Self: Sized,
    {
        resolve_field_name(Some(Self::schema()), external).and_then(|name| self.field(name))
    }
}

/// Find the in-memory field declared under `external`
///
/// Matching is case-sensitive. Returns `None` when there is no schema, the
/// name is empty, or nothing matches.
pub fn resolve_field_name(schema: Option<&[FieldDef]>, external: &str) -> Option<&'static str> {
    if external.is_empty() {
        return None;
    }
    schema?
        .iter()
        .find(|def| def.external == external)
        .map(|def| def.name)
}

impl Record for Document {
    fn schema() -> &'static [FieldDef] {
        &[]
    }

    fn field(&self, name: &str) -> Option<Bson> {
        self.get(name).cloned()
    }

    // Documents are keyed by external name already
    fn value_of(&self, external: &str) -> Option<Bson> {
        lookup_path(self, external).cloned()
    }
}

/// Read a possibly dotted field path (`meta.rank`) from a document
pub fn lookup_path<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        match current {
            Bson::Document(inner) => current = inner.get(part)?,
            _ => return None,
        }
    }
    Some(current)
}
