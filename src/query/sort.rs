//! Sort specification

use crate::error::{Error, Result};
use crate::types::SortDirection;
use bson::{Bson, Document};
use std::fmt;
use std::str::FromStr;

/// One field of a sort specification
///
/// Written as `field` for ascending and `-field` for descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Field name, possibly dotted
    pub field: String,
    /// Sort order
    pub direction: SortDirection,
}

impl SortKey {
    /// Create a sort key
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Ascending sort on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = match s.strip_prefix('-') {
            Some(field) => (field, SortDirection::Descending),
            None => (s, SortDirection::Ascending),
        };
        if field.is_empty() {
            return Err(Error::invalid_argument(format!("invalid sort key '{s}'")));
        }
        Ok(Self::new(field, direction))
    }
}

/// Sort keys giving a total order for keyset pagination
///
/// Sorting on a field other than the identifier adds the identifier as a
/// secondary key in the same direction.
pub fn sort_keys(sort_field: &str, id_field: &str, direction: SortDirection) -> Vec<SortKey> {
    if sort_field == id_field {
        vec![SortKey::new(id_field, direction)]
    } else {
        vec![
            SortKey::new(sort_field, direction),
            SortKey::new(id_field, direction),
        ]
    }
}

/// Render sort keys as a `{ field: 1 | -1 }` document
pub fn sort_document(keys: &[SortKey]) -> Document {
    keys.iter()
        .map(|key| (key.field.clone(), Bson::Int32(key.direction.as_i32())))
        .collect()
}
