//! Page request and page result types

use crate::types::{Collation, CursorKind, Filter, SortDirection};
use bson::Document;
use serde::{Deserialize, Serialize};

/// Parameters of one page query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Collection to paginate
    pub collection: String,

    /// Base filter every record must match
    #[serde(default)]
    pub filter: Filter,

    /// Field to paginate on (defaults to the identifier field)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,

    /// Sort order of the paginated field
    #[serde(default)]
    pub sort: SortDirection,

    /// Page size
    pub limit: usize,

    /// Token of the last record of the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Token of the first record of the following page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    /// Also count all records matching `filter`
    #[serde(default)]
    pub count_total: bool,

    /// String comparison rules for filtering and sorting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<Collation>,

    /// Fields to keep or drop from returned records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Document>,
}

impl PageRequest {
    /// Create a request for the first page of a collection
    pub fn new(collection: impl Into<String>, limit: usize) -> Self {
        Self {
            collection: collection.into(),
            limit,
            ..Default::default()
        }
    }

    /// Set the base filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Paginate on `field` in `direction`
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort = direction;
        self
    }

    /// Fetch the page after `token`
    pub fn after(mut self, token: impl Into<String>) -> Self {
        self.next = Some(token.into());
        self
    }

    /// Fetch the page before `token`
    pub fn before(mut self, token: impl Into<String>) -> Self {
        self.previous = Some(token.into());
        self
    }

    /// Request a total count
    pub fn count_total(mut self) -> Self {
        self.count_total = true;
        self
    }

    /// Set the collation
    pub fn collation(mut self, collation: Collation) -> Self {
        self.collation = Some(collation);
        self
    }

    /// Set the projection
    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    /// The cursor in effect, ignoring empty tokens
    pub(crate) fn cursor(&self) -> (Option<&str>, Option<&str>) {
        (non_empty(&self.next), non_empty(&self.previous))
    }
}

fn non_empty(token: &Option<String>) -> Option<&str> {
    token.as_deref().filter(|t| !t.is_empty())
}

/// One page of records plus tokens for its neighbours
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// Records in display order
    pub records: Vec<R>,
    /// Token for the following page
    pub next: Option<String>,
    /// Token for the preceding page
    pub previous: Option<String>,
    /// Whether records exist after this page
    pub has_next: bool,
    /// Whether records exist before this page
    pub has_previous: bool,
    /// Records matching the base filter, if requested
    pub total: Option<u64>,
}

impl<R> Page<R> {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Token to continue in the given cursor's direction
    pub fn token(&self, kind: CursorKind) -> Option<&str> {
        match kind {
            CursorKind::Next => self.next.as_deref(),
            CursorKind::Previous => self.previous.as_deref(),
        }
    }

    /// Consume the page, keeping the records
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}
