//! Storage collaborators
//!
//! The paginator never talks to a database itself. It hands filter
//! fragments, a sort specification, and a limit to a [`Fetcher`], and asks
//! a [`Counter`] for totals. Implement both for a real driver; the
//! [`MemoryStore`] implements them over in-memory documents.

mod compare;
mod matcher;
mod memory;
mod projection;

use crate::error::Result;
use crate::query::{and_all, sort_document, SortKey};
use crate::types::{Collation, Filter};
use async_trait::async_trait;
use bson::Document;

pub use compare::compare_values;
pub use matcher::matches;
pub use memory::MemoryStore;
pub use projection::project;

/// Everything a fetch collaborator needs to run one page query
#[derive(Debug, Clone, PartialEq)]
pub struct FetchQuery {
    /// Collection to query
    pub collection: String,
    /// Filter fragments, all of which must match
    pub filters: Vec<Filter>,
    /// Sort keys, most significant first
    pub sort: Vec<SortKey>,
    /// Maximum number of records to return
    pub limit: usize,
    /// String comparison rules
    pub collation: Option<Collation>,
    /// Fields to keep or drop
    pub projection: Option<Document>,
}

impl FetchQuery {
    /// The filter fragments as a single document
    pub fn filter(&self) -> Filter {
        and_all(&self.filters)
    }

    /// The sort keys as a `{ field: 1 | -1 }` document
    pub fn sort_document(&self) -> Document {
        sort_document(&self.sort)
    }
}

/// Counts records for the `total` of a page
#[async_trait]
pub trait Counter: Send + Sync {
    /// Count records in `collection` matching every fragment in `filters`
    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64>;
}

/// Fetches the records of a page
#[async_trait]
pub trait Fetcher<R: Send + 'static>: Send + Sync {
    /// Return up to `query.limit` matching records in `query.sort` order
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<R>>;
}
