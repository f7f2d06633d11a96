// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Keyset Paginate
//!
//! Cursor-based (keyset) pagination over document collections.
//!
//! Instead of skipping `offset` records, each page ends with an opaque
//! cursor token carrying the sort value and identifier of its boundary
//! record. The next request turns that token into a range filter, so pages
//! stay stable while records are inserted or removed and cost the same no
//! matter how deep the caller has paged.
//!
//! ## Features
//!
//! - **Forward and backward paging**: `next` and `previous` tokens on every page
//! - **Any sort field**: non-unique fields are tie-broken by the identifier
//! - **Totals**: optional count of all records matching the base filter
//! - **Pluggable storage**: implement [`Counter`] and [`Fetcher`] for a driver
//! - **In-memory store**: [`MemoryStore`] evaluates filters, sorts, collations,
//!   and projections over BSON documents
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keyset_paginate::{MemoryStore, PageRequest, Paginator, Result, SortDirection};
//! use bson::{doc, Document};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = Arc::new(MemoryStore::new().with_collection(
//!         "items",
//!         [
//!             doc! { "_id": 1, "name": "a" },
//!             doc! { "_id": 2, "name": "b" },
//!             doc! { "_id": 3, "name": "c" },
//!         ],
//!     ));
//!     let pager = Paginator::<Document>::new(store);
//!
//!     let request = PageRequest::new("items", 2).sort_by("name", SortDirection::Ascending);
//!     let first = pager.paginate(&request).await?;
//!
//!     if let Some(token) = first.next {
//!         let second = pager.paginate(&request.clone().after(token)).await?;
//!         assert_eq!(second.records.len(), 1);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                Paginator::paginate(request)               │
//! └───────────────────────────────────────────────────────────┘
//!          │                  │                    │
//! ┌────────┴───────┬──────────┴────────┬───────────┴────────┐
//! │     Cursor     │       Query       │       Record       │
//! ├────────────────┼───────────────────┼────────────────────┤
//! │ BSON + base64  │ range filter      │ field schema       │
//! │ arity checks   │ sort keys         │ value lookup       │
//! └────────────────┴───────────────────┴────────────────────┘
//!                             │
//! ┌───────────────────────────┴───────────────────────────────┐
//! │           Store: Counter + Fetcher (MemoryStore)          │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Paginator configuration
pub mod config;

/// Cursor token encoding and decoding
pub mod cursor;

/// Record field extraction
pub mod record;

/// Range filters and sort specifications
pub mod query;

/// Page orchestration
pub mod paginate;

/// Storage collaborators and the in-memory store
pub mod store;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::PagerConfig;
pub use paginate::{Page, PageRequest, Paginator, PaginatorBuilder};
pub use record::{FieldDef, Record};
pub use store::{Counter, FetchQuery, Fetcher, MemoryStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
