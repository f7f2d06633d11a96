//! Keyset pagination
//!
//! [`Paginator`] turns a [`PageRequest`] into one page of records and the
//! cursor tokens for its neighbours.
//!
//! # Overview
//!
//! For each request the paginator:
//! 1. decodes the incoming cursor, if any
//! 2. narrows the base filter to records past the cursor
//! 3. optionally counts all records matching the base filter
//! 4. fetches one record more than the page size, to learn whether another
//!    page exists
//! 5. encodes tokens from the first and last record of the page
//!
//! Paginating backward fetches in reverse sort order and flips the page, so
//! records are always returned in display order.

mod engine;
mod types;

pub use engine::{PaginatorBuilder, Paginator};
pub use types::{Page, PageRequest};

#[cfg(test)]
mod tests;
