//! Query construction for keyset pagination
//!
//! Builds the filter fragment that selects records strictly after (or
//! before) a cursor, and the sort specification that gives the collection a
//! total order matching it.
//!
//! With a non-unique sort field the identifier breaks ties:
//!
//! ```text
//! (name, _id) > ("b", 2)
//!   =>  name > "b"  OR  (name == "b" AND _id > 2)
//! ```

mod range;
mod sort;

pub use range::{and_all, build_range_filter, ComparisonOp};
pub use sort::{sort_document, sort_keys, SortKey};
