//! Range filter generation

use crate::error::{Error, Result};
use crate::types::{Direction, Filter, SortDirection};
use bson::{doc, Bson, Document};
use std::fmt;

/// Comparison used against the cursor values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// `$gt`
    GreaterThan,
    /// `$lt`
    LessThan,
}

impl ComparisonOp {
    /// Operator for a page in `direction` over a collection sorted by `sort`
    pub fn for_page(sort: SortDirection, direction: Direction) -> Self {
        match (sort, direction) {
            (SortDirection::Ascending, Direction::Forward)
            | (SortDirection::Descending, Direction::Backward) => ComparisonOp::GreaterThan,
            (SortDirection::Ascending, Direction::Backward)
            | (SortDirection::Descending, Direction::Forward) => ComparisonOp::LessThan,
        }
    }

    /// Query operator name
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::GreaterThan => "$gt",
            ComparisonOp::LessThan => "$lt",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the filter selecting records past the cursor values
///
/// `values` must hold `[sort value, id value]` when `tiebreak` is set and
/// `[sort value]` otherwise.
pub fn build_range_filter(
    tiebreak: bool,
    sort_field: &str,
    id_field: &str,
    op: ComparisonOp,
    values: &[Bson],
) -> Result<Filter> {
    let expected = if tiebreak { 2 } else { 1 };
    if values.len() != expected {
        return Err(Error::Arity {
            expected,
            actual: values.len(),
        });
    }

    let op = op.as_str();
    if !tiebreak {
        return Ok(doc! { sort_field: { op: values[0].clone() } });
    }

    let primary = values[0].clone();
    let id = values[1].clone();
    Ok(doc! {
        "$or": [
            { sort_field: { op: primary.clone() } },
            { "$and": [
                { sort_field: { "$eq": primary } },
                { id_field: { op: id } }
            ] }
        ]
    })
}

/// Combine filter fragments with a logical AND
///
/// Empty fragments match everything and are dropped.
pub fn and_all(filters: &[Filter]) -> Filter {
    let parts: Vec<&Document> = filters.iter().filter(|f| !f.is_empty()).collect();
    match parts.as_slice() {
        [] => Document::new(),
        [single] => (*single).clone(),
        _ => doc! { "$and": parts.into_iter().cloned().collect::<Vec<_>>() },
    }
}
