//! Filter evaluation against in-memory documents

use super::compare::{compare_values, type_rank, values_equal};
use crate::error::{Error, Result};
use crate::record::lookup_path;
use crate::types::Collation;
use bson::{Bson, Document};
use regex::RegexBuilder;
use std::cmp::Ordering;

/// Check whether `document` satisfies `filter`
///
/// Supports `$and`, `$or`, `$nor`, and the field operators `$eq`, `$ne`,
/// `$gt`, `$gte`, `$lt`, `$lte`, `$in`, `$nin`, `$exists`, and `$regex`.
pub fn matches(document: &Document, filter: &Document, collation: Option<&Collation>) -> Result<bool> {
    for (key, condition) in filter {
        let matched = match key.as_str() {
            "$and" => {
                let mut all = true;
                for clause in clauses(key, condition)? {
                    if !matches(document, clause, collation)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => any_clause(document, key, condition, collation)?,
            "$nor" => !any_clause(document, key, condition, collation)?,
            op if op.starts_with('$') => return Err(Error::unsupported_operator(op)),
            path => matches_field(lookup_path(document, path), condition, collation)?,
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Check `document` against every fragment
pub(crate) fn matches_all(
    document: &Document,
    filters: &[Document],
    collation: Option<&Collation>,
) -> Result<bool> {
    for filter in filters {
        if !matches(document, filter, collation)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_clause(
    document: &Document,
    op: &str,
    condition: &Bson,
    collation: Option<&Collation>,
) -> Result<bool> {
    for clause in clauses(op, condition)? {
        if matches(document, clause, collation)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn clauses<'a>(op: &str, condition: &'a Bson) -> Result<Vec<&'a Document>> {
    let Bson::Array(items) = condition else {
        return Err(Error::invalid_argument(format!(
            "{op} requires an array of documents"
        )));
    };
    items
        .iter()
        .map(|item| match item {
            Bson::Document(clause) => Ok(clause),
            _ => Err(Error::invalid_argument(format!(
                "{op} requires an array of documents"
            ))),
        })
        .collect()
}

fn matches_field(
    value: Option<&Bson>,
    condition: &Bson,
    collation: Option<&Collation>,
) -> Result<bool> {
    match condition {
        Bson::Document(ops) if is_operator_document(ops) => {
            for (op, operand) in ops {
                if !matches_operator(value, op, operand, ops, collation)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Bson::RegularExpression(regex) => regex_matches(value, &regex.pattern, &regex.options),
        expected => Ok(equals(value, expected, collation)),
    }
}

fn is_operator_document(document: &Document) -> bool {
    document.keys().next().is_some_and(|key| key.starts_with('$'))
}

fn matches_operator(
    value: Option<&Bson>,
    op: &str,
    operand: &Bson,
    ops: &Document,
    collation: Option<&Collation>,
) -> Result<bool> {
    let matched = match op {
        "$eq" => equals(value, operand, collation),
        "$ne" => !equals(value, operand, collation),
        "$gt" => compares(value, operand, collation, |ord| ord == Ordering::Greater),
        "$gte" => compares(value, operand, collation, |ord| ord != Ordering::Less),
        "$lt" => compares(value, operand, collation, |ord| ord == Ordering::Less),
        "$lte" => compares(value, operand, collation, |ord| ord != Ordering::Greater),
        "$in" => in_list(value, op, operand, collation)?,
        "$nin" => !in_list(value, op, operand, collation)?,
        "$exists" => value.is_some() == is_truthy(operand),
        "$regex" => {
            let options = ops.get_str("$options").unwrap_or("");
            match operand {
                Bson::String(pattern) => regex_matches(value, pattern, options)?,
                Bson::RegularExpression(regex) => {
                    let options = if options.is_empty() { regex.options.as_str() } else { options };
                    regex_matches(value, &regex.pattern, options)?
                }
                _ => return Err(Error::invalid_argument("$regex requires a string pattern")),
            }
        }
        "$options" => true,
        other => return Err(Error::unsupported_operator(other)),
    };
    Ok(matched)
}

/// Equality with array membership and missing-as-null
fn equals(value: Option<&Bson>, expected: &Bson, collation: Option<&Collation>) -> bool {
    match value {
        None => matches!(expected, Bson::Null),
        Some(Bson::Array(items)) if !matches!(expected, Bson::Array(_)) => {
            items.iter().any(|item| values_equal(item, expected, collation))
        }
        Some(actual) => values_equal(actual, expected, collation),
    }
}

/// Ordered comparison, only between values of the same type class
fn compares(
    value: Option<&Bson>,
    operand: &Bson,
    collation: Option<&Collation>,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    value.is_some_and(|actual| {
        type_rank(actual) == type_rank(operand) && accept(compare_values(actual, operand, collation))
    })
}

fn in_list(
    value: Option<&Bson>,
    op: &str,
    operand: &Bson,
    collation: Option<&Collation>,
) -> Result<bool> {
    let Bson::Array(candidates) = operand else {
        return Err(Error::invalid_argument(format!("{op} requires an array")));
    };
    Ok(candidates
        .iter()
        .any(|candidate| equals(value, candidate, collation)))
}

fn regex_matches(value: Option<&Bson>, pattern: &str, options: &str) -> Result<bool> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .multi_line(options.contains('m'))
        .dot_matches_new_line(options.contains('s'))
        .ignore_whitespace(options.contains('x'))
        .build()
        .map_err(|e| Error::Regex {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

    Ok(match value {
        Some(Bson::String(s)) => regex.is_match(s),
        _ => false,
    })
}

pub(crate) fn is_truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(b) => *b,
        Bson::Int32(n) => *n != 0,
        Bson::Int64(n) => *n != 0,
        Bson::Double(n) => *n != 0.0,
        Bson::Null | Bson::Undefined => false,
        _ => true,
    }
}
