//! Tests for the paginator

use super::*;
use crate::config::PagerConfig;
use crate::error::{Error, Result};
use crate::query::{build_range_filter, sort_keys, ComparisonOp};
use crate::record::{FieldDef, Record};
use crate::store::{Counter, FetchQuery, Fetcher};
use crate::types::{Collation, CursorKind, Filter, SortDirection};
use async_trait::async_trait;
use bson::{doc, Bson};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: i32,
    name: String,
}

impl Record for Item {
    fn schema() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[FieldDef::new("id", "_id"), FieldDef::new("name", "name")];
        FIELDS
    }

    fn field(&self, name: &str) -> Option<Bson> {
        match name {
            "id" => Some(Bson::Int32(self.id)),
            "name" => Some(Bson::String(self.name.clone())),
            _ => None,
        }
    }
}

fn item(id: i32) -> Item {
    Item {
        id,
        name: format!("item {id}"),
    }
}

/// Collaborator returning canned results and recording what it was asked
#[derive(Default)]
struct Stub {
    records: Vec<Item>,
    total: u64,
    count_error: bool,
    fetch_error: bool,
    queries: Mutex<Vec<FetchQuery>>,
    counted: Mutex<Vec<Vec<Filter>>>,
}

impl Stub {
    fn returning(records: Vec<Item>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    fn last_query(&self) -> FetchQuery {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Counter for Stub {
    async fn count(&self, _collection: &str, filters: &[Filter]) -> Result<u64> {
        self.counted.lock().unwrap().push(filters.to_vec());
        if self.count_error {
            return Err(Error::store("count failed"));
        }
        Ok(self.total)
    }
}

#[async_trait]
impl Fetcher<Item> for Stub {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<Item>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fetch_error {
            return Err(Error::store("fetch failed"));
        }
        Ok(self.records.clone())
    }
}

fn paginator(stub: &Arc<Stub>) -> Paginator<Item> {
    Paginator::new(stub.clone())
}

fn by_name(limit: usize) -> PageRequest {
    PageRequest::new("items", limit)
        .filter(doc! { "kind": "widget" })
        .sort_by("name", SortDirection::Descending)
}

// {"name": "item 2", "_id": 2}
const ITEM_2_TOKEN: &str = "HwAAAAJuYW1lAAcAAABpdGVtIDIAEF9pZAACAAAAAA";
// {"_id": 2}
const ID_2_TOKEN: &str = "DgAAABBfaWQAAgAAAAA";
// {"name": "b", "_id": 2}
const B_2_TOKEN: &str = "GgAAAAJuYW1lAAIAAABiABBfaWQAAgAAAAA";

// ============================================================================
// First Page Tests
// ============================================================================

#[tokio::test]
async fn test_first_page_with_more_records() {
    let stub = Arc::new(Stub::returning(vec![item(1), item(2), item(3)]));
    let page = paginator(&stub).paginate(&by_name(2)).await.unwrap();

    assert_eq!(page.records, vec![item(1), item(2)]);
    assert!(page.has_next);
    assert!(!page.has_previous);
    assert_eq!(page.next.as_deref(), Some(ITEM_2_TOKEN));
    assert_eq!(page.previous, None);
    assert_eq!(page.total, None);

    let query = stub.last_query();
    assert_eq!(query.collection, "items");
    assert_eq!(query.limit, 3);
    assert_eq!(query.filters, vec![doc! { "kind": "widget" }]);
    assert_eq!(query.sort, sort_keys("name", "_id", SortDirection::Descending));
    assert!(stub.counted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_first_page_is_last_page() {
    let stub = Arc::new(Stub::returning(vec![item(1), item(2)]));
    let page = paginator(&stub).paginate(&by_name(2)).await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(!page.has_next);
    assert!(!page.has_previous);
    assert_eq!(page.next, None);
    assert_eq!(page.previous, None);
}

#[tokio::test]
async fn test_empty_page_has_no_tokens() {
    let stub = Arc::new(Stub::returning(vec![]));
    let page = paginator(&stub)
        .paginate(&by_name(2).after(B_2_TOKEN))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(!page.has_next);
    assert!(!page.has_previous);
    assert_eq!(page.token(CursorKind::Previous), None);
}

#[tokio::test]
async fn test_default_sort_field_is_identifier() {
    let stub = Arc::new(Stub::returning(vec![item(1), item(2), item(3)]));
    let page = paginator(&stub)
        .paginate(&PageRequest::new("items", 2))
        .await
        .unwrap();

    assert_eq!(page.next.as_deref(), Some(ID_2_TOKEN));
    assert_eq!(
        stub.last_query().sort,
        sort_keys("_id", "_id", SortDirection::Ascending)
    );
}

#[tokio::test]
async fn test_empty_cursor_tokens_are_ignored() {
    let stub = Arc::new(Stub::returning(vec![item(1)]));
    let request = by_name(2).after("").before("");
    let page = paginator(&stub).paginate(&request).await.unwrap();

    assert!(!page.has_previous);
    assert_eq!(stub.last_query().filters.len(), 1);
}

// ============================================================================
// Cursor Tests
// ============================================================================

#[tokio::test]
async fn test_next_cursor_page() {
    let stub = Arc::new(Stub::returning(vec![item(1), item(0)]));
    let page = paginator(&stub)
        .paginate(&by_name(2).after(B_2_TOKEN))
        .await
        .unwrap();

    assert_eq!(page.records, vec![item(1), item(0)]);
    assert!(page.has_previous);
    assert!(!page.has_next);
    assert_eq!(page.next, None);
    assert!(page.previous.is_some());

    let expected_range = build_range_filter(
        true,
        "name",
        "_id",
        ComparisonOp::LessThan,
        &[Bson::from("b"), Bson::Int32(2)],
    )
    .unwrap();
    let query = stub.last_query();
    assert_eq!(query.filters, vec![doc! { "kind": "widget" }, expected_range]);
    assert_eq!(query.sort, sort_keys("name", "_id", SortDirection::Descending));
}

#[tokio::test]
async fn test_previous_cursor_page() {
    // Backward fetches arrive nearest-first
    let stub = Arc::new(Stub::returning(vec![item(3), item(2), item(1)]));
    let page = paginator(&stub)
        .paginate(&by_name(2).before(B_2_TOKEN))
        .await
        .unwrap();

    assert_eq!(page.records, vec![item(2), item(3)]);
    assert!(page.has_previous);
    assert!(page.has_next);
    assert_eq!(page.previous.as_deref(), Some(ITEM_2_TOKEN));
    assert!(page.next.is_some());

    let expected_range = build_range_filter(
        true,
        "name",
        "_id",
        ComparisonOp::GreaterThan,
        &[Bson::from("b"), Bson::Int32(2)],
    )
    .unwrap();
    let query = stub.last_query();
    assert_eq!(query.limit, 3);
    assert_eq!(query.filters[1], expected_range);
    assert_eq!(query.sort, sort_keys("name", "_id", SortDirection::Ascending));
}

#[tokio::test]
async fn test_previous_cursor_at_start() {
    let stub = Arc::new(Stub::returning(vec![item(2)]));
    let page = paginator(&stub)
        .paginate(&by_name(2).before(B_2_TOKEN))
        .await
        .unwrap();

    assert!(!page.has_previous);
    assert!(page.has_next);
    assert_eq!(page.previous, None);
    assert_eq!(page.next.as_deref(), Some(ITEM_2_TOKEN));
}

#[tokio::test]
async fn test_bad_next_cursor() {
    let stub = Arc::new(Stub::returning(vec![item(1)]));
    let err = paginator(&stub)
        .paginate(&by_name(2).after("XXXXXaGVsbG8="))
        .await
        .unwrap_err();

    assert!(err.is_cursor_error());
    assert_eq!(
        err.to_string(),
        "next cursor parse failed: illegal base64 data at input byte 12"
    );
    assert!(stub.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_previous_cursor() {
    let stub = Arc::new(Stub::returning(vec![item(1)]));
    let err = paginator(&stub)
        .paginate(&by_name(2).before("XXXXXaGVsbG8="))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "previous cursor parse failed: illegal base64 data at input byte 12"
    );
}

#[tokio::test]
async fn test_cursor_arity_mismatch() {
    // Token carries only the identifier, but the sort field needs a tie-break
    let stub = Arc::new(Stub::returning(vec![item(1)]));
    let err = paginator(&stub)
        .paginate(&by_name(2).after(ID_2_TOKEN))
        .await
        .unwrap_err();

    assert!(err.is_cursor_error());
    assert_eq!(
        err.to_string(),
        "next cursor parse failed: expecting a cursor with two elements"
    );
}

#[tokio::test]
async fn test_record_missing_sort_field() {
    let stub = Arc::new(Stub::returning(vec![item(1), item(2), item(3)]));
    let request = PageRequest::new("items", 2).sort_by("rank", SortDirection::Ascending);
    let err = paginator(&stub).paginate(&request).await.unwrap_err();

    assert!(matches!(err, Error::MissingField { ref field } if field == "rank"));
}

// ============================================================================
// Count Tests
// ============================================================================

#[tokio::test]
async fn test_count_total_uses_base_filter() {
    let stub = Arc::new(Stub {
        records: vec![item(1)],
        total: 42,
        ..Default::default()
    });
    let page = paginator(&stub)
        .paginate(&by_name(2).after(B_2_TOKEN).count_total())
        .await
        .unwrap();

    assert_eq!(page.total, Some(42));
    assert_eq!(
        *stub.counted.lock().unwrap(),
        vec![vec![doc! { "kind": "widget" }]]
    );
}

#[tokio::test]
async fn test_count_error() {
    let stub = Arc::new(Stub {
        count_error: true,
        ..Default::default()
    });
    let err = paginator(&stub)
        .paginate(&by_name(2).count_total())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Store error: count failed");
    assert!(stub.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_error() {
    let stub = Arc::new(Stub {
        fetch_error: true,
        ..Default::default()
    });
    let err = paginator(&stub).paginate(&by_name(2)).await.unwrap_err();

    assert_eq!(err.to_string(), "Store error: fetch failed");
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_requests() {
    let stub = Arc::new(Stub::default());
    let pager = paginator(&stub);

    let cases = [
        (PageRequest::new("items", 0), "a limit of at least 1 is required"),
        (PageRequest::new("", 2), "collection name can't be empty"),
        (
            PageRequest::new("items", 2).after(B_2_TOKEN).before(B_2_TOKEN),
            "next and previous cursors can't both be set",
        ),
    ];

    for (request, message) in cases {
        let err = pager.paginate(&request).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(err.to_string(), message);
    }
    assert!(stub.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_count_without_counter() {
    let stub = Arc::new(Stub::returning(vec![item(1)]));
    let pager = Paginator::<Item>::builder()
        .fetcher(stub.clone())
        .build()
        .unwrap();

    let err = pager
        .paginate(&PageRequest::new("items", 2).count_total())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let page = pager.paginate(&PageRequest::new("items", 2)).await.unwrap();
    assert_eq!(page.total, None);
}

#[test]
fn test_builder_requires_fetcher() {
    let err = Paginator::<Item>::builder().build().unwrap_err();
    assert_eq!(err.to_string(), "a fetch collaborator is required");
}

#[test]
fn test_builder_validates_config() {
    let stub = Arc::new(Stub::default());
    let err = Paginator::<Item>::builder()
        .fetcher(stub)
        .config(PagerConfig::new().with_id_field(""))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

// ============================================================================
// Config Tests
// ============================================================================

#[tokio::test]
async fn test_page_size_clamped_to_maximum() {
    let stub = Arc::new(Stub::returning(vec![item(1), item(2), item(3)]));
    let pager = paginator(&stub).with_config(PagerConfig::new().with_max_page_size(2));

    let page = pager.paginate(&by_name(10)).await.unwrap();
    assert_eq!(stub.last_query().limit, 3);
    assert_eq!(page.len(), 2);
    assert!(page.has_next);
}

#[tokio::test]
async fn test_largest_page_size_does_not_overflow() {
    let stub = Arc::new(Stub::returning(vec![item(1), item(2), item(3)]));
    let page = paginator(&stub)
        .paginate(&PageRequest::new("items", usize::MAX))
        .await
        .unwrap();

    assert_eq!(stub.last_query().limit, usize::MAX);
    assert_eq!(page.len(), 3);
    assert!(!page.has_next);
    assert!(!page.has_previous);
}

#[tokio::test]
async fn test_collation_falls_back_to_config() {
    let stub = Arc::new(Stub::default());
    let configured = Collation::new("en").with_strength(2);
    let pager = paginator(&stub).with_config(PagerConfig::new().with_collation(configured.clone()));

    pager.paginate(&by_name(2)).await.unwrap();
    assert_eq!(stub.last_query().collation, Some(configured));

    let requested = Collation::new("fr");
    pager
        .paginate(&by_name(2).collation(requested.clone()))
        .await
        .unwrap();
    assert_eq!(stub.last_query().collation, Some(requested));
}

#[tokio::test]
async fn test_custom_id_field() {
    let stub = Arc::new(Stub::default());
    let pager = paginator(&stub).with_config(PagerConfig::new().with_id_field("id"));

    pager.paginate(&by_name(2)).await.unwrap();
    assert_eq!(stub.last_query().sort, sort_keys("name", "id", SortDirection::Descending));
}

#[test]
fn test_paginator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Paginator<Item>>();
}

// ============================================================================
// PageRequest Tests
// ============================================================================

#[test]
fn test_page_request_from_json() {
    let request: PageRequest = serde_json::from_str(
        r#"{
            "collection": "items",
            "limit": 2,
            "filter": { "kind": "widget" },
            "sortField": "name",
            "sort": "descending",
            "next": "GgAAAAJuYW1lAAIAAABiABBfaWQAAgAAAAA",
            "countTotal": true
        }"#,
    )
    .unwrap();

    assert_eq!(request, by_name(2).after(B_2_TOKEN).count_total());
    assert_eq!(request.cursor(), (Some(B_2_TOKEN), None));
}

#[test]
fn test_page_request_defaults() {
    let request: PageRequest = serde_json::from_str(r#"{"collection": "items", "limit": 5}"#).unwrap();
    assert_eq!(request, PageRequest::new("items", 5));
    assert_eq!(request.sort, SortDirection::Ascending);
    assert_eq!(request.cursor(), (None, None));
}
