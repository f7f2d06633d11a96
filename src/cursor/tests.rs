//! Tests for the cursor codec

use super::*;
use crate::error::Error;
use crate::record::{FieldDef, Record};
use bson::{doc, oid::ObjectId, Bson};
use pretty_assertions::assert_eq;

const ID_CURSOR: &str = "FgAAAAdfaWQAWt31M-gVSd52lssEAA";
const STRING_ID_CURSOR: &str = "JwAAAAJfaWQAGQAAADVhZGRmNTMzZTgxNTQ5ZGU3Njk2Y2IwNAAA";
const NAME_ID_CURSOR: &str = "KgAAAAJuYW1lAAoAAAB0ZXN0IGl0ZW0AB19pZABa3fUz6BVJ3naWywQA";
const BAD_CURSOR: &str = "XXXXXaGVsbG8=";

fn object_id() -> ObjectId {
    ObjectId::parse_str("5addf533e81549de7696cb04").unwrap()
}

struct Item {
    id: ObjectId,
    name: String,
}

impl Record for Item {
    fn schema() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[FieldDef::new("id", "_id"), FieldDef::new("name", "name")];
        FIELDS
    }

    fn field(&self, name: &str) -> Option<Bson> {
        match name {
            "id" => Some(Bson::ObjectId(self.id)),
            "name" => Some(Bson::String(self.name.clone())),
            _ => None,
        }
    }
}

// ============================================================================
// encode_cursor / decode_cursor Tests
// ============================================================================

#[test]
fn test_encode_cursor() {
    let token = encode_cursor(&doc! { "_id": "5addf533e81549de7696cb04" }).unwrap();
    assert_eq!(token, STRING_ID_CURSOR);

    let token = encode_cursor(&doc! { "_id": object_id() }).unwrap();
    assert_eq!(token, ID_CURSOR);
}

#[test]
fn test_encode_preserves_key_order() {
    let token = encode_cursor(&doc! { "name": "test item", "_id": object_id() }).unwrap();
    assert_eq!(token, NAME_ID_CURSOR);
}

#[test]
fn test_decode_cursor() {
    let data = decode_cursor(ID_CURSOR).unwrap();
    assert_eq!(data, doc! { "_id": object_id() });
}

#[test]
fn test_decode_cursor_bad_base64() {
    let err = decode_cursor(BAD_CURSOR).unwrap_err();
    assert!(matches!(err, Error::Base64 { offset: 12 }));
    assert_eq!(err.to_string(), "illegal base64 data at input byte 12");
}

#[test]
fn test_decode_cursor_bad_document() {
    // valid base64, but not a BSON document
    let err = decode_cursor("aGVsbG8").unwrap_err();
    assert!(matches!(err, Error::CursorDocument { .. }));
}

#[test]
fn test_roundtrip_mixed_values() {
    let data = doc! { "createdAt": bson::DateTime::from_millis(1_700_000_000_000), "_id": 42_i64 };
    let token = encode_cursor(&data).unwrap();
    assert!(!token.contains('='));
    assert!(!token.contains('+'));
    assert!(!token.contains('/'));
    assert_eq!(decode_cursor(&token).unwrap(), data);
}

// ============================================================================
// parse_cursor_values Tests
// ============================================================================

#[test]
fn test_parse_cursor_values_with_tiebreak() {
    let values = parse_cursor_values(NAME_ID_CURSOR, true).unwrap();
    assert_eq!(
        values,
        vec![Bson::String("test item".to_string()), Bson::ObjectId(object_id())]
    );
}

#[test]
fn test_parse_cursor_values_without_tiebreak() {
    let values = parse_cursor_values(ID_CURSOR, false).unwrap();
    assert_eq!(values, vec![Bson::ObjectId(object_id())]);
}

#[test]
fn test_parse_cursor_values_decode_error() {
    let err = parse_cursor_values(BAD_CURSOR, true).unwrap_err();
    assert!(matches!(err, Error::Base64 { offset: 12 }));
}

#[test]
fn test_parse_cursor_values_expects_two() {
    let err = parse_cursor_values(ID_CURSOR, true).unwrap_err();
    assert!(matches!(err, Error::MalformedCursor { .. }));
    assert_eq!(err.to_string(), "expecting a cursor with two elements");
}

#[test]
fn test_parse_cursor_values_expects_one() {
    let err = parse_cursor_values(NAME_ID_CURSOR, false).unwrap_err();
    assert_eq!(err.to_string(), "expecting a cursor with a single element");
}

// ============================================================================
// generate_cursor Tests
// ============================================================================

#[test]
fn test_generate_cursor_by_id() {
    let item = Item {
        id: object_id(),
        name: "test item".to_string(),
    };
    let token = generate_cursor(&item, "_id", "_id", false).unwrap();
    assert_eq!(token, ID_CURSOR);
}

#[test]
fn test_generate_cursor_by_name() {
    let item = Item {
        id: object_id(),
        name: "test item".to_string(),
    };
    let token = generate_cursor(&item, "name", "_id", true).unwrap();
    assert_eq!(token, NAME_ID_CURSOR);
}

#[test]
fn test_generate_cursor_from_document() {
    let record = doc! { "name": "test item", "_id": object_id(), "extra": true };
    let token = generate_cursor(&record, "name", "_id", true).unwrap();
    assert_eq!(token, NAME_ID_CURSOR);
}

#[test]
fn test_generate_cursor_missing_field() {
    let record = doc! { "_id": 1 };
    let err = generate_cursor(&record, "name", "_id", true).unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field } if field == "name"));

    let record = doc! { "name": "x" };
    let err = generate_cursor(&record, "name", "_id", true).unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field } if field == "_id"));
}
