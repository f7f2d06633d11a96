//! Cursor token codec
//!
//! A cursor token is a BSON document of one or two sort-key values, encoded
//! as URL-safe base64 without padding. Keys are written in the order
//! `{sort field, identifier}` and read back positionally.
//!
//! ```
//! use keyset_paginate::cursor::{encode_cursor, parse_cursor_values};
//! use bson::{doc, Bson};
//!
//! let token = encode_cursor(&doc! { "name": "b", "_id": 2 }).unwrap();
//! let values = parse_cursor_values(&token, true).unwrap();
//! assert_eq!(values, vec![Bson::String("b".into()), Bson::Int32(2)]);
//! ```

mod codec;

pub use codec::{decode_cursor, encode_cursor, generate_cursor, parse_cursor_values};

#[cfg(test)]
mod tests;
