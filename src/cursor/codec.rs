//! Encoding and decoding of cursor tokens

use crate::error::{Error, Result};
use crate::record::Record;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::{DecodeError, Engine as _};
use bson::{Bson, Document};

/// Encode cursor data as a token
pub fn encode_cursor(data: &Document) -> Result<String> {
    let mut bytes = Vec::new();
    data.to_writer(&mut bytes).map_err(|e| Error::Encode {
        data: data.to_string(),
        message: e.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decode a token back into cursor data
pub fn decode_cursor(token: &str) -> Result<Document> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| base64_error(&e, token))?;
    let mut reader = bytes.as_slice();
    Document::from_reader(&mut reader).map_err(|e| Error::cursor_document(e.to_string()))
}

/// Decode a token and return its values in encoded order
///
/// A tie-broken cursor carries exactly two values (sort value, identifier);
/// otherwise exactly one. Anything else means the token was issued for a
/// different sort configuration.
pub fn parse_cursor_values(token: &str, expect_tiebreak: bool) -> Result<Vec<Bson>> {
    let data = decode_cursor(token)?;

    match (expect_tiebreak, data.len()) {
        (true, 2) | (false, 1) => {}
        (true, _) => return Err(Error::malformed_cursor("expecting a cursor with two elements")),
        (false, _) => {
            return Err(Error::malformed_cursor(
                "expecting a cursor with a single element",
            ))
        }
    }

    tracing::trace!(fields = data.len(), "decoded cursor");
    Ok(data.into_iter().map(|(_, value)| value).collect())
}

/// Build the cursor token pointing at `record`
pub fn generate_cursor<R: Record>(
    record: &R,
    sort_field: &str,
    id_field: &str,
    tiebreak: bool,
) -> Result<String> {
    let sort_value = record
        .value_of(sort_field)
        .ok_or_else(|| Error::missing_field(sort_field))?;

    let mut data = Document::new();
    data.insert(sort_field, sort_value);

    if tiebreak {
        let id_value = record
            .value_of(id_field)
            .ok_or_else(|| Error::missing_field(id_field))?;
        data.insert(id_field, id_value);
    }

    encode_cursor(&data)
}

/// Report where the token stopped being valid base64
fn base64_error(err: &DecodeError, token: &str) -> Error {
    let offset = match *err {
        DecodeError::InvalidByte(offset, _) | DecodeError::InvalidLastSymbol(offset, _) => offset,
        DecodeError::InvalidLength(len) => len,
        DecodeError::InvalidPadding => token.len(),
    };
    Error::Base64 { offset }
}
