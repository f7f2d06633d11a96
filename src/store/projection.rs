//! Field projection for fetched documents

use super::matcher::is_truthy;
use crate::error::{Error, Result};
use crate::types::ID_FIELD;
use bson::Document;

/// Keep or drop top-level fields of `document` per `projection`
///
/// `{f: 1}` keeps only the listed fields, `{f: 0}` drops them. The
/// identifier is kept unless excluded explicitly.
pub fn project(document: Document, projection: &Document) -> Result<Document> {
    let mut include_id = true;
    let mut inclusion = None;

    for (field, spec) in projection {
        let include = is_truthy(spec);
        if field == ID_FIELD {
            include_id = include;
            continue;
        }
        match inclusion {
            None => inclusion = Some(include),
            Some(mode) if mode != include => {
                return Err(Error::invalid_argument(
                    "cannot mix inclusion and exclusion in a projection",
                ))
            }
            Some(_) => {}
        }
    }

    let keep = |field: &str| {
        if field == ID_FIELD {
            include_id
        } else if inclusion == Some(true) {
            projection.contains_key(field)
        } else {
            !projection.contains_key(field)
        }
    };

    Ok(document
        .into_iter()
        .filter(|(field, _)| keep(field))
        .collect())
}
