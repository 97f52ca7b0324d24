//! Bulk rewriting of image references exported from the storefront catalog.
//!
//! Input is a JSON array of references as they come out of product records:
//! mostly URL strings, occasionally `null` or a stray number. Every entry
//! yields one [`RewriteRecord`]; entries that cannot be rewritten keep their
//! original value in `url` and get no `srcset`.
//!
//! ```text
//! ["https://res.cloudinary.com/demo/upload/a.jpg", null]
//!   →
//! [{"src": "...upload/a.jpg", "url": "...upload/w_400,q_auto,f_webp/a.jpg", "srcset": "... 1x, ... 2x"},
//!  {"src": null, "url": null, "srcset": null}]
//! ```

use crate::delivery::UrlBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of image references, got {0}")]
    NotAnArray(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteRecord {
    pub src: Value,
    pub url: Value,
    pub srcset: Option<String>,
}

/// Rewrite one reference with the builder's defaults.
pub fn rewrite_reference(builder: &UrlBuilder, src: &Value) -> RewriteRecord {
    match src.as_str() {
        Some(s) => RewriteRecord {
            src: src.clone(),
            url: Value::String(builder.url(s).into_owned()),
            srcset: builder.srcset(s, builder.defaults.width),
        },
        None => RewriteRecord {
            src: src.clone(),
            url: src.clone(),
            srcset: None,
        },
    }
}

pub fn rewrite_all(builder: &UrlBuilder, refs: &[Value]) -> Vec<RewriteRecord> {
    refs.iter().map(|r| rewrite_reference(builder, r)).collect()
}

/// Read a JSON array from `reader` and rewrite every entry.
pub fn rewrite_reader(
    builder: &UrlBuilder,
    mut reader: impl Read,
) -> Result<Vec<RewriteRecord>, CatalogError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let value: Value = serde_json::from_str(&content)?;
    match value {
        Value::Array(refs) => Ok(rewrite_all(builder, &refs)),
        other => Err(CatalogError::NotAnArray(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
