//! Small pure helpers shared by the scraper and the pipeline: text
//! sanitizing, slash-path JSON lookup, chapter-id validation.

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::{errors::Error, Result};

/// Strip control characters, NFKD-normalize, and trim surrounding whitespace.
///
/// The stripped ranges are [0x00,0x20) and [0x7F,0xA0): ASCII controls plus
/// the C1 block, which the source site occasionally leaks into titles.
/// Idempotent.
pub fn sanitize_text(s: &str) -> String {
    s.chars()
        .filter(|c| !is_control_char(*c))
        .nfkd()
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_control_char(c: char) -> bool {
    matches!(u32::from(c), 0x00..=0x1F | 0x7F..=0x9F)
}

/// Resolve a slash-delimited key path (e.g. `"readableProduct/pageStructure/pages"`)
/// inside a JSON document.
///
/// A missing key anywhere along the path means the chapter page was served
/// without its reader payload, which the site does for unpurchased chapters,
/// so that case maps to `Error::ChapterUnavailable` rather than a parse
/// error. A path that resolves to an empty/zero value yields `default`.
pub fn lookup_path(root: &Value, path: &str, default: Value) -> Result<Value> {
    let mut current = root;
    for key in path.split('/') {
        current = current.get(key).ok_or(Error::ChapterUnavailable)?;
    }

    if is_falsy(current) {
        Ok(default)
    } else {
        Ok(current.clone())
    }
}

fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Chapter ids on the source site are exactly 20 decimal digits.
pub fn is_chapter_id(s: &str) -> bool {
    s.len() == 20 && s.bytes().all(|b| b.is_ascii_digit())
}
