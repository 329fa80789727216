//! Text encodings for columns that hold structured values.
//!
//! Lists (`what_you_will_learn`, quiz options) are stored joined by a
//! backtick. Rich-text blobs (`description`, `bio`) are stored as serialized
//! JSON objects.

use serde_json::Value;

pub const LIST_DELIMITER: char = '`';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("list items must not be empty")]
    EmptyItem,
    #[error("list items must not contain a backtick")]
    DelimiterInItem,
    #[error("expected a JSON object")]
    NotAnObject,
}

/// Join `items` with the list delimiter.
///
/// Empty items and items containing the delimiter cannot be decoded back
/// unchanged and are rejected.
pub fn encode_list<S: AsRef<str>>(items: &[S]) -> Result<String, CodecError> {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        let item = item.as_ref();
        if item.is_empty() {
            return Err(CodecError::EmptyItem);
        }
        if item.contains(LIST_DELIMITER) {
            return Err(CodecError::DelimiterInItem);
        }
        if index > 0 {
            out.push(LIST_DELIMITER);
        }
        out.push_str(item);
    }
    Ok(out)
}

/// Split a stored list. The empty string is the empty list.
pub fn decode_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(LIST_DELIMITER).map(str::to_owned).collect()
}

pub fn encode_json_object(value: &Value) -> Result<String, CodecError> {
    if !value.is_object() {
        return Err(CodecError::NotAnObject);
    }
    Ok(value.to_string())
}

/// Decode a stored JSON blob. Rows written before validation existed may
/// hold plain text; those come back as a JSON string.
pub fn decode_json_text(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}
