//! Turns sanitized model JSON into domain records.
//!
//! A document that does not parse as a JSON object fails the whole stage with
//! [`MalformedResponseError`] before any record is built. A single bad
//! dialogue entry, character or suggestion is logged as an
//! [`ExtractionError`](claquette_error::ExtractionError) and skipped.

mod casting;
mod characters;
mod content;
mod scenes;

pub use casting::extract_casting;
pub use characters::extract_characters;
pub use content::{extract_episode, extract_film};

use crate::json_access::JsonAccess;
use crate::sanitize::is_balanced;
use claquette_error::{MalformedResponseError, MalformedResponseKind};
use serde_json::Value;

/// Parse sanitized text into a top-level JSON object.
///
/// # Errors
///
/// Returns [`MalformedResponseError`] if the text does not parse or is not an object.
pub fn parse_document(json: &str) -> Result<Value, MalformedResponseError> {
    match serde_json::from_str::<Value>(json) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => {
            tracing::error!(length = json.len(), "Top-level JSON value is not an object");
            Err(MalformedResponseError::new(
                MalformedResponseKind::NoJsonObject,
                json,
            ))
        }
        Err(e) => {
            let kind = if is_balanced(json) {
                MalformedResponseKind::Unparsable(e.to_string())
            } else {
                MalformedResponseKind::Truncated
            };
            let err = MalformedResponseError::new(kind, json);
            tracing::error!(
                error = %e,
                length = err.length,
                tail = %err.tail,
                "JSON parsing failed"
            );
            Err(err)
        }
    }
}

/// Read `assumptions` from the top level or from a nested `project` object.
///
/// Accepts an array, an object (its values) or a single string.
///
/// # Examples
///
/// ```
/// use claquette_screenplay::extract_assumptions;
///
/// let json = r#"{"project": {"assumptions": {"era": "near future"}}}"#;
/// assert_eq!(extract_assumptions(json).unwrap(), vec!["near future"]);
/// ```
pub fn extract_assumptions(json: &str) -> Result<Vec<String>, MalformedResponseError> {
    let root = parse_document(json)?;
    let top = root.text_list("assumptions");
    if !top.is_empty() {
        return Ok(top);
    }
    Ok(root
        .field("project")
        .map(|project| project.text_list("assumptions"))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_document_is_rejected() {
        let err = parse_document("[1, 2]").unwrap_err();
        assert_eq!(err.kind, MalformedResponseKind::NoJsonObject);
    }

    #[test]
    fn test_cut_off_document_is_truncated() {
        let err = parse_document(r#"{"characters": [{"name": "Mara""#).unwrap_err();
        assert_eq!(err.kind, MalformedResponseKind::Truncated);
    }

    #[test]
    fn test_assumptions_top_level_and_string() {
        assert_eq!(
            extract_assumptions(r#"{"assumptions": "set in 2091"}"#).unwrap(),
            vec!["set in 2091"]
        );
        assert!(extract_assumptions(r#"{"characters": []}"#).unwrap().is_empty());
    }
}
