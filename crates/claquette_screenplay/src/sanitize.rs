//! Repairs raw model output into a parseable JSON object.
//!
//! Models wrap JSON in markdown fences, surround it with commentary, emit
//! `assumptions` as an object instead of an array and leave trailing commas.
//! [`sanitize`] only edits text that fails to parse, and only hands back text
//! that parses as a JSON object.

use claquette_error::{MalformedResponseError, MalformedResponseKind};
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```[a-z]*").expect("Valid code fence regex"));

static OBJECT_ASSUMPTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""assumptions"\s*:\s*\{[^}]*\}"#).expect("Valid assumptions regex")
});

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("Valid trailing comma regex"));

/// Remove every markdown code fence marker (with or without a language tag).
///
/// # Examples
///
/// ```
/// use claquette_screenplay::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// ```
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Slice from the first `{` to the last `}`, dropping surrounding prose.
///
/// Returns `None` when there is no `{`, or no `}` after it.
///
/// # Examples
///
/// ```
/// use claquette_screenplay::slice_object;
///
/// assert_eq!(slice_object("Sure! {\"a\": {\"b\": 2}} Enjoy."), Some("{\"a\": {\"b\": 2}}"));
/// assert_eq!(slice_object("no json here"), None);
/// ```
pub fn slice_object(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    if last <= first {
        return None;
    }
    Some(&text[first..=last])
}

/// Rewrite `"assumptions": { ... }` into `"assumptions": []`.
///
/// Only flat objects are rewritten; sibling fields are left untouched.
pub fn rewrite_object_assumptions(text: &str) -> Cow<'_, str> {
    OBJECT_ASSUMPTIONS.replace_all(text, r#""assumptions": []"#)
}

/// Drop commas that directly precede a closing brace or bracket.
///
/// # Examples
///
/// ```
/// use claquette_screenplay::strip_trailing_commas;
///
/// assert_eq!(strip_trailing_commas("{\"a\": [1, 2,], }"), "{\"a\": [1, 2]}");
/// ```
pub fn strip_trailing_commas(text: &str) -> Cow<'_, str> {
    TRAILING_COMMA.replace_all(text, "$1")
}

/// Whether every `{`/`[` outside string literals is closed and no string is left open.
pub fn is_balanced(text: &str) -> bool {
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for ch in text.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => depth += 1,
            '}' | ']' if !in_string => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0 && !in_string
}

/// Turn raw model text into a JSON object string that parses.
///
/// The sliced object is parsed as-is first. Text repairs (object-valued
/// `assumptions`, trailing commas) only run when that parse fails, so valid
/// JSON is never edited as text. Any object-valued `assumptions` left in the
/// parsed tree is replaced with `[]` and the document re-serialized.
///
/// # Errors
///
/// Returns [`MalformedResponseError`] when the text is empty, holds no
/// object, is cut off, or still fails to parse after repair. The error
/// records the length and tail of `raw`.
///
/// # Examples
///
/// ```
/// use claquette_screenplay::sanitize;
///
/// let raw = "Here you go:\n```json\n{\"assumptions\": {\"a\": \"b\"}, \"characters\": [1, 2,],}\n```\nThanks!";
/// let json = sanitize(raw).unwrap();
/// let value: serde_json::Value = serde_json::from_str(&json).unwrap();
/// assert_eq!(value["assumptions"], serde_json::json!([]));
/// assert_eq!(value["characters"], serde_json::json!([1, 2]));
/// ```
pub fn sanitize(raw: &str) -> Result<String, MalformedResponseError> {
    if raw.trim().is_empty() {
        tracing::error!("Model returned empty content");
        return Err(MalformedResponseError::new(
            MalformedResponseKind::Empty,
            raw,
        ));
    }

    let unfenced = strip_code_fences(raw);
    let Some(object) = slice_object(&unfenced) else {
        let kind = if unfenced.contains('{') {
            MalformedResponseKind::Truncated
        } else {
            MalformedResponseKind::NoJsonObject
        };
        let err = MalformedResponseError::new(kind, raw);
        tracing::error!(length = err.length, tail = %err.tail, "No JSON object in model response");
        return Err(err);
    };

    let (text, mut value) = match serde_json::from_str::<Value>(object) {
        Ok(value) => (object.to_string(), value),
        Err(first) => {
            tracing::debug!(error = %first, "Response is not valid JSON, applying text repairs");
            repair(object, raw)?
        }
    };

    if clear_object_assumptions(&mut value) {
        return serde_json::to_string(&value).map_err(|e| {
            MalformedResponseError::new(MalformedResponseKind::Unparsable(e.to_string()), raw)
        });
    }
    Ok(text)
}

fn repair(object: &str, raw: &str) -> Result<(String, Value), MalformedResponseError> {
    let commas_only = strip_trailing_commas(object).into_owned();
    if let Ok(value) = serde_json::from_str::<Value>(&commas_only) {
        return Ok((commas_only, value));
    }

    let repaired = strip_trailing_commas(&rewrite_object_assumptions(object)).into_owned();
    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => Ok((repaired, value)),
        Err(e) => {
            let kind = if is_balanced(&repaired) {
                MalformedResponseKind::Unparsable(e.to_string())
            } else {
                MalformedResponseKind::Truncated
            };
            let err = MalformedResponseError::new(kind, raw);
            tracing::error!(
                error = %e,
                length = err.length,
                tail = %err.tail,
                "Model response still unparsable after repair"
            );
            Err(err)
        }
    }
}

/// Replace every object-valued `assumptions` in the tree with `[]`.
/// Returns whether anything changed.
fn clear_object_assumptions(value: &mut Value) -> bool {
    match value {
        Value::Object(map) => {
            let mut changed = false;
            for (key, child) in map.iter_mut() {
                if key == "assumptions" && child.is_object() {
                    *child = Value::Array(Vec::new());
                    changed = true;
                } else {
                    changed |= clear_object_assumptions(child);
                }
            }
            changed
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |changed, item| clear_object_assumptions(item) || changed),
        _ => false,
    }
}
