//! Malformed model response errors.

/// Number of trailing characters kept for diagnostics.
const TAIL_CHARS: usize = 100;

/// Why a model response could not be turned into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MalformedResponseKind {
    /// The model returned no content at all
    #[display("model returned empty content")]
    Empty,
    /// No `{ ... }` span was present in the text
    #[display("no JSON object found in response")]
    NoJsonObject,
    /// Braces or brackets do not close, the response was cut off
    #[display("response appears to be truncated")]
    Truncated,
    /// The text is JSON-shaped but still fails to parse
    #[display("could not parse response as JSON: {}", _0)]
    Unparsable(String),
    /// Parsed, but the section the stage needs is absent or empty
    #[display("response has no usable '{}' section", _0)]
    MissingSection(String),
}

/// A model response that stayed unparsable after sanitization.
///
/// Carries the response length and its tail so truncation is visible in logs.
///
/// # Examples
///
/// ```
/// use claquette_error::{MalformedResponseError, MalformedResponseKind};
///
/// let err = MalformedResponseError::new(MalformedResponseKind::Truncated, "{\"characters\": [");
/// assert_eq!(err.length, 16);
/// assert!(err.tail.ends_with('['));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Malformed Response: {} (length: {}, tail: {:?}) at line {} in {}",
    kind,
    length,
    tail,
    line,
    file
)]
pub struct MalformedResponseError {
    /// The specific condition
    pub kind: MalformedResponseKind,
    /// Length in bytes of the offending text
    pub length: usize,
    /// Last characters of the offending text
    pub tail: String,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl MalformedResponseError {
    /// Create a new error, recording diagnostics about `text`.
    #[track_caller]
    pub fn new(kind: MalformedResponseKind, text: &str) -> Self {
        let location = std::panic::Location::caller();
        let char_count = text.chars().count();
        let tail = text
            .chars()
            .skip(char_count.saturating_sub(TAIL_CHARS))
            .collect();
        Self {
            kind,
            length: text.len(),
            tail,
            line: location.line(),
            file: location.file(),
        }
    }
}
