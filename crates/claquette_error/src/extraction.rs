//! Item-level extraction errors.

/// Why a single dialogue entry, scene or suggestion could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// Expected a JSON object
    #[display("expected an object for {}", _0)]
    NotAnObject(String),
    /// A required field is absent or blank
    #[display("missing required field '{}'", _0)]
    MissingField(String),
    /// A field holds a value of the wrong type
    #[display("field '{}' has an unexpected type", _0)]
    InvalidField(String),
}

/// Failure to process one item of an otherwise valid document.
///
/// The extractor logs these and skips the item; they never abort extraction.
///
/// # Examples
///
/// ```
/// use claquette_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::MissingField("line".into()));
/// assert!(format!("{}", err).contains("line"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The specific error condition
    pub kind: ExtractionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
