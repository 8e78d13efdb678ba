//! Image generation error types.

/// Failure modes of the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ImageGenerationErrorKind {
    /// Response had no `data` entries
    #[display("No image data returned")]
    NoData,
    /// First entry had neither `b64_json` nor `url`
    #[display("Image response has neither inline data nor a URL")]
    NoPayload,
    /// Downloading the returned URL failed
    #[display("Failed to download image from {}: {}", url, message)]
    Download {
        /// URL that was fetched
        url: String,
        /// Failure description
        message: String,
    },
    /// Downloaded body was empty
    #[display("Downloaded image from {} was empty", _0)]
    EmptyDownload(String),
    /// Provider returned an error or an unreadable body
    #[display("Image provider error: {}", _0)]
    Provider(String),
}

/// Image generation error with location tracking.
///
/// # Examples
///
/// ```
/// use claquette_error::{ImageGenerationError, ImageGenerationErrorKind};
///
/// let err = ImageGenerationError::new(ImageGenerationErrorKind::NoPayload);
/// assert!(format!("{}", err).contains("neither inline data"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Generation Error: {} at line {} in {}", kind, line, file)]
pub struct ImageGenerationError {
    /// The kind of error that occurred
    pub kind: ImageGenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageGenerationError {
    /// Create a new ImageGenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageGenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
