//! Upstream model provider error types.

/// Transport, authentication and rate-limit failures from the model provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Failed to build the HTTP client
    #[display("Failed to create model client: {}", _0)]
    ClientCreation(String),
    /// Request never produced an HTTP response (connect, timeout, TLS)
    #[display("Model request failed: {}", _0)]
    Transport(String),
    /// Provider rejected the credentials
    #[display("Model provider rejected credentials ({}): {}", status_code, message)]
    Unauthorized {
        /// HTTP status code
        status_code: u16,
        /// Provider message
        message: String,
    },
    /// Provider throttled the request
    #[display("Model provider rate limit exceeded: {}", _0)]
    RateLimited(String),
    /// Any other non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Provider returned an `error` object in a 2xx body
    #[display("Model provider error: {}", _0)]
    Api(String),
    /// Response envelope did not have the expected shape
    #[display("Unexpected response envelope: {}", _0)]
    Envelope(String),
}

impl ModelErrorKind {
    /// Classify a non-success HTTP status returned by the provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use claquette_error::ModelErrorKind;
    ///
    /// let kind = ModelErrorKind::from_status(429, "slow down");
    /// assert!(matches!(kind, ModelErrorKind::RateLimited(_)));
    /// ```
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => ModelErrorKind::Unauthorized {
                status_code,
                message,
            },
            429 => ModelErrorKind::RateLimited(message),
            _ => ModelErrorKind::HttpError {
                status_code,
                message,
            },
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ModelErrorKind::Unauthorized { status_code, .. }
            | ModelErrorKind::HttpError { status_code, .. } => Some(*status_code),
            ModelErrorKind::RateLimited(_) => Some(429),
            _ => None,
        }
    }
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use claquette_error::{ModelError, ModelErrorKind};
///
/// let err = ModelError::new(ModelErrorKind::MissingApiKey("OPENAI_API_KEY".into()));
/// assert!(format!("{}", err).contains("OPENAI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The kind of error that occurred
    pub kind: ModelErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
