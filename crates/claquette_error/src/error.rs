//! Top-level error wrapper types.

use crate::{
    ConfigError, EntitlementError, ImageGenerationError, InputError, MalformedResponseError,
    ModelError, StorageError,
};

/// Every error that aborts a pipeline invocation.
///
/// # Examples
///
/// ```
/// use claquette_error::{ClaquetteError, InputError};
///
/// let input_err = InputError::new("Episode count must be positive");
/// let err: ClaquetteError = input_err.into();
/// assert!(format!("{}", err).contains("Input Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ClaquetteErrorKind {
    /// Missing or invalid brief or project state
    #[from(InputError)]
    Input(InputError),
    /// Caller lacks generation entitlement
    #[from(EntitlementError)]
    Entitlement(EntitlementError),
    /// Upstream transport, auth or rate-limit failure
    #[from(ModelError)]
    Model(ModelError),
    /// Model output unparsable after sanitization
    #[from(MalformedResponseError)]
    MalformedResponse(MalformedResponseError),
    /// Image endpoint failure
    #[from(ImageGenerationError)]
    ImageGeneration(ImageGenerationError),
    /// Persistence collaborator failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Claquette error with kind discrimination.
///
/// # Examples
///
/// ```
/// use claquette_error::{ClaquetteErrorKind, ClaquetteResult, ConfigError};
///
/// fn might_fail() -> ClaquetteResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), ClaquetteErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Claquette Error: {}", _0)]
pub struct ClaquetteError(Box<ClaquetteErrorKind>);

impl ClaquetteError {
    /// Create a new error from a kind.
    pub fn new(kind: ClaquetteErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ClaquetteErrorKind {
        &self.0
    }

    /// Short stable label for the failure category, used in log fields.
    pub fn category(&self) -> &'static str {
        match self.kind() {
            ClaquetteErrorKind::Input(_) => "input",
            ClaquetteErrorKind::Entitlement(_) => "entitlement",
            ClaquetteErrorKind::Model(_) => "model",
            ClaquetteErrorKind::MalformedResponse(_) => "malformed_response",
            ClaquetteErrorKind::ImageGeneration(_) => "image_generation",
            ClaquetteErrorKind::Storage(_) => "storage",
            ClaquetteErrorKind::Config(_) => "config",
        }
    }
}

impl<T> From<T> for ClaquetteError
where
    T: Into<ClaquetteErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Claquette operations.
pub type ClaquetteResult<T> = std::result::Result<T, ClaquetteError>;
