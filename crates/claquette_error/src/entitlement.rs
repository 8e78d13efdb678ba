//! Entitlement error types.

/// Reasons a caller may not invoke a generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EntitlementErrorKind {
    /// No active subscription and the usage counter is exhausted
    #[display("Account {} has no active subscription and no remaining usage", _0)]
    QuotaExhausted(String),
    /// Operation is reserved for subscribed accounts
    #[display("Account {} must hold an active subscription for {}", account, operation)]
    SubscriptionRequired {
        /// Account identifier
        account: String,
        /// Operation that was refused
        operation: String,
    },
}

/// Entitlement error with location tracking.
///
/// # Examples
///
/// ```
/// use claquette_error::{EntitlementError, EntitlementErrorKind};
///
/// let err = EntitlementError::new(EntitlementErrorKind::QuotaExhausted("acct-1".into()));
/// assert!(format!("{}", err).contains("no remaining usage"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Entitlement Error: {} at line {} in {}", kind, line, file)]
pub struct EntitlementError {
    /// The specific error condition
    pub kind: EntitlementErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl EntitlementError {
    /// Create a new EntitlementError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EntitlementErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
