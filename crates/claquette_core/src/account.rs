//! The caller's entitlement state.

use crate::AccountId;
use serde::{Deserialize, Serialize};

/// Subscription flag and remaining usage for the caller of a run.
///
/// # Examples
///
/// ```
/// use claquette_core::Account;
///
/// let trial = Account::new(false, 1);
/// assert!(trial.may_generate());
/// assert!(!Account::new(false, 0).may_generate());
/// assert!(Account::new(true, 0).may_generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Account {
    /// Account identifier
    id: AccountId,
    /// Active subscription
    subscribed: bool,
    /// Remaining full-run generations
    usage_remaining: u32,
}

impl Account {
    /// New account with a fresh id.
    pub fn new(subscribed: bool, usage_remaining: u32) -> Self {
        Self {
            id: AccountId::new(),
            subscribed,
            usage_remaining,
        }
    }

    /// Full-run entitlement: a subscription or positive remaining usage.
    pub fn may_generate(&self) -> bool {
        self.subscribed || self.usage_remaining > 0
    }

    /// Usage after one successful run. Never goes below zero.
    pub fn decremented(&self) -> Self {
        Self {
            usage_remaining: self.usage_remaining.saturating_sub(1),
            ..self.clone()
        }
    }
}
