//! Chat roles.

use serde::{Deserialize, Serialize};

/// Sender of a chat message.
///
/// # Examples
///
/// ```
/// use claquette_core::Role;
///
/// assert_eq!(Role::System.as_wire(), "system");
/// assert_eq!(format!("{}", Role::User), "User");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// Fixed directives
    System,
    /// The composed prompt
    User,
    /// Model output
    Assistant,
}

impl Role {
    /// Lowercase role name used on the wire.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
