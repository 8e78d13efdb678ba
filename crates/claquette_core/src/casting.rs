//! Casting suggestions.

use crate::CharacterId;
use serde::{Deserialize, Serialize};

/// Upper bound on suggestions kept per character.
pub const MAX_SUGGESTIONS_PER_CHARACTER: usize = 3;

/// One actor suggested for one character.
///
/// Priority 1 is the strongest match; a character holds priorities
/// `{1}`, `{1, 2}` or `{1, 2, 3}`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CastingSuggestion {
    /// The character being cast
    character_id: CharacterId,
    /// Canonical name of that character
    character_name: String,
    /// Suggested actor
    actor_name: String,
    /// Actor's age
    actor_age: u32,
    /// Match quality in `[0.0, 1.0]`
    match_score: f64,
    /// Why this actor fits
    reasoning: String,
    /// Short actor profile
    profile: String,
    /// Rank among this character's suggestions
    priority: u8,
}

impl CastingSuggestion {
    /// Creates a new builder.
    pub fn builder() -> CastingSuggestionBuilder {
        CastingSuggestionBuilder::default()
    }
}
