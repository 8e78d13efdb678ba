//! The aggregate returned by a full generation run.

use crate::{CastingSuggestion, CharacterRecord, Project, ScreenplayContent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully populated screenplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Screenplay {
    /// The project the run was for
    project: Project,
    /// Canonical characters
    characters: Vec<CharacterRecord>,
    /// Film or episodes
    content: ScreenplayContent,
    /// Casting suggestions for the canonical characters
    casting: Vec<CastingSuggestion>,
    /// When the run committed
    generated_at: DateTime<Utc>,
}

impl Screenplay {
    /// Assemble the aggregate, stamped with the current time.
    pub fn new(
        project: Project,
        characters: Vec<CharacterRecord>,
        content: ScreenplayContent,
        casting: Vec<CastingSuggestion>,
    ) -> Self {
        Self {
            project,
            characters,
            content,
            casting,
            generated_at: Utc::now(),
        }
    }
}
