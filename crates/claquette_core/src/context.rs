//! The frozen context threaded through every stage after characters.

use crate::{CharacterRecord, StoryBrief};
use serde::{Deserialize, Serialize};

/// Canonical characters and brief, frozen after the character stage.
///
/// There are no mutators: later stages can only read the name list.
///
/// # Examples
///
/// ```
/// use claquette_core::{CharacterRecord, GenerationContext, StoryBrief};
///
/// let characters = vec![
///     CharacterRecord::builder().name("Ada").age(30u32).build().unwrap(),
///     CharacterRecord::builder().name("Ada").age(61u32).build().unwrap(),
///     CharacterRecord::builder().name("Rook").age(45u32).build().unwrap(),
/// ];
/// let context = GenerationContext::freeze("Vault", StoryBrief::film("A heist"), characters);
/// assert_eq!(context.names(), &["Ada".to_string(), "Rook".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerationContext {
    /// Project title
    project_title: String,
    /// The originating brief
    brief: StoryBrief,
    /// Persisted canonical characters
    characters: Vec<CharacterRecord>,
    /// Distinct canonical names in character order
    names: Vec<String>,
}

impl GenerationContext {
    /// Freeze the canonical name list from persisted characters.
    pub fn freeze(
        project_title: impl Into<String>,
        brief: StoryBrief,
        characters: Vec<CharacterRecord>,
    ) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(characters.len());
        for character in &characters {
            if !names.iter().any(|n| n == character.name()) {
                names.push(character.name().clone());
            }
        }
        Self {
            project_title: project_title.into(),
            brief,
            characters,
            names,
        }
    }

    /// First character carrying `name`.
    pub fn character_named(&self, name: &str) -> Option<&CharacterRecord> {
        self.characters.iter().find(|c| c.name() == name)
    }
}
