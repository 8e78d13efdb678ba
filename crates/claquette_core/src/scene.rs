//! Scene records shared by films and episodes.

use crate::CharacterId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One scene. Numbers are assigned by extraction order, starting at 1.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct SceneRecord {
    /// 1-based position within the parent episode or film
    number: u32,
    /// Slug line / setting
    #[builder(default)]
    setting: String,
    /// Action description
    #[builder(default)]
    action: String,
    /// Formatted dialogue, one `speaker: line` per line
    #[builder(default)]
    dialogue: String,
    /// Sound, mood, purpose and turning point notes
    #[builder(default)]
    technical_notes: String,
    /// Characters resolved from the dialogue
    #[builder(default)]
    characters: BTreeSet<CharacterId>,
    /// Raw speaker names in order of first appearance
    #[builder(default)]
    speakers: Vec<String>,
}

impl SceneRecord {
    /// Creates a new builder.
    pub fn builder() -> SceneRecordBuilder {
        SceneRecordBuilder::default()
    }
}
