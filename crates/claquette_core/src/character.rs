//! Character records produced by the first stage.

use crate::CharacterId;
use serde::{Deserialize, Serialize};

/// Delimiter used when several sub-fields are folded into one text field.
pub const FIELD_DELIMITER: &str = " | ";

/// A canonical character. Frozen once the character stage commits.
///
/// # Examples
///
/// ```
/// use claquette_core::CharacterRecord;
///
/// let mara = CharacterRecord::builder()
///     .name("Mara Voss")
///     .age(34u32)
///     .role("Protagonist")
///     .traits(vec!["stubborn".to_string(), "loyal".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(mara.name(), "Mara Voss");
/// assert_eq!(mara.traits_text(), "stubborn | loyal");
/// assert_eq!(mara.dedup_key(), ("Mara Voss".to_string(), 34));
/// ```
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
pub struct CharacterRecord {
    /// Persistent identifier
    #[builder(default = "CharacterId::new()")]
    id: CharacterId,
    /// Canonical name
    name: String,
    /// Age in years
    age: u32,
    /// Narrative role
    #[builder(default)]
    role: String,
    /// Personality traits in source order
    #[builder(default)]
    traits: Vec<String>,
    /// Backstory, relationships, goal and obstacle
    #[builder(default)]
    background: String,
    /// Character arc and voice notes
    #[builder(default)]
    arc: String,
}

impl CharacterRecord {
    /// Creates a new builder.
    pub fn builder() -> CharacterRecordBuilder {
        CharacterRecordBuilder::default()
    }

    /// Traits joined with the field delimiter.
    pub fn traits_text(&self) -> String {
        self.traits.join(FIELD_DELIMITER)
    }

    /// Key under which two characters are considered duplicates.
    pub fn dedup_key(&self) -> (String, u32) {
        (self.name.clone(), self.age)
    }
}
