use crate::json_access::{JsonAccess, defaults};
use claquette_core::{CharacterRecord, FIELD_DELIMITER};
use claquette_error::{
    ExtractionError, ExtractionErrorKind, MalformedResponseError, MalformedResponseKind,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Extract the canonical cast from a `characters` document.
///
/// Entries are taken in source order; a later entry with the same
/// (name, age) as an earlier one is dropped, as is any entry without a name.
///
/// # Errors
///
/// Returns [`MalformedResponseError`] if the document is not a JSON object.
///
/// # Examples
///
/// ```
/// use claquette_screenplay::extract_characters;
///
/// let json = r#"{"characters": [
///     {"name": "Mara", "age": 34, "traits": ["stubborn", "loyal"], "goal": "one last job"},
///     {"name": "Mara", "age": 34},
///     {"name": "Rook", "age": "52"}
/// ]}"#;
/// let cast = extract_characters(json).unwrap();
/// assert_eq!(cast.len(), 2);
/// assert_eq!(cast[0].background(), "Goal: one last job");
/// assert_eq!(*cast[1].age(), 52);
/// ```
#[instrument(skip(json), fields(length = json.len()))]
pub fn extract_characters(json: &str) -> Result<Vec<CharacterRecord>, MalformedResponseError> {
    let root = super::parse_document(json)?;
    if root.field("characters").is_none() {
        warn!("Response has no 'characters' field");
        return Err(MalformedResponseError::new(
            MalformedResponseKind::MissingSection("characters".to_string()),
            json,
        ));
    }

    let mut seen: HashSet<(String, u32)> = HashSet::new();
    let mut characters = Vec::new();

    for (position, entry) in root.array("characters").iter().enumerate() {
        match character_from(entry) {
            Ok(character) => {
                if seen.insert(character.dedup_key()) {
                    characters.push(character);
                } else {
                    debug!(
                        name = %character.name(),
                        age = character.age(),
                        "Skipping duplicate character"
                    );
                }
            }
            Err(e) => warn!(position, error = %e, "Skipping character entry"),
        }
    }

    debug!(count = characters.len(), "Extracted characters");
    Ok(characters)
}

fn character_from(entry: &Value) -> Result<CharacterRecord, ExtractionError> {
    if !entry.is_object() {
        return Err(ExtractionError::new(ExtractionErrorKind::NotAnObject(
            "character".to_string(),
        )));
    }
    let name = entry
        .opt_text("name")
        .ok_or_else(|| ExtractionError::new(ExtractionErrorKind::MissingField("name".to_string())))?;

    let mut background = Vec::new();
    if let Some(backstory) = entry.opt_text("backstory") {
        background.push(backstory);
    }
    let relationships = entry.text_list("relationships");
    if !relationships.is_empty() {
        background.push(format!("Relationships: {}", relationships.join(", ")));
    }
    if let Some(goal) = entry.opt_text("goal") {
        background.push(format!("Goal: {}", goal));
    }
    if let Some(obstacle) = entry.opt_text("obstacle") {
        background.push(format!("Obstacle: {}", obstacle));
    }

    let mut arc = Vec::new();
    if let Some(text) = entry.opt_text("arc") {
        arc.push(text);
    }
    if let Some(voice) = entry.opt_text("voice_notes") {
        arc.push(format!("Voice notes: {}", voice));
    }

    CharacterRecord::builder()
        .name(name)
        .age(entry.count_or("age", defaults::CHARACTER_AGE))
        .role(entry.text_or("role", ""))
        .traits(entry.text_list("traits"))
        .background(background.join(FIELD_DELIMITER))
        .arc(arc.join(FIELD_DELIMITER))
        .build()
        .map_err(|e| ExtractionError::new(ExtractionErrorKind::InvalidField(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_joined_with_delimiter() {
        let json = r#"{"characters": [{
            "name": "Ines",
            "age": 29,
            "role": "Hacker",
            "traits": ["wry", "precise"],
            "backstory": "Grew up on the station",
            "relationships": ["Mara's sister", "Rook's informant"],
            "goal": "Clear her name",
            "obstacle": "Her record",
            "arc": "Learns to trust",
            "voice_notes": "Clipped"
        }]}"#;
        let cast = extract_characters(json).unwrap();
        let ines = &cast[0];
        assert_eq!(ines.role(), "Hacker");
        assert_eq!(ines.traits_text(), "wry | precise");
        assert_eq!(
            ines.background(),
            "Grew up on the station | Relationships: Mara's sister, Rook's informant | Goal: Clear her name | Obstacle: Her record"
        );
        assert_eq!(ines.arc(), "Learns to trust | Voice notes: Clipped");
    }

    #[test]
    fn test_absent_optional_fields_omitted() {
        let cast = extract_characters(r#"{"characters": [{"name": "Rook", "age": 50, "arc": "Falls"}]}"#)
            .unwrap();
        assert_eq!(cast[0].background(), "");
        assert_eq!(cast[0].arc(), "Falls");
        assert!(cast[0].traits().is_empty());
    }

    #[test]
    fn test_same_name_different_age_both_kept() {
        let cast = extract_characters(
            r#"{"characters": [{"name": "Ada", "age": 30}, {"name": "Ada", "age": 61}, {"name": "Ada", "age": 30}]}"#,
        )
        .unwrap();
        assert_eq!(cast.len(), 2);
    }

    #[test]
    fn test_nameless_and_non_object_entries_skipped() {
        let cast = extract_characters(
            r#"{"characters": [{"name": "", "age": 3}, "Mara", {"age": 40}, {"name": "Rook", "age": 50}]}"#,
        )
        .unwrap();
        assert_eq!(cast.len(), 1);
        assert_eq!(cast[0].name(), "Rook");
    }

    #[test]
    fn test_missing_section_is_malformed() {
        let err = extract_characters(r#"{"cast": []}"#).unwrap_err();
        assert!(matches!(err.kind, MalformedResponseKind::MissingSection(_)));
    }
}
