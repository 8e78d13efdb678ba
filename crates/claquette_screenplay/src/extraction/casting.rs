use crate::json_access::{JsonAccess, defaults};
use crate::resolve::resolve;
use claquette_core::{
    CastingSuggestion, CharacterId, CharacterRecord, GenerationContext,
    MAX_SUGGESTIONS_PER_CHARACTER,
};
use claquette_error::{ExtractionError, ExtractionErrorKind, MalformedResponseError};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Extract casting suggestions for the frozen cast.
///
/// Each entry's `character` is resolved against the canonical names; entries
/// that do not resolve are skipped. At most three suggestions are kept per
/// character, ranked 1, 2, 3 in arrival order. `match_percent` (0-100) is
/// converted to a score clamped to `[0.0, 1.0]`.
///
/// # Errors
///
/// Returns [`MalformedResponseError`] if the document is not a JSON object.
/// A missing `casting` array yields no suggestions.
///
/// # Examples
///
/// ```
/// use claquette_core::{CharacterRecord, GenerationContext, StoryBrief};
/// use claquette_screenplay::extract_casting;
///
/// let cast = vec![CharacterRecord::builder().name("Mara").age(34u32).build().unwrap()];
/// let context = GenerationContext::freeze("Vault", StoryBrief::film("A heist"), cast);
/// let json = r#"{"casting": [{"character": "MARA", "suggestions": [
///     {"actor": "Jane Roe", "why": "Range", "match_percent": 140, "age": 36},
///     {"actor": "Ana Lima"}
/// ]}]}"#;
///
/// let suggestions = extract_casting(json, &context).unwrap();
/// assert_eq!(suggestions.len(), 2);
/// assert_eq!(*suggestions[0].match_score(), 1.0);
/// assert_eq!(*suggestions[1].match_score(), 0.5);
/// assert_eq!(*suggestions[1].priority(), 2);
/// ```
#[instrument(skip(json, context), fields(length = json.len()))]
pub fn extract_casting(
    json: &str,
    context: &GenerationContext,
) -> Result<Vec<CastingSuggestion>, MalformedResponseError> {
    let root = super::parse_document(json)?;
    let mut ranks: HashMap<CharacterId, u8> = HashMap::new();
    let mut suggestions = Vec::new();

    for entry in root.array("casting") {
        let requested = entry.text_or("character", "");
        let resolution = resolve(&requested, context.names());
        let Some(character) = resolution
            .name()
            .and_then(|name| context.character_named(name))
        else {
            warn!(
                character = %requested,
                ?resolution,
                "Skipping casting entry for unknown character"
            );
            continue;
        };

        for (position, suggestion) in entry.array("suggestions").iter().enumerate() {
            let rank = ranks.entry(*character.id()).or_insert(0);
            if usize::from(*rank) >= MAX_SUGGESTIONS_PER_CHARACTER {
                debug!(character = %character.name(), "Suggestion limit reached");
                break;
            }
            match suggestion_from(suggestion, character, *rank + 1) {
                Ok(s) => {
                    *rank += 1;
                    suggestions.push(s);
                }
                Err(e) => warn!(
                    character = %character.name(),
                    position,
                    error = %e,
                    "Skipping casting suggestion"
                ),
            }
        }
    }

    debug!(count = suggestions.len(), "Extracted casting suggestions");
    Ok(suggestions)
}

fn suggestion_from(
    suggestion: &Value,
    character: &CharacterRecord,
    priority: u8,
) -> Result<CastingSuggestion, ExtractionError> {
    if !suggestion.is_object() {
        return Err(ExtractionError::new(ExtractionErrorKind::NotAnObject(
            "casting suggestion".to_string(),
        )));
    }

    let percent = suggestion.number_or("match_percent", defaults::MATCH_PERCENT);
    CastingSuggestion::builder()
        .character_id(*character.id())
        .character_name(character.name().clone())
        .actor_name(suggestion.text_or("actor", defaults::ACTOR_NAME))
        .actor_age(suggestion.count_or("age", defaults::ACTOR_AGE))
        .match_score((percent / 100.0).clamp(0.0, 1.0))
        .reasoning(suggestion.text_or("why", defaults::REASONING))
        .profile(suggestion.text_or("profile", defaults::PROFILE))
        .priority(priority)
        .build()
        .map_err(|e| ExtractionError::new(ExtractionErrorKind::InvalidField(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claquette_core::StoryBrief;

    fn context() -> GenerationContext {
        let cast = ["Mara", "Rook"]
            .iter()
            .map(|name| {
                CharacterRecord::builder()
                    .name(*name)
                    .age(40u32)
                    .build()
                    .unwrap()
            })
            .collect();
        GenerationContext::freeze("Vault", StoryBrief::film("A heist"), cast)
    }

    fn priorities_for(suggestions: &[CastingSuggestion], name: &str) -> Vec<u8> {
        suggestions
            .iter()
            .filter(|s| s.character_name() == name)
            .map(|s| *s.priority())
            .collect()
    }

    #[test]
    fn test_caps_at_three_in_arrival_order() {
        let json = r#"{"casting": [{"character": "Mara", "suggestions": [
            {"actor": "A"}, {"actor": "B"}, {"actor": "C"}, {"actor": "D"}
        ]}]}"#;
        let suggestions = extract_casting(json, &context()).unwrap();
        let actors: Vec<&str> = suggestions.iter().map(|s| s.actor_name().as_str()).collect();
        assert_eq!(actors, vec!["A", "B", "C"]);
        assert_eq!(priorities_for(&suggestions, "Mara"), vec![1, 2, 3]);
    }

    #[test]
    fn test_bad_suggestion_does_not_leave_gap() {
        let json = r#"{"casting": [{"character": "Rook", "suggestions": [
            "not an object", {"actor": "B"}, 7, {"actor": "C"}
        ]}]}"#;
        let suggestions = extract_casting(json, &context()).unwrap();
        assert_eq!(priorities_for(&suggestions, "Rook"), vec![1, 2]);
    }

    #[test]
    fn test_repeated_character_entries_share_ranks() {
        let json = r#"{"casting": [
            {"character": "Mara", "suggestions": [{"actor": "A"}, {"actor": "B"}]},
            {"character": "mara", "suggestions": [{"actor": "C"}, {"actor": "D"}]}
        ]}"#;
        let suggestions = extract_casting(json, &context()).unwrap();
        assert_eq!(priorities_for(&suggestions, "Mara"), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_character_skipped() {
        let json = r#"{"casting": [{"character": "Narrator", "suggestions": [{"actor": "A"}]}]}"#;
        assert!(extract_casting(json, &context()).unwrap().is_empty());
    }

    #[test]
    fn test_defaults_and_string_percent() {
        let json = r#"{"casting": [{"character": "Rook", "suggestions": [
            {"match_percent": "85%"},
            {"actor": "Low", "match_percent": -20}
        ]}]}"#;
        let suggestions = extract_casting(json, &context()).unwrap();
        let first = &suggestions[0];
        assert_eq!(first.actor_name(), "Unknown Actor");
        assert_eq!(first.reasoning(), "No reasoning provided");
        assert_eq!(first.profile(), "No profile available");
        assert_eq!(*first.actor_age(), 30);
        assert!((first.match_score() - 0.85).abs() < 1e-9);
        assert_eq!(*suggestions[1].match_score(), 0.0);
    }

    #[test]
    fn test_missing_casting_array_is_empty() {
        assert!(extract_casting(r#"{"film": {}}"#, &context()).unwrap().is_empty());
    }
}
