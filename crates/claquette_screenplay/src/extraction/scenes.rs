use crate::json_access::JsonAccess;
use crate::resolve::{Resolution, resolve};
use claquette_core::{CharacterId, GenerationContext, SceneRecord};
use claquette_error::{ExtractionError, ExtractionErrorKind};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

const NOTES_SEPARATOR: &str = " | ";

struct DialogueLine {
    speaker: String,
    line: String,
    aside: Option<String>,
}

impl DialogueLine {
    fn parse(entry: &Value) -> Result<Self, ExtractionError> {
        if !entry.is_object() {
            return Err(ExtractionError::new(ExtractionErrorKind::NotAnObject(
                "dialogue entry".to_string(),
            )));
        }
        let speaker = entry.opt_text("character").ok_or_else(|| {
            ExtractionError::new(ExtractionErrorKind::MissingField("character".to_string()))
        })?;
        let line = entry.opt_text("line").ok_or_else(|| {
            ExtractionError::new(ExtractionErrorKind::MissingField("line".to_string()))
        })?;
        Ok(Self {
            speaker,
            line,
            aside: entry.opt_text("aside"),
        })
    }

    fn render(&self) -> String {
        match &self.aside {
            Some(aside) => format!("{}: {} ({})", self.speaker, self.line, aside),
            None => format!("{}: {}", self.speaker, self.line),
        }
    }
}

/// Scenes under `parent.scenes`, numbered 1.. in source order.
pub(crate) fn extract_scenes(parent: &Value, context: &GenerationContext) -> Vec<SceneRecord> {
    let mut scenes = Vec::new();

    for (position, entry) in parent.array("scenes").iter().enumerate() {
        if !entry.is_object() {
            let err =
                ExtractionError::new(ExtractionErrorKind::NotAnObject("scene".to_string()));
            warn!(position, error = %err, "Skipping scene entry");
            continue;
        }

        let number = scenes.len() as u32 + 1;
        let (dialogue, characters, speakers) = extract_dialogue(entry, number, context);

        let scene = SceneRecord::builder()
            .number(number)
            .setting(entry.raw_text_or("slug", ""))
            .action(entry.raw_text_or("action", ""))
            .dialogue(dialogue)
            .technical_notes(technical_notes(entry))
            .characters(characters)
            .speakers(speakers)
            .build();

        match scene {
            Ok(scene) => scenes.push(scene),
            Err(e) => warn!(position, error = %e, "Failed to assemble scene"),
        }
    }

    scenes
}

fn extract_dialogue(
    scene: &Value,
    number: u32,
    context: &GenerationContext,
) -> (String, BTreeSet<CharacterId>, Vec<String>) {
    let mut lines = Vec::new();
    let mut characters = BTreeSet::new();
    let mut speakers: Vec<String> = Vec::new();

    for entry in scene.array("dialogue") {
        let line = match DialogueLine::parse(entry) {
            Ok(line) => line,
            Err(e) => {
                debug!(scene = number, error = %e, "Skipping dialogue entry");
                continue;
            }
        };

        match resolve(&line.speaker, context.names()) {
            Resolution::Unresolved { nearest } => {
                debug!(
                    scene = number,
                    speaker = %line.speaker,
                    nearest = nearest.unwrap_or(""),
                    "Speaker does not match any canonical character"
                );
            }
            resolution => {
                if let Some(character) = resolution.name().and_then(|n| context.character_named(n))
                {
                    characters.insert(*character.id());
                }
            }
        }

        if !speakers.contains(&line.speaker) {
            speakers.push(line.speaker.clone());
        }
        lines.push(line.render());
    }

    (lines.join("\n"), characters, speakers)
}

fn technical_notes(scene: &Value) -> String {
    [
        ("Sound", "sound"),
        ("Mood", "mood_light"),
        ("Purpose", "purpose"),
        ("Turning", "turning_point"),
    ]
    .iter()
    .filter_map(|(label, key)| scene.opt_text(key).map(|text| format!("{}: {}", label, text)))
    .collect::<Vec<_>>()
    .join(NOTES_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claquette_core::{CharacterRecord, StoryBrief};
    use serde_json::json;

    fn context() -> GenerationContext {
        let cast = ["Mara Voss", "Rook"]
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

    #[test]
    fn test_numbering_ignores_source_numbers() {
        let parent = json!({"scenes": [
            {"scene_number": 7, "slug": "INT. VAULT"},
            "not a scene",
            {"scene_number": 2, "slug": "EXT. ROOF"}
        ]});
        let scenes = extract_scenes(&parent, &context());
        let numbers: Vec<u32> = scenes.iter().map(|s| *s.number()).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(scenes[1].setting(), "EXT. ROOF");
    }

    #[test]
    fn test_dialogue_format_and_resolution() {
        let ctx = context();
        let parent = json!({"scenes": [{
            "slug": "INT. VAULT - NIGHT",
            "action": "Alarms.",
            "dialogue": [
                {"character": "mara voss", "line": "Move.", "aside": "whispering"},
                {"character": "Rook", "line": "Going."},
                {"character": "", "line": "ghost"},
                {"character": "Guard", "line": "Halt!"},
                {"character": "Rook", "line": ""}
            ]
        }]});

        let scenes = extract_scenes(&parent, &ctx);
        let scene = &scenes[0];

        assert_eq!(
            scene.dialogue(),
            "mara voss: Move. (whispering)\nRook: Going.\nGuard: Halt!"
        );
        assert_eq!(scene.characters().len(), 2);
        assert_eq!(
            scene.speakers(),
            &vec!["mara voss".to_string(), "Rook".to_string(), "Guard".to_string()]
        );
    }

    #[test]
    fn test_setting_and_action_copied_verbatim() {
        let parent = json!({"scenes": [{
            "slug": "  INT. VAULT - NIGHT ",
            "action": "Alarms.\n  Red light sweeps the room.  "
        }]});
        let scenes = extract_scenes(&parent, &context());
        assert_eq!(scenes[0].setting(), "  INT. VAULT - NIGHT ");
        assert_eq!(scenes[0].action(), "Alarms.\n  Red light sweeps the room.  ");
    }

    #[test]
    fn test_technical_notes_only_present_fields() {
        let notes = technical_notes(&json!({"sound": "Rain", "purpose": "Setup"}));
        assert_eq!(notes, "Sound: Rain | Purpose: Setup");
        assert_eq!(technical_notes(&json!({})), "");
    }

    #[test]
    fn test_scene_without_dialogue_has_no_characters() {
        let scenes = extract_scenes(&json!({"scenes": [{"slug": "EXT. DESERT"}]}), &context());
        assert!(scenes[0].characters().is_empty());
        assert_eq!(scenes[0].dialogue(), "");
    }
}
