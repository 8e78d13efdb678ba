//! Fixed-schema prompts for each generation stage.

use claquette_core::StoryBrief;

/// System message sent with every text request.
pub const SYSTEM_DIRECTIVE: &str = "You are a professional screenwriter. Return ONLY one valid JSON object. \
The 'assumptions' field, when present, MUST be a JSON array of strings, never an object. \
Do not use markdown or code fences. Start the response with { and end it with }. \
Do not leave trailing commas.";

const PREAMBLE: &str = "Write a complete, production-ready screenplay component as valid UTF-8 JSON. \
Fill gaps in the story description with realistic assumptions. \
Follow the schema below exactly; keep every key even when a value is short.";

const JSON_ONLY: &str =
    "CRITICAL: Return ONLY one JSON object. No explanations, no markdown, no code blocks. Start with { and end with }.";

const SCENE_SCHEMA: &str = r#"{
            "slug": "string (INT./EXT. - LOCATION - TIME OF DAY)",
            "sound": "string (soundscape)",
            "mood_light": "string (lighting and atmosphere)",
            "purpose": "string (dramatic beat)",
            "action": "string (visual description and movement)",
            "dialogue": [
              { "character": "string (one of the allowed names)", "line": "string", "aside": "string (optional delivery note)" }
            ],
            "turning_point": "string (shift inside the scene, if any)"
          }"#;

/// Builds the natural-language request for each stage.
///
/// Pure: the same inputs always produce the same text, and every later-stage
/// prompt embeds the canonical names with an instruction to use only them.
///
/// # Examples
///
/// ```
/// use claquette_core::StoryBrief;
/// use claquette_screenplay::PromptComposer;
///
/// let composer = PromptComposer::new();
/// let brief = StoryBrief::series("A crew plans a heist on an orbital bank", 3);
/// let names = vec!["Mara".to_string(), "Rook".to_string()];
///
/// let prompt = composer.compose_episodes(&brief, 3, 2, &names);
/// assert!(prompt.contains("episode 2 of 3"));
/// assert!(prompt.contains("\"Mara\", \"Rook\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptComposer;

impl PromptComposer {
    /// Creates a composer.
    pub fn new() -> Self {
        Self
    }

    /// Stage 1: invent the canonical cast.
    pub fn compose_characters(&self, brief: &StoryBrief) -> String {
        format!(
            r#"{PREAMBLE}

### TASK
Generate ONLY the "characters" section with 6-10 characters.

Remember the exact character names you create here: every later scene and
casting request will be restricted to them.

{{
  "characters": [
    {{
      "name": "string (first name only, used verbatim in all dialogue)",
      "age": number,
      "role": "string (protagonist/supporting/antagonist...)",
      "traits": ["string", "..."],
      "backstory": "string",
      "relationships": ["string", "..."],
      "goal": "string",
      "obstacle": "string",
      "arc": "string",
      "voice_notes": "string (tone, rhythm, signature phrases)"
    }}
  ],
  "assumptions": ["string", "..."]
}}

RULES:
- Names must be distinct and memorable
- No two characters may share both name and age
- Mix ages sensibly for the story

story_description: "{description}"
project_type: {kind}

{JSON_ONLY}"#,
            description = brief.description(),
            kind = brief.kind(),
        )
    }

    /// Stage 2 for a series: one call per episode, `index` in `1..=episode_count`.
    pub fn compose_episodes(
        &self,
        brief: &StoryBrief,
        episode_count: u32,
        index: u32,
        canonical_names: &[String],
    ) -> String {
        let names = quoted_list(canonical_names);
        format!(
            r#"{PREAMBLE}

### TASK
Based on this story description: "{description}"

Write episode {index} of {episode_count} of the series, advancing the overall arc.

CHARACTER CONSISTENCY RULE:
Use ONLY these exact character names in all dialogue: [{names}]
Do NOT invent new characters or alter these names.

{{
  "episode": {{
    "episode_number": {index},
    "title": "string",
    "summary": "string (3-4 sentences)",
    "duration_minutes": number,
    "key_characters": [{names}],
    "scenes": [
          {SCENE_SCHEMA}
    ]
  }}
}}

Write 8-12 detailed scenes with rich dialogue and action.

{JSON_ONLY}"#,
            description = brief.description(),
        )
    }

    /// Stage 2 for a film.
    pub fn compose_film(&self, brief: &StoryBrief, canonical_names: &[String]) -> String {
        let names = quoted_list(canonical_names);
        format!(
            r#"{PREAMBLE}

### TASK
Based on this story description: "{description}"

Write a complete FILM.

CHARACTER CONSISTENCY RULE:
Use ONLY these exact character names in all dialogue: [{names}]
Do NOT invent new characters or alter these names. If an extra voice is
needed, give the line to an existing character.

{{
  "film": {{
    "title": "string",
    "summary": "string",
    "duration_minutes": number,
    "scenes": [
          {SCENE_SCHEMA}
    ]
  }}
}}

{JSON_ONLY}"#,
            description = brief.description(),
        )
    }

    /// Stage 3: casting suggestions for the canonical cast.
    ///
    /// `project_summary` is the one-line project description, see
    /// [`Project::summary_line`](claquette_core::Project::summary_line).
    pub fn compose_casting(&self, project_summary: &str, canonical_names: &[String]) -> String {
        let names = quoted_list(canonical_names);
        format!(
            r#"{PREAMBLE}

### TASK
Based on this project information: "{project_summary}"

Suggest 1-3 working actors for EACH of these characters, using the names
exactly as written: [{names}]
List the strongest match first.

{{
  "casting": [
    {{
      "character": "string (one of the names above)",
      "suggestions": [
        {{
          "actor": "string",
          "why": "string",
          "match_percent": number (0-100),
          "profile": "string (short career summary)",
          "age": number
        }}
      ]
    }}
  ]
}}

{JSON_ONLY}"#
        )
    }

    /// Image prompt for the project poster.
    pub fn compose_poster(&self, title: &str, brief: &StoryBrief) -> String {
        format!(
            "Cinematic theatrical poster for the {kind} \"{title}\". Story: {description}. \
Dramatic lighting, strong central composition, no text or lettering.",
            kind = brief.kind().to_string().to_lowercase(),
            description = brief.description(),
        )
    }
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ")
}
