use super::scenes::extract_scenes;
use crate::json_access::JsonAccess;
use claquette_core::{EpisodeRecord, FilmRecord, GenerationContext};
use claquette_error::MalformedResponseError;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Extract episode `index` from an `episode` or `episodes` document.
///
/// Looks for an `episode` object first, then the `episodes` entry whose
/// `episode_number` (or `episode`) equals `index`, then the first entry.
/// With neither present the episode is titled "Episode N", summarized with
/// the story description, and has no scenes.
///
/// # Errors
///
/// Returns [`MalformedResponseError`] if the document is not a JSON object.
///
/// # Examples
///
/// ```
/// use claquette_core::{GenerationContext, StoryBrief};
/// use claquette_screenplay::extract_episode;
///
/// let context = GenerationContext::freeze("Vault", StoryBrief::series("A heist", 2), vec![]);
/// let json = r#"{"episodes": [{"episode_number": 1, "title": "One"}, {"episode_number": 2, "title": "Two"}]}"#;
/// let episode = extract_episode(json, 2, &context).unwrap();
/// assert_eq!(episode.title(), "Two");
/// assert_eq!(episode.summary(), "A heist");
/// ```
#[instrument(skip(json, context), fields(length = json.len()))]
pub fn extract_episode(
    json: &str,
    index: u32,
    context: &GenerationContext,
) -> Result<EpisodeRecord, MalformedResponseError> {
    let root = super::parse_document(json)?;
    let default_title = format!("Episode {}", index);

    let Some(node) = episode_node(&root, index) else {
        warn!(index, "Response has no episode content, using placeholder episode");
        return Ok(EpisodeRecord::new(
            index,
            default_title,
            context.brief().description().clone(),
            None,
            Vec::new(),
        ));
    };

    let scenes = extract_scenes(node, context);
    debug!(index, scenes = scenes.len(), "Extracted episode");

    Ok(EpisodeRecord::new(
        index,
        node.text_or("title", &default_title),
        node.text_or("summary", context.brief().description()),
        node.opt_count("duration_minutes"),
        scenes,
    ))
}

fn episode_node(root: &Value, index: u32) -> Option<&Value> {
    if let Some(node) = root.field("episode").filter(|v| v.is_object()) {
        return Some(node);
    }
    if let Some(node) = root.field("episodes").filter(|v| v.is_object()) {
        return Some(node);
    }

    let candidates: Vec<&Value> = root
        .array("episodes")
        .iter()
        .filter(|v| v.is_object())
        .collect();
    candidates
        .iter()
        .find(|entry| {
            entry.opt_count("episode_number") == Some(index)
                || entry.opt_count("episode") == Some(index)
        })
        .or_else(|| candidates.first())
        .copied()
}

/// Extract a film from a `film` document.
///
/// Title falls back to the project title and summary to the story
/// description. A document without a `film` object yields a film with no
/// scenes.
///
/// # Errors
///
/// Returns [`MalformedResponseError`] if the document is not a JSON object.
#[instrument(skip(json, context), fields(length = json.len()))]
pub fn extract_film(
    json: &str,
    context: &GenerationContext,
) -> Result<FilmRecord, MalformedResponseError> {
    let root = super::parse_document(json)?;

    let Some(node) = root.field("film").filter(|v| v.is_object()) else {
        warn!("Response has no film object, using placeholder film");
        return Ok(FilmRecord::new(
            context.project_title().clone(),
            context.brief().description().clone(),
            None,
            Vec::new(),
        ));
    };

    let scenes = extract_scenes(node, context);
    debug!(scenes = scenes.len(), "Extracted film");

    Ok(FilmRecord::new(
        node.text_or("title", context.project_title()),
        node.text_or("summary", context.brief().description()),
        node.opt_count("duration_minutes"),
        scenes,
    ))
}
