//! Episode and film records.

use crate::SceneRecord;
use serde::{Deserialize, Serialize};

/// One generated episode of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct EpisodeRecord {
    /// 1-based episode index
    index: u32,
    /// Episode title
    title: String,
    /// Episode summary
    summary: String,
    /// Runtime in minutes, when the model supplied one
    duration_minutes: Option<u32>,
    /// Scenes in order
    scenes: Vec<SceneRecord>,
}

impl EpisodeRecord {
    /// Assemble an episode.
    pub fn new(
        index: u32,
        title: impl Into<String>,
        summary: impl Into<String>,
        duration_minutes: Option<u32>,
        scenes: Vec<SceneRecord>,
    ) -> Self {
        Self {
            index,
            title: title.into(),
            summary: summary.into(),
            duration_minutes,
            scenes,
        }
    }
}

/// A generated feature film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FilmRecord {
    /// Film title
    title: String,
    /// Logline or summary
    summary: String,
    /// Runtime in minutes, when the model supplied one
    duration_minutes: Option<u32>,
    /// Scenes in order
    scenes: Vec<SceneRecord>,
}

impl FilmRecord {
    /// Assemble a film.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        duration_minutes: Option<u32>,
        scenes: Vec<SceneRecord>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            duration_minutes,
            scenes,
        }
    }
}

/// The middle stage of a screenplay: a film or an ordered list of episodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ScreenplayContent {
    /// A single film
    Film(FilmRecord),
    /// Episodes ordered by index
    Episodes(Vec<EpisodeRecord>),
}

impl ScreenplayContent {
    /// Every scene across the content, in order.
    pub fn scenes(&self) -> Vec<&SceneRecord> {
        match self {
            ScreenplayContent::Film(film) => film.scenes().iter().collect(),
            ScreenplayContent::Episodes(episodes) => episodes
                .iter()
                .flat_map(|episode| episode.scenes().iter())
                .collect(),
        }
    }
}
