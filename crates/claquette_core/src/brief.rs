//! Story brief and project kind.

use claquette_error::InputError;
use serde::{Deserialize, Serialize};

/// Whether a project is a single feature or an episodic series.
///
/// # Examples
///
/// ```
/// use claquette_core::ProjectKind;
/// use std::str::FromStr;
///
/// assert_eq!(ProjectKind::from_str("series").unwrap(), ProjectKind::Series);
/// assert_eq!(ProjectKind::Film.to_string(), "FILM");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ProjectKind {
    /// One continuous feature
    Film,
    /// Multiple sequential episodes
    Series,
}

/// The short prose input a screenplay is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryBrief {
    /// Free-form description of the story
    description: String,
    /// Film or series
    kind: ProjectKind,
    /// Number of episodes, only meaningful for series
    #[serde(default)]
    episode_count: Option<u32>,
}

impl StoryBrief {
    /// Brief for a feature film.
    pub fn film(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            kind: ProjectKind::Film,
            episode_count: None,
        }
    }

    /// Brief for a series of `episode_count` episodes.
    pub fn series(description: impl Into<String>, episode_count: u32) -> Self {
        Self {
            description: description.into(),
            kind: ProjectKind::Series,
            episode_count: Some(episode_count),
        }
    }

    /// Checks the brief can drive a generation run.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the description is blank or a series has
    /// no positive episode count.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.description.trim().is_empty() {
            return Err(InputError::new("Story description is empty"));
        }
        if self.kind == ProjectKind::Series {
            match self.episode_count {
                Some(n) if n > 0 => {}
                _ => {
                    return Err(InputError::new(
                        "Series projects need a positive episode count",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Episode count for a series; zero for a film.
    pub fn episodes(&self) -> u32 {
        match self.kind {
            ProjectKind::Series => self.episode_count.unwrap_or(0),
            ProjectKind::Film => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_description() {
        assert!(StoryBrief::film("   ").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_series_without_episodes() {
        assert!(StoryBrief::series("a heist", 0).validate().is_err());
        assert!(StoryBrief::series("a heist", 3).validate().is_ok());
    }

    #[test]
    fn test_film_has_no_episodes() {
        let brief = StoryBrief::film("a heist");
        assert_eq!(brief.episodes(), 0);
        assert!(brief.validate().is_ok());
    }

    #[test]
    fn test_kind_serializes_uppercase() {
        let json = serde_json::to_string(&ProjectKind::Series).unwrap();
        assert_eq!(json, "\"SERIES\"");
    }
}
