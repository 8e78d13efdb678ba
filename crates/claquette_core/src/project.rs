//! Project record.

use crate::{ProjectId, StoryBrief};
use serde::{Deserialize, Serialize};

/// A screenplay project owned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Project {
    /// Project identifier
    id: ProjectId,
    /// Working title
    title: String,
    /// The brief every stage is generated from
    brief: StoryBrief,
    /// Base64-encoded poster image, once generated
    #[serde(default)]
    poster: Option<String>,
}

impl Project {
    /// New project without a poster.
    pub fn new(title: impl Into<String>, brief: StoryBrief) -> Self {
        Self {
            id: ProjectId::new(),
            title: title.into(),
            brief,
            poster: None,
        }
    }

    /// Returns a copy carrying `poster`.
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    /// One-line description handed to the casting prompt.
    ///
    /// # Examples
    ///
    /// ```
    /// use claquette_core::{Project, StoryBrief};
    ///
    /// let project = Project::new("Vault", StoryBrief::film("A bank heist"));
    /// assert_eq!(project.summary_line(), "Project: Vault, Type: FILM, Description: A bank heist");
    /// ```
    pub fn summary_line(&self) -> String {
        format!(
            "Project: {}, Type: {}, Description: {}",
            self.title,
            self.brief.kind(),
            self.brief.description()
        )
    }
}
