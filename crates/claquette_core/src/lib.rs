//! Core data types for the Claquette screenplay pipeline.
//!
//! This crate holds the records every other Claquette crate exchanges: the
//! story brief, characters, scenes, episodes, films, casting suggestions and
//! the request/response types spoken to a text model driver.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod account;
mod brief;
mod casting;
mod character;
mod content;
mod context;
mod ids;
mod logging;
mod message;
mod output;
mod project;
mod request;
mod role;
mod scene;
mod screenplay;

pub use account::Account;
pub use brief::{ProjectKind, StoryBrief};
pub use casting::{CastingSuggestion, MAX_SUGGESTIONS_PER_CHARACTER};
pub use character::{CharacterRecord, CharacterRecordBuilder, FIELD_DELIMITER};
pub use content::{EpisodeRecord, FilmRecord, ScreenplayContent};
pub use context::GenerationContext;
pub use ids::{AccountId, CharacterId, ProjectId};
pub use logging::{LoggingOptions, init_logging};
pub use message::Message;
pub use output::Output;
pub use project::Project;
pub use request::{GenerateRequest, GenerateResponse};
pub use role::Role;
pub use scene::{SceneRecord, SceneRecordBuilder};
pub use screenplay::Screenplay;
