//! Screenplay generation pipeline for Claquette.
//!
//! A run turns a [`StoryBrief`](claquette_core::StoryBrief) into characters,
//! then a film or a sequence of episodes, then casting suggestions:
//!
//! - [`PromptComposer`] builds the fixed-schema request for each stage.
//! - [`ModelGateway`] calls the model and repairs its output into parseable JSON.
//! - The [`extraction`] functions turn that JSON into domain records,
//!   resolving speaker names against the frozen canonical list.
//! - [`validate`] flags unexpected names without blocking.
//! - [`PipelineOrchestrator`] sequences the stages and commits one unit of work.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extraction;
mod gateway;
mod in_memory_repository;
mod json_access;
mod orchestrator;
mod prompt;
mod resolve;
mod sanitize;
mod validator;

pub use extraction::{
    extract_assumptions, extract_casting, extract_characters, extract_episode, extract_film,
    parse_document,
};
pub use gateway::ModelGateway;
pub use in_memory_repository::{InMemoryScreenplayRepository, ProjectSnapshot};
pub use json_access::{JsonAccess, defaults};
pub use orchestrator::{PipelineOrchestrator, PipelineState};
pub use prompt::{PromptComposer, SYSTEM_DIRECTIVE};
pub use resolve::{Resolution, normalize_name, resolve};
pub use sanitize::{
    is_balanced, rewrite_object_assumptions, sanitize, slice_object, strip_code_fences,
    strip_trailing_commas,
};
pub use validator::{ConsistencyWarning, validate};
