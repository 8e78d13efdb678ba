//! Claquette - screenplay generation from a short story brief
//!
//! A run turns a prose description into a cast of characters, then either a
//! feature film or a sequence of episodes, then casting suggestions for each
//! character. Every stage talks to a text model through the
//! [`ClaquetteDriver`] trait and repairs the model's JSON before extracting
//! typed records from it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use claquette::{
//!     Account, ClaquetteConfig, InMemoryScreenplayRepository, ModelGateway, OpenAiClient,
//!     PipelineOrchestrator, Project, StoryBrief,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClaquetteConfig::load()?;
//!     let client = OpenAiClient::from_config(&config)?;
//!
//!     let repository = Arc::new(InMemoryScreenplayRepository::new());
//!     let project = Project::new("Low Tide", StoryBrief::series("A harbour town hides a secret", 3));
//!     let account = Account::new(true, 1);
//!     let (project_id, account_id) = (*project.id(), *account.id());
//!     repository.insert_project(project).await;
//!     repository.insert_account(account).await;
//!
//!     let pipeline = PipelineOrchestrator::new(ModelGateway::new(client), repository);
//!     let screenplay = pipeline.generate_screenplay(&project_id, &account_id).await?;
//!     println!("{}", serde_json::to_string_pretty(&screenplay)?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `claquette_error` - Error types
//! - `claquette_core` - Domain records and request/response types
//! - `claquette_interface` - Driver and repository traits
//! - `claquette_models` - OpenAI-compatible client and configuration
//! - `claquette_screenplay` - Prompting, repair, extraction and orchestration
//!
//! This crate re-exports everything for convenience.

pub use claquette_core::*;
pub use claquette_error::*;
pub use claquette_interface::*;
pub use claquette_models::{ClaquetteConfig, LoggingSettings, OpenAiClient, ProviderSettings};
pub use claquette_screenplay::{
    ConsistencyWarning, InMemoryScreenplayRepository, ModelGateway, PipelineOrchestrator,
    PipelineState, ProjectSnapshot, PromptComposer, Resolution, extract_casting,
    extract_characters, extract_episode, extract_film, resolve, sanitize, validate,
};
