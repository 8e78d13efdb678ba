//! Trait definitions for model backends and the persistence collaborator.

use async_trait::async_trait;
use claquette_core::{
    Account, AccountId, CastingSuggestion, CharacterRecord, EpisodeRecord, FilmRecord,
    GenerateRequest, GenerateResponse, Project, ProjectId,
};
use claquette_error::ClaquetteResult;

/// Core trait that all text model backends must implement.
#[async_trait]
pub trait ClaquetteDriver: Send + Sync {
    /// Generate model output for a chat request.
    async fn generate(&self, req: &GenerateRequest) -> ClaquetteResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4.1-mini").
    fn model_name(&self) -> &str;
}

/// Backends that can render an image from a prompt.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    /// Generate one image and return it base64-encoded.
    async fn generate_image(&self, prompt: &str) -> ClaquetteResult<String>;
}

/// Read side of the persistence collaborator, plus the unit-of-work factory.
#[async_trait]
pub trait ScreenplayRepository: Send + Sync {
    /// Load a project by id.
    async fn load_project(&self, id: &ProjectId) -> ClaquetteResult<Project>;

    /// Load the caller's account.
    async fn load_account(&self, id: &AccountId) -> ClaquetteResult<Account>;

    /// Canonical characters persisted for a project, empty if none.
    async fn load_characters(&self, project: &ProjectId) -> ClaquetteResult<Vec<CharacterRecord>>;

    /// Start a unit of work scoped to one project.
    async fn begin(&self, project: &ProjectId) -> ClaquetteResult<Box<dyn UnitOfWork>>;
}

/// Writes of one invocation, applied together on [`UnitOfWork::commit`].
///
/// Dropping a unit of work without committing discards every staged write.
/// Each `save_*` replaces the previously persisted set of the same kind.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Replace the project's characters.
    async fn save_characters(&mut self, characters: &[CharacterRecord]) -> ClaquetteResult<()>;

    /// Stage one episode; episodes staged in one unit replace the stored set.
    async fn save_episode(&mut self, episode: &EpisodeRecord) -> ClaquetteResult<()>;

    /// Replace the project's film.
    async fn save_film(&mut self, film: &FilmRecord) -> ClaquetteResult<()>;

    /// Replace the project's casting suggestions.
    async fn save_casting(&mut self, casting: &[CastingSuggestion]) -> ClaquetteResult<()>;

    /// Store a base64 poster on the project.
    async fn save_poster(&mut self, poster: &str) -> ClaquetteResult<()>;

    /// Consume one unit of the account's usage.
    async fn decrement_usage(&mut self, account: &AccountId) -> ClaquetteResult<()>;

    /// Apply every staged write atomically.
    async fn commit(self: Box<Self>) -> ClaquetteResult<()>;
}
