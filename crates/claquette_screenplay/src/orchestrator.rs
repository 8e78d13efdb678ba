//! Stage sequencing, quota accounting and the unit-of-work boundary.

use crate::extraction::{extract_casting, extract_characters, extract_episode, extract_film};
use crate::gateway::ModelGateway;
use crate::prompt::PromptComposer;
use crate::validator::validate;
use claquette_core::{
    Account, AccountId, CastingSuggestion, CharacterRecord, EpisodeRecord, FilmRecord,
    GenerationContext, Project, ProjectId, ProjectKind, Screenplay, ScreenplayContent,
};
use claquette_error::{
    ClaquetteResult, EntitlementError, EntitlementErrorKind, InputError, MalformedResponseError,
    MalformedResponseKind,
};
use claquette_interface::{ClaquetteDriver, ImageGeneration, ScreenplayRepository, UnitOfWork};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Where a full run is.
///
/// `CharactersPending → CharactersReady → (FilmPending | EpisodesPending)
/// → ContentReady → CastingPending → Complete`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// Waiting on the character stage
    CharactersPending,
    /// Canonical names frozen
    CharactersReady,
    /// Generating the film
    FilmPending,
    /// Generating episodes one by one
    EpisodesPending,
    /// Film or episodes done
    ContentReady,
    /// Generating casting
    CastingPending,
    /// Committed
    Complete,
}

impl PipelineState {
    /// The state that follows this one for a project of `kind`.
    ///
    /// # Examples
    ///
    /// ```
    /// use claquette_core::ProjectKind;
    /// use claquette_screenplay::PipelineState;
    ///
    /// let next = PipelineState::CharactersReady.advance(ProjectKind::Series);
    /// assert_eq!(next, PipelineState::EpisodesPending);
    /// ```
    pub fn advance(self, kind: ProjectKind) -> Self {
        match (self, kind) {
            (PipelineState::CharactersPending, _) => PipelineState::CharactersReady,
            (PipelineState::CharactersReady, ProjectKind::Film) => PipelineState::FilmPending,
            (PipelineState::CharactersReady, ProjectKind::Series) => {
                PipelineState::EpisodesPending
            }
            (PipelineState::FilmPending | PipelineState::EpisodesPending, _) => {
                PipelineState::ContentReady
            }
            (PipelineState::ContentReady, _) => PipelineState::CastingPending,
            (PipelineState::CastingPending | PipelineState::Complete, _) => {
                PipelineState::Complete
            }
        }
    }
}

/// Runs the screenplay stages against a model and a persistence collaborator.
///
/// Every operation stages its writes in one [`UnitOfWork`] and commits only
/// after all of its stages succeed; a failure drops the unit and persists
/// nothing.
pub struct PipelineOrchestrator<D> {
    gateway: ModelGateway<D>,
    composer: PromptComposer,
    repository: Arc<dyn ScreenplayRepository>,
}

impl<D> PipelineOrchestrator<D> {
    /// Create an orchestrator over a gateway and a repository.
    pub fn new(gateway: ModelGateway<D>, repository: Arc<dyn ScreenplayRepository>) -> Self {
        Self {
            gateway,
            composer: PromptComposer::new(),
            repository,
        }
    }

    /// The model gateway in use.
    pub fn gateway(&self) -> &ModelGateway<D> {
        &self.gateway
    }

    async fn subscribed_caller(&self, caller: &AccountId, operation: &str) -> ClaquetteResult<Account> {
        let account = self.repository.load_account(caller).await?;
        if !*account.subscribed() {
            warn!(account = %caller, operation, "Operation requires an active subscription");
            return Err(EntitlementError::new(EntitlementErrorKind::SubscriptionRequired {
                account: caller.to_string(),
                operation: operation.to_string(),
            })
            .into());
        }
        Ok(account)
    }

    async fn persisted_context(&self, project: &Project) -> ClaquetteResult<GenerationContext> {
        let characters = self.repository.load_characters(project.id()).await?;
        if characters.is_empty() {
            return Err(InputError::new(format!(
                "Project {} has no characters; generate characters first",
                project.id()
            ))
            .into());
        }
        Ok(GenerationContext::freeze(
            project.title().clone(),
            project.brief().clone(),
            characters,
        ))
    }
}

impl<D: ClaquetteDriver> PipelineOrchestrator<D> {
    /// Full run: characters, then film or episodes, then casting.
    ///
    /// Consumes one unit of the caller's usage on success.
    ///
    /// # Errors
    ///
    /// - `EntitlementError` when the caller has neither a subscription nor usage left
    /// - `InputError` when the brief is incomplete
    /// - `ModelError` / `MalformedResponseError` from any stage
    /// - `StorageError` from the repository
    #[instrument(skip(self), fields(project = %project_id, caller = %caller))]
    pub async fn generate_screenplay(
        &self,
        project_id: &ProjectId,
        caller: &AccountId,
    ) -> ClaquetteResult<Screenplay> {
        let account = self.repository.load_account(caller).await?;
        if !account.may_generate() {
            warn!("Caller has no subscription and no remaining usage");
            return Err(EntitlementError::new(EntitlementErrorKind::QuotaExhausted(
                caller.to_string(),
            ))
            .into());
        }

        let project = self.repository.load_project(project_id).await?;
        project.brief().validate()?;
        let kind = *project.brief().kind();

        let mut uow = self.repository.begin(project_id).await?;
        let mut state = PipelineState::CharactersPending;
        info!(?state, kind = %kind, "Starting screenplay generation");

        let characters = self.run_characters(&project).await?;
        uow.save_characters(&characters).await?;
        let context = GenerationContext::freeze(
            project.title().clone(),
            project.brief().clone(),
            characters,
        );
        state = state.advance(kind);
        debug!(?state, names = ?context.names(), "Canonical names frozen");

        state = state.advance(kind);
        debug!(?state, "Generating content");
        let content = match kind {
            ProjectKind::Series => {
                ScreenplayContent::Episodes(self.run_episodes(&context, uow.as_mut()).await?)
            }
            ProjectKind::Film => {
                let film = self.run_film(&context).await?;
                uow.save_film(&film).await?;
                ScreenplayContent::Film(film)
            }
        };
        state = state.advance(kind);
        debug!(?state, "Content ready");

        state = state.advance(kind);
        debug!(?state, "Generating casting");
        let casting = self.run_casting(&project, &context).await?;
        uow.save_casting(&casting).await?;

        uow.decrement_usage(caller).await?;
        uow.commit().await?;
        state = state.advance(kind);

        let characters = context.characters().clone();
        log_relationship_summary(&characters, &content);
        info!(
            ?state,
            characters = characters.len(),
            scenes = content.scenes().len(),
            suggestions = casting.len(),
            "Screenplay generation complete"
        );

        Ok(Screenplay::new(project, characters, content, casting))
    }

    /// Regenerate only the characters, replacing the persisted set.
    ///
    /// Requires an active subscription; does not consume usage.
    #[instrument(skip(self), fields(project = %project_id, caller = %caller))]
    pub async fn generate_characters_only(
        &self,
        project_id: &ProjectId,
        caller: &AccountId,
    ) -> ClaquetteResult<Vec<CharacterRecord>> {
        self.subscribed_caller(caller, "generate_characters").await?;
        let project = self.repository.load_project(project_id).await?;
        project.brief().validate()?;

        let mut uow = self.repository.begin(project_id).await?;
        let characters = self.run_characters(&project).await?;
        uow.save_characters(&characters).await?;
        uow.commit().await?;

        info!(count = characters.len(), "Characters regenerated");
        Ok(characters)
    }

    /// Regenerate every episode of a series from the persisted characters.
    ///
    /// Requires an active subscription; does not consume usage.
    ///
    /// # Errors
    ///
    /// `InputError` for a film project or when no characters are persisted.
    #[instrument(skip(self), fields(project = %project_id, caller = %caller))]
    pub async fn generate_episodes(
        &self,
        project_id: &ProjectId,
        caller: &AccountId,
    ) -> ClaquetteResult<Vec<EpisodeRecord>> {
        self.subscribed_caller(caller, "generate_episodes").await?;
        let project = self.repository.load_project(project_id).await?;
        if *project.brief().kind() != ProjectKind::Series {
            return Err(InputError::new("Episodes can only be generated for series projects").into());
        }
        project.brief().validate()?;
        let context = self.persisted_context(&project).await?;

        let mut uow = self.repository.begin(project_id).await?;
        let episodes = self.run_episodes(&context, uow.as_mut()).await?;
        uow.commit().await?;

        info!(count = episodes.len(), "Episodes regenerated");
        Ok(episodes)
    }

    /// Regenerate the film from the persisted characters.
    ///
    /// Requires an active subscription; does not consume usage.
    ///
    /// # Errors
    ///
    /// `InputError` for a series project or when no characters are persisted.
    #[instrument(skip(self), fields(project = %project_id, caller = %caller))]
    pub async fn generate_film(
        &self,
        project_id: &ProjectId,
        caller: &AccountId,
    ) -> ClaquetteResult<FilmRecord> {
        self.subscribed_caller(caller, "generate_film").await?;
        let project = self.repository.load_project(project_id).await?;
        if *project.brief().kind() != ProjectKind::Film {
            return Err(InputError::new("A film can only be generated for film projects").into());
        }
        project.brief().validate()?;
        let context = self.persisted_context(&project).await?;

        let mut uow = self.repository.begin(project_id).await?;
        let film = self.run_film(&context).await?;
        uow.save_film(&film).await?;
        uow.commit().await?;

        info!(scenes = film.scenes().len(), "Film regenerated");
        Ok(film)
    }

    /// Regenerate casting for the persisted characters, replacing prior suggestions.
    ///
    /// Requires an active subscription; does not consume usage.
    #[instrument(skip(self), fields(project = %project_id, caller = %caller))]
    pub async fn generate_casting(
        &self,
        project_id: &ProjectId,
        caller: &AccountId,
    ) -> ClaquetteResult<Vec<CastingSuggestion>> {
        self.subscribed_caller(caller, "generate_casting").await?;
        let project = self.repository.load_project(project_id).await?;
        let context = self.persisted_context(&project).await?;

        let mut uow = self.repository.begin(project_id).await?;
        let casting = self.run_casting(&project, &context).await?;
        uow.save_casting(&casting).await?;
        uow.commit().await?;

        info!(count = casting.len(), "Casting regenerated");
        Ok(casting)
    }

    async fn run_characters(&self, project: &Project) -> ClaquetteResult<Vec<CharacterRecord>> {
        let prompt = self.composer.compose_characters(project.brief());
        let json = self.gateway.complete_text(&prompt).await?;
        let characters = extract_characters(&json)?;
        if characters.is_empty() {
            return Err(MalformedResponseError::new(
                MalformedResponseKind::MissingSection("characters".to_string()),
                &json,
            )
            .into());
        }
        debug!(count = characters.len(), "Character stage complete");
        Ok(characters)
    }

    async fn run_episodes(
        &self,
        context: &GenerationContext,
        uow: &mut dyn UnitOfWork,
    ) -> ClaquetteResult<Vec<EpisodeRecord>> {
        let count = context.brief().episodes();
        let mut episodes = Vec::new();

        for index in 1..=count {
            let prompt =
                self.composer
                    .compose_episodes(context.brief(), count, index, context.names());
            let json = self.gateway.complete_text(&prompt).await?;
            let episode = extract_episode(&json, index, context)?;
            let warnings = validate(episode.scenes(), context.names());
            debug!(
                index,
                scenes = episode.scenes().len(),
                warnings = warnings.len(),
                "Episode stage complete"
            );
            uow.save_episode(&episode).await?;
            episodes.push(episode);
        }

        Ok(episodes)
    }

    async fn run_film(&self, context: &GenerationContext) -> ClaquetteResult<FilmRecord> {
        let prompt = self.composer.compose_film(context.brief(), context.names());
        let json = self.gateway.complete_text(&prompt).await?;
        let film = extract_film(&json, context)?;
        let warnings = validate(film.scenes(), context.names());
        debug!(
            scenes = film.scenes().len(),
            warnings = warnings.len(),
            "Film stage complete"
        );
        Ok(film)
    }

    async fn run_casting(
        &self,
        project: &Project,
        context: &GenerationContext,
    ) -> ClaquetteResult<Vec<CastingSuggestion>> {
        let prompt = self
            .composer
            .compose_casting(&project.summary_line(), context.names());
        let json = self.gateway.complete_text(&prompt).await?;
        let casting = extract_casting(&json, context)?;

        let uncast: Vec<&String> = context
            .characters()
            .iter()
            .filter(|c| !casting.iter().any(|s| s.character_id() == c.id()))
            .map(|c| c.name())
            .collect();
        if !uncast.is_empty() {
            debug!(?uncast, "Characters without casting suggestions");
        }
        Ok(casting)
    }
}

impl<D: ImageGeneration> PipelineOrchestrator<D> {
    /// Generate a poster from the brief and store it on the project.
    ///
    /// Requires an active subscription; does not consume usage.
    #[instrument(skip(self), fields(project = %project_id, caller = %caller))]
    pub async fn generate_poster(
        &self,
        project_id: &ProjectId,
        caller: &AccountId,
    ) -> ClaquetteResult<Project> {
        self.subscribed_caller(caller, "generate_poster").await?;
        let project = self.repository.load_project(project_id).await?;
        project.brief().validate()?;

        let prompt = self.composer.compose_poster(project.title(), project.brief());
        let image = self.gateway.generate_image(&prompt).await?;

        let mut uow = self.repository.begin(project_id).await?;
        uow.save_poster(&image).await?;
        uow.commit().await?;

        info!(bytes = image.len(), "Poster stored");
        Ok(project.with_poster(image))
    }
}

fn log_relationship_summary(characters: &[CharacterRecord], content: &ScreenplayContent) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let scenes = content.scenes();
    let mut appearances: BTreeMap<&str, usize> = BTreeMap::new();
    for character in characters {
        let count = scenes
            .iter()
            .filter(|scene| scene.characters().contains(character.id()))
            .count();
        appearances.insert(character.name().as_str(), count);
    }
    let ensemble = scenes
        .iter()
        .filter(|scene| scene.characters().len() > 1)
        .count();
    debug!(?appearances, ensemble_scenes = ensemble, "Character relationship summary");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_path() {
        let mut state = PipelineState::CharactersPending;
        let mut seen = vec![state];
        while state != PipelineState::Complete {
            state = state.advance(ProjectKind::Series);
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                PipelineState::CharactersPending,
                PipelineState::CharactersReady,
                PipelineState::EpisodesPending,
                PipelineState::ContentReady,
                PipelineState::CastingPending,
                PipelineState::Complete,
            ]
        );
    }

    #[test]
    fn test_film_path_and_terminal_state() {
        let state = PipelineState::CharactersReady.advance(ProjectKind::Film);
        assert_eq!(state, PipelineState::FilmPending);
        assert_eq!(
            PipelineState::Complete.advance(ProjectKind::Film),
            PipelineState::Complete
        );
    }
}
