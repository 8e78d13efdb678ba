//! In-memory implementation of ScreenplayRepository.
//!
//! Stores projects and accounts in HashMaps behind an RwLock. A unit of work
//! buffers its writes and applies them in one write-locked step on commit, so
//! an abandoned unit leaves nothing behind. Charged accounts are checked
//! against their quota again under that lock. All data is lost when the
//! repository is dropped.

use async_trait::async_trait;
use claquette_core::{
    Account, AccountId, CastingSuggestion, CharacterRecord, EpisodeRecord, FilmRecord, Project,
    ProjectId,
};
use claquette_error::{
    ClaquetteResult, EntitlementError, EntitlementErrorKind, StorageError, StorageErrorKind,
};
use claquette_interface::{ScreenplayRepository, UnitOfWork};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Everything persisted for one project.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ProjectSnapshot {
    /// The project, including any poster
    project: Project,
    /// Canonical characters
    characters: Vec<CharacterRecord>,
    /// Episodes ordered by index
    episodes: Vec<EpisodeRecord>,
    /// Film, for film projects
    film: Option<FilmRecord>,
    /// Casting suggestions
    casting: Vec<CastingSuggestion>,
}

impl ProjectSnapshot {
    fn new(project: Project) -> Self {
        Self {
            project,
            characters: Vec::new(),
            episodes: Vec::new(),
            film: None,
            casting: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    projects: HashMap<ProjectId, ProjectSnapshot>,
    accounts: HashMap<AccountId, Account>,
}

/// In-memory screenplay repository.
///
/// # Example
/// ```
/// use claquette_core::{Account, Project, StoryBrief};
/// use claquette_screenplay::InMemoryScreenplayRepository;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let repo = InMemoryScreenplayRepository::new();
/// let project = Project::new("Vault", StoryBrief::film("A heist"));
/// let id = *project.id();
/// repo.insert_project(project).await;
/// repo.insert_account(Account::new(true, 0)).await;
///
/// let snapshot = repo.snapshot(&id).await.unwrap();
/// assert!(snapshot.characters().is_empty());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryScreenplayRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryScreenplayRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project.
    pub async fn insert_project(&self, project: Project) {
        let mut store = self.store.write().await;
        store
            .projects
            .insert(*project.id(), ProjectSnapshot::new(project));
    }

    /// Register an account.
    pub async fn insert_account(&self, account: Account) {
        self.store
            .write()
            .await
            .accounts
            .insert(*account.id(), account);
    }

    /// Current persisted state of a project.
    pub async fn snapshot(&self, id: &ProjectId) -> Option<ProjectSnapshot> {
        self.store.read().await.projects.get(id).cloned()
    }

    /// Current state of an account.
    pub async fn account(&self, id: &AccountId) -> Option<Account> {
        self.store.read().await.accounts.get(id).cloned()
    }
}

#[async_trait]
impl ScreenplayRepository for InMemoryScreenplayRepository {
    async fn load_project(&self, id: &ProjectId) -> ClaquetteResult<Project> {
        self.store
            .read()
            .await
            .projects
            .get(id)
            .map(|snapshot| snapshot.project.clone())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::ProjectNotFound(id.to_string())).into()
            })
    }

    async fn load_account(&self, id: &AccountId) -> ClaquetteResult<Account> {
        self.account(id).await.ok_or_else(|| {
            StorageError::new(StorageErrorKind::AccountNotFound(id.to_string())).into()
        })
    }

    async fn load_characters(&self, project: &ProjectId) -> ClaquetteResult<Vec<CharacterRecord>> {
        self.store
            .read()
            .await
            .projects
            .get(project)
            .map(|snapshot| snapshot.characters.clone())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::ProjectNotFound(project.to_string())).into()
            })
    }

    async fn begin(&self, project: &ProjectId) -> ClaquetteResult<Box<dyn UnitOfWork>> {
        debug!(project = %project, "Beginning unit of work");
        Ok(Box::new(InMemoryUnitOfWork {
            store: Arc::clone(&self.store),
            project: *project,
            staged: StagedWrites::default(),
        }))
    }
}

#[derive(Debug, Default)]
struct StagedWrites {
    characters: Option<Vec<CharacterRecord>>,
    episodes: Option<Vec<EpisodeRecord>>,
    film: Option<FilmRecord>,
    casting: Option<Vec<CastingSuggestion>>,
    poster: Option<String>,
    usage: Vec<AccountId>,
}

struct InMemoryUnitOfWork {
    store: Arc<RwLock<Store>>,
    project: ProjectId,
    staged: StagedWrites,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn save_characters(&mut self, characters: &[CharacterRecord]) -> ClaquetteResult<()> {
        self.staged.characters = Some(characters.to_vec());
        Ok(())
    }

    async fn save_episode(&mut self, episode: &EpisodeRecord) -> ClaquetteResult<()> {
        let episodes = self.staged.episodes.get_or_insert_with(Vec::new);
        episodes.retain(|e| e.index() != episode.index());
        episodes.push(episode.clone());
        episodes.sort_by_key(|e| *e.index());
        Ok(())
    }

    async fn save_film(&mut self, film: &FilmRecord) -> ClaquetteResult<()> {
        self.staged.film = Some(film.clone());
        Ok(())
    }

    async fn save_casting(&mut self, casting: &[CastingSuggestion]) -> ClaquetteResult<()> {
        self.staged.casting = Some(casting.to_vec());
        Ok(())
    }

    async fn save_poster(&mut self, poster: &str) -> ClaquetteResult<()> {
        self.staged.poster = Some(poster.to_string());
        Ok(())
    }

    async fn decrement_usage(&mut self, account: &AccountId) -> ClaquetteResult<()> {
        self.staged.usage.push(*account);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> ClaquetteResult<()> {
        let InMemoryUnitOfWork {
            store,
            project,
            staged,
        } = *self;
        let mut store = store.write().await;

        if !store.projects.contains_key(&project) {
            return Err(StorageError::new(StorageErrorKind::CommitFailed(format!(
                "project {} no longer exists",
                project
            )))
            .into());
        }
        if let Some(missing) = staged
            .usage
            .iter()
            .find(|id| !store.accounts.contains_key(*id))
        {
            return Err(StorageError::new(StorageErrorKind::AccountNotFound(
                missing.to_string(),
            ))
            .into());
        }

        let mut charged: HashMap<AccountId, Account> = HashMap::new();
        for id in &staged.usage {
            let Some(current) = charged.get(id).or_else(|| store.accounts.get(id)).cloned() else {
                continue;
            };
            if !current.may_generate() {
                warn!(account = %id, project = %project, "Quota exhausted at commit");
                return Err(EntitlementError::new(EntitlementErrorKind::QuotaExhausted(
                    id.to_string(),
                ))
                .into());
            }
            charged.insert(*id, current.decremented());
        }
        store.accounts.extend(charged);

        if let Some(snapshot) = store.projects.get_mut(&project) {
            if let Some(characters) = staged.characters {
                snapshot.characters = characters;
            }
            if let Some(episodes) = staged.episodes {
                snapshot.episodes = episodes;
            }
            if let Some(film) = staged.film {
                snapshot.film = Some(film);
            }
            if let Some(casting) = staged.casting {
                snapshot.casting = casting;
            }
            if let Some(poster) = staged.poster {
                snapshot.project = snapshot.project.clone().with_poster(poster);
            }
        }

        debug!(project = %project, "Committed unit of work");
        Ok(())
    }
}
