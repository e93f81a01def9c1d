//! Async access to projects for the web layer.
//!
//! Handlers talk to a [`ProjectRepository`] instead of the store directly, so
//! `SQLite` calls run off the async runtime and tests can swap in fakes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::project::{NewProject, Project};
use crate::storage::ProjectStore;

/// The project operations the site needs at request time.
#[async_trait]
pub trait ProjectRepository: Send + Sync + std::fmt::Debug {
    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Insert a project and return its id.
    async fn add_project(&self, project: NewProject) -> Result<i64>;
}

/// [`ProjectRepository`] backed by a [`ProjectStore`].
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    store: Arc<Mutex<ProjectStore>>,
}

impl SqliteRepository {
    /// Wrap an open store.
    #[must_use]
    pub fn new(store: ProjectStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` against the store on the blocking thread pool.
    async fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&ProjectStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let guard = store
                .lock()
                .map_err(|_| Error::internal("project store lock poisoned"))?;
            f(&guard)
        })
        .await
        .map_err(|e| Error::internal(format!("storage task failed: {e}")))?
    }
}

#[async_trait]
impl ProjectRepository for SqliteRepository {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.with_store(ProjectStore::get_all_projects).await
    }

    async fn add_project(&self, project: NewProject) -> Result<i64> {
        self.with_store(move |store| store.add_project(&project))
            .await
    }
}
