use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{
    entities::prototype::{Prototype, PrototypeDraft},
    errors::AppError,
    repositories::prototype::PrototypeRepository,
    use_cases::{
        focus::{FocusEvents, FocusSubscription},
        sync_state::{StoreSnapshot, SyncedCollection},
    },
};

/// Single authoritative copy of the prototype collection.
///
/// Mutations never touch the held collection directly: each successful
/// call is followed by a full reload from the backend.
pub struct PrototypeStore<R>
where
    R: PrototypeRepository,
{
    pub prototype_repo: R,
    state: RwLock<SyncedCollection<Prototype>>,
}

impl<R> PrototypeStore<R>
where
    R: PrototypeRepository,
{
    pub fn new(prototype_repo: R) -> Self {
        PrototypeStore {
            prototype_repo,
            state: RwLock::new(SyncedCollection::new()),
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot<Prototype> {
        self.state.read().snapshot()
    }

    pub fn prototypes(&self) -> Vec<Prototype> {
        self.state.read().items().to_vec()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    /// Replaces the collection with what the backend reports.
    ///
    /// On failure the previous collection stays and the error is recorded.
    pub async fn load(&self) {
        self.state.write().begin_load();

        match self.prototype_repo.list_prototypes().await {
            Ok(prototypes) => {
                debug!(count = prototypes.len(), "prototypes loaded");
                self.state.write().finish_ok(prototypes);
            }
            Err(e) => {
                warn!("Failed to load prototypes: {}", e);
                self.state.write().finish_err(format!("Failed to load prototypes: {}", e));
            }
        }
    }

    /// Validates `draft` against the loaded titles, creates it, then resyncs.
    pub async fn create(&self, draft: PrototypeDraft) -> Result<Prototype, AppError> {
        {
            let state = self.state.read();
            draft.validate_against(state.items(), None)?;
        }

        let created = self.prototype_repo.create_prototype(&draft.into_prototype(None)).await?;
        info!(id = ?created.id, title = %created.title, "prototype created");

        self.resynchronize().await;
        Ok(created)
    }

    /// Saves an existing prototype (`id` required), then resyncs.
    pub async fn update(&self, prototype: Prototype) -> Result<Prototype, AppError> {
        let id = prototype
            .id
            .ok_or_else(|| AppError::validation("id", "Prototype id is required for update."))?;

        {
            let state = self.state.read();
            prototype.draft().validate_against(state.items(), Some(id))?;
        }

        let updated = self.prototype_repo.update_prototype(id, &prototype).await?;
        info!(id, title = %updated.title, "prototype updated");

        self.resynchronize().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.prototype_repo.delete_prototype(id).await?;
        info!(id, "prototype deleted");

        self.resynchronize().await;
        Ok(())
    }

    /// The backend is the only authority on the collection; after a
    /// successful mutation the whole list is fetched again.
    async fn resynchronize(&self) {
        self.load().await;
    }
}

impl<R> PrototypeStore<R>
where
    R: PrototypeRepository + 'static,
{
    /// Reloads the collection whenever `events` reports a focus gain.
    pub fn watch_focus(self: &Arc<Self>, events: &FocusEvents) -> FocusSubscription {
        let store = Arc::clone(self);
        events.subscribe(move || {
            let store = Arc::clone(&store);
            async move {
                debug!("window focused, reloading prototypes");
                store.load().await;
            }
        })
    }
}
