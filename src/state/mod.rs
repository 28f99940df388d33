use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{dao::game_store::GameStore, error::ServiceError, services::lookup::GameLookup};

pub type SharedState = Arc<AppState>;

/// Central application state holding the storage handle and the name lookup.
pub struct AppState {
    game_store: RwLock<Option<Arc<dyn GameStore>>>,
    lookup: Arc<dyn GameLookup>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(lookup: Arc<dyn GameLookup>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            game_store: RwLock::new(None),
            lookup,
            degraded: degraded_tx,
        })
    }

    /// Build a state with `store` already installed.
    pub async fn with_store(
        store: Arc<dyn GameStore>,
        lookup: Arc<dyn GameLookup>,
    ) -> SharedState {
        let state = Self::new(lookup);
        state.set_game_store(store).await;
        state
    }

    /// Obtain a handle to the current game store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Same as [`Self::game_store`] but failing with [`ServiceError::Degraded`].
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStore>, ServiceError> {
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new game store implementation and leave degraded mode.
    pub async fn set_game_store(&self, store: Arc<dyn GameStore>) {
        {
            let mut guard = self.game_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    pub fn lookup(&self) -> &Arc<dyn GameLookup> {
        &self.lookup
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dao::game_store::memory::MemoryGameStore, services::lookup::CatalogLookup};

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new(Arc::new(CatalogLookup::default()));
        assert!(state.is_degraded().await);
        assert!(matches!(
            state.require_game_store().await,
            Err(ServiceError::Degraded)
        ));

        let mut watcher = state.degraded_watcher();
        state.set_game_store(Arc::new(MemoryGameStore::new())).await;

        assert!(!state.is_degraded().await);
        assert!(watcher.has_changed().unwrap());
        assert!(!*watcher.borrow_and_update());
        assert!(state.require_game_store().await.is_ok());
    }

    #[tokio::test]
    async fn unchanged_flag_is_not_rebroadcast() {
        let state = AppState::new(Arc::new(CatalogLookup::default()));
        let watcher = state.degraded_watcher();
        state.update_degraded(true).await;
        assert!(!watcher.has_changed().unwrap());
    }
}
