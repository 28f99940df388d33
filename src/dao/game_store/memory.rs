//! In-process [`GameStore`] used by tests and by `STORAGE_BACKEND=memory`.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    game_store::GameStore,
    models::{GameEntity, GameFieldsUpdate},
    storage::{StorageError, StorageResult},
};

/// Games kept in insertion order, mirroring a document store's natural order.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    games: Arc<RwLock<IndexMap<Uuid, GameEntity>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-existing games as if they had been created earlier.
    pub fn with_games(games: impl IntoIterator<Item = GameEntity>) -> Self {
        let games = games.into_iter().map(|game| (game.id, game)).collect();
        Self {
            games: Arc::new(RwLock::new(games)),
            offline: Arc::default(),
        }
    }

    /// Make every subsequent operation fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> StorageResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(
                "in-memory store is offline".into(),
                io::Error::new(io::ErrorKind::NotConnected, "offline"),
            ));
        }
        Ok(())
    }
}

impl GameStore for MemoryGameStore {
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store.ensure_online()?;
            Ok(store.games.read().await.values().cloned().collect())
        })
    }

    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.ensure_online()?;
            store.games.write().await.insert(game.id, game);
            Ok(())
        })
    }

    fn update_fields(
        &self,
        id: Uuid,
        update: GameFieldsUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store.ensure_online()?;
            let mut games = store.games.write().await;
            Ok(games.get_mut(&id).map(|game| {
                game.apply_fields(update);
                game.clone()
            }))
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ensure_online() })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.health_check()
    }
}
