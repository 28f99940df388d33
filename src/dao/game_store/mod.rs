#[cfg(feature = "couch-store")]
pub mod couchdb;
pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{GameEntity, GameFieldsUpdate};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the document store holding the game collection.
pub trait GameStore: Send + Sync {
    /// Every stored game, in the backend's default order.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Overwrite `rating` and `notes` of a single document in one write.
    ///
    /// Returns the document as stored after the write, or `None` when `id` is unknown.
    fn update_fields(
        &self,
        id: Uuid,
        update: GameFieldsUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
