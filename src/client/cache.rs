use tracing::{debug, warn};

use super::sync::{SyncError, SyncService};
use crate::dto::game::GameRecord;

/// Client-side copy of the whole game collection.
///
/// The only mutator is [`CollectionCache::replace`]: records are never patched individually,
/// so what is displayed is always a snapshot the server produced.
#[derive(Debug, Default)]
pub struct CollectionCache {
    games: Vec<GameRecord>,
    generation: u64,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the held sequence for `games` in one step.
    pub fn replace(&mut self, games: Vec<GameRecord>) {
        self.games = games;
        self.generation += 1;
        debug!(
            count = self.games.len(),
            generation = self.generation,
            "collection cache replaced"
        );
    }

    /// Fetch the full list and [`replace`](Self::replace) the cache with it.
    ///
    /// On failure the current contents are kept as they are.
    pub async fn refresh<S>(&mut self, sync: &S) -> Result<(), SyncError>
    where
        S: SyncService + ?Sized,
    {
        match sync.list().await {
            Ok(games) => {
                self.replace(games);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh game collection");
                Err(err)
            }
        }
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn get(&self, id: &str) -> Option<&GameRecord> {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Number of replacements performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
