//! Client half of the record synchronization workflow.
//!
//! A [`CollectionView`] owns the [`CollectionCache`] and one [`GameEditController`] per
//! displayed game. Every successful mutation is followed by a full refresh of the cache from
//! the server; no record is ever patched locally.

pub mod cache;
pub mod editor;
#[cfg(test)]
mod fake;
pub mod sync;
pub mod view;

pub use cache::CollectionCache;
pub use editor::{
    CommitError, DisplayedFields, EditError, EditState, GameEditController, StagedEdit,
};
pub use sync::{HttpSyncClient, SyncError, SyncService};
pub use view::{AddGameForm, CollectionView};
