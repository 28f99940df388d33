use thiserror::Error;
use tracing::{debug, warn};

use super::{
    cache::CollectionCache,
    sync::{SyncError, SyncService},
};
use crate::dto::{game::UpdateGameFieldsRequest, validation::validate_rating};

/// Locally held candidate values, not yet sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedEdit {
    pub rating: f64,
    pub notes: String,
}

/// Edit mode of one displayed game.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    /// Rating and notes are shown read-only, straight from the cache.
    #[default]
    Viewing,
    /// The user is changing a staged copy of rating and notes.
    Editing(StagedEdit),
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("game is not being edited")]
    NotEditing,
    #[error("game is already being edited")]
    AlreadyEditing,
    #[error("game `{0}` is not in the collection")]
    UnknownGame(String),
    #[error("rating {0} must be between 0 and 5 in steps of 0.5")]
    InvalidRating(f64),
}

/// Why a commit did not complete.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error(transparent)]
    Edit(#[from] EditError),
    /// The update was not stored; the staged values are still held.
    #[error("failed to save rating and notes")]
    Save(#[source] SyncError),
    /// The update was stored but the collection could not be reloaded.
    #[error("saved, but failed to refresh the collection")]
    Refresh(#[source] SyncError),
}

/// Rating and notes as the view should render them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayedFields<'a> {
    pub rating: f64,
    pub notes: &'a str,
    /// True while the user may change the values.
    pub editable: bool,
}

/// Per-record controller moving rating/notes between the staged copy and the server.
#[derive(Debug, Clone)]
pub struct GameEditController {
    game_id: String,
    state: EditState,
}

impl GameEditController {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            state: EditState::Viewing,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// `Viewing → Editing`, seeding the staged copy from the cached record.
    pub fn begin_edit(&mut self, cache: &CollectionCache) -> Result<(), EditError> {
        if self.is_editing() {
            return Err(EditError::AlreadyEditing);
        }
        let game = cache
            .get(&self.game_id)
            .ok_or_else(|| EditError::UnknownGame(self.game_id.clone()))?;

        self.state = EditState::Editing(StagedEdit {
            rating: game.rating,
            notes: game.notes.clone(),
        });
        Ok(())
    }

    /// Change the staged rating. No network traffic happens until [`Self::commit`].
    pub fn stage_rating(&mut self, rating: f64) -> Result<(), EditError> {
        if validate_rating(&rating).is_err() {
            return Err(EditError::InvalidRating(rating));
        }
        self.staged_mut()?.rating = rating;
        Ok(())
    }

    /// Change the staged notes. No network traffic happens until [`Self::commit`].
    pub fn stage_notes(&mut self, notes: impl Into<String>) -> Result<(), EditError> {
        self.staged_mut()?.notes = notes.into();
        Ok(())
    }

    /// Send the staged pair and, once stored, reload the whole collection.
    ///
    /// Both fields are always sent together. On a failed save the controller stays in
    /// `Editing` with the staged values and the cache is left alone, so the user can retry.
    /// After a successful save the controller is back in `Viewing` even if the refresh fails.
    pub async fn commit<S>(
        &mut self,
        sync: &S,
        cache: &mut CollectionCache,
    ) -> Result<(), CommitError>
    where
        S: SyncService + ?Sized,
    {
        let EditState::Editing(staged) = &self.state else {
            return Err(EditError::NotEditing.into());
        };
        let fields = UpdateGameFieldsRequest::pair(staged.rating, staged.notes.clone());

        if let Err(err) = sync.update_fields(&self.game_id, fields).await {
            warn!(id = %self.game_id, error = %err, "failed to save rating and notes");
            return Err(CommitError::Save(err));
        }

        // The server copy is authoritative from here on; the response body is not rendered.
        self.state = EditState::Viewing;
        debug!(id = %self.game_id, "rating and notes saved; refreshing collection");
        cache.refresh(sync).await.map_err(CommitError::Refresh)
    }

    /// Notes confirmed from the text field: stage them and commit in one gesture.
    pub async fn submit_notes<S>(
        &mut self,
        notes: impl Into<String>,
        sync: &S,
        cache: &mut CollectionCache,
    ) -> Result<(), CommitError>
    where
        S: SyncService + ?Sized,
    {
        self.stage_notes(notes)?;
        self.commit(sync, cache).await
    }

    /// What to render: the staged copy while editing, the cached record otherwise.
    pub fn displayed<'a>(&'a self, cache: &'a CollectionCache) -> Option<DisplayedFields<'a>> {
        match &self.state {
            EditState::Editing(staged) => Some(DisplayedFields {
                rating: staged.rating,
                notes: &staged.notes,
                editable: true,
            }),
            EditState::Viewing => cache.get(&self.game_id).map(|game| DisplayedFields {
                rating: game.rating,
                notes: &game.notes,
                editable: false,
            }),
        }
    }

    fn staged_mut(&mut self) -> Result<&mut StagedEdit, EditError> {
        match &mut self.state {
            EditState::Editing(staged) => Ok(staged),
            EditState::Viewing => Err(EditError::NotEditing),
        }
    }
}
