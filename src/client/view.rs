use std::collections::HashMap;

use tracing::{info, warn};

use super::{
    cache::CollectionCache,
    editor::{CommitError, EditError, GameEditController},
    sync::{SyncError, SyncService},
};
use crate::dto::game::CreateOutcome;

/// State of the "add a game" text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddGameForm {
    name: String,
    name_error: bool,
}

impl AddGameForm {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set after a name failed to resolve; cleared by the next successful add.
    pub fn name_error(&self) -> bool {
        self.name_error
    }

    /// Hint shown under the field.
    pub fn helper_text(&self) -> &'static str {
        if self.name_error {
            "Check the spelling."
        } else {
            "Press 'Enter' to submit."
        }
    }
}

/// The collection screen: single owner of the cache and of every edit session.
///
/// Consumers receive the cache and the refresh capability through this value instead of
/// reaching for shared global state.
pub struct CollectionView<S> {
    sync: S,
    cache: CollectionCache,
    form: AddGameForm,
    editors: HashMap<String, GameEditController>,
    mounted: bool,
}

impl<S: SyncService> CollectionView<S> {
    pub fn new(sync: S) -> Self {
        Self {
            sync,
            cache: CollectionCache::new(),
            form: AddGameForm::default(),
            editors: HashMap::new(),
            mounted: false,
        }
    }

    /// First display: populate the cache once. Later calls are no-ops.
    pub async fn mount(&mut self) -> Result<(), SyncError> {
        if self.mounted {
            return Ok(());
        }
        self.cache.refresh(&self.sync).await?;
        self.mounted = true;
        Ok(())
    }

    /// Reload the whole collection from the server.
    pub async fn refresh(&mut self) -> Result<(), SyncError> {
        self.cache.refresh(&self.sync).await
    }

    pub fn cache(&self) -> &CollectionCache {
        &self.cache
    }

    pub fn sync(&self) -> &S {
        &self.sync
    }

    pub fn form(&self) -> &AddGameForm {
        &self.form
    }

    pub fn set_name_input(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    /// Add the game typed in the form.
    ///
    /// An unresolved name raises the form's error flag and leaves the cache untouched. A
    /// created game clears the form and refreshes the collection; a refresh failure is
    /// returned after the form has been reset.
    pub async fn submit_new_game(&mut self) -> Result<CreateOutcome, SyncError> {
        let outcome = match self.sync.create(&self.form.name).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(name = %self.form.name, error = %err, "failed to add game");
                return Err(err);
            }
        };

        match &outcome {
            CreateOutcome::Unresolved => {
                info!(name = %self.form.name, "game name did not resolve");
                self.form.name_error = true;
            }
            CreateOutcome::Created(record) => {
                info!(id = %record.id, name = %record.name, "game added");
                self.form = AddGameForm::default();
                self.cache.refresh(&self.sync).await?;
            }
        }

        Ok(outcome)
    }

    /// The controller of one game, created on first use.
    ///
    /// There is exactly one controller per game id, hence at most one edit session per record.
    pub fn editor(&mut self, id: &str) -> &mut GameEditController {
        self.editors
            .entry(id.to_owned())
            .or_insert_with(|| GameEditController::new(id))
    }

    /// Read-only access to a controller that has already been used.
    pub fn existing_editor(&self, id: &str) -> Option<&GameEditController> {
        self.editors.get(id)
    }

    /// The "update" action of a record.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), EditError> {
        let Self { cache, editors, .. } = self;
        editors
            .entry(id.to_owned())
            .or_insert_with(|| GameEditController::new(id))
            .begin_edit(cache)
    }

    pub fn stage_rating(&mut self, id: &str, rating: f64) -> Result<(), EditError> {
        self.editor(id).stage_rating(rating)
    }

    pub fn stage_notes(&mut self, id: &str, notes: impl Into<String>) -> Result<(), EditError> {
        self.editor(id).stage_notes(notes)
    }

    /// The "save" action of a record.
    pub async fn commit(&mut self, id: &str) -> Result<(), CommitError> {
        let Self {
            sync,
            cache,
            editors,
            ..
        } = self;
        let editor = editors
            .get_mut(id)
            .ok_or(CommitError::Edit(EditError::NotEditing))?;
        editor.commit(&*sync, cache).await
    }

    /// Notes confirmed with Enter: stage and save in one gesture.
    pub async fn submit_notes(
        &mut self,
        id: &str,
        notes: impl Into<String>,
    ) -> Result<(), CommitError> {
        let Self {
            sync,
            cache,
            editors,
            ..
        } = self;
        let editor = editors
            .get_mut(id)
            .ok_or(CommitError::Edit(EditError::NotEditing))?;
        editor.submit_notes(notes, &*sync, cache).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::client::{
        editor::EditState,
        fake::{FakeSync, record},
    };

    fn view_with(games: Vec<crate::dto::game::GameRecord>) -> CollectionView<FakeSync> {
        let mut sync = FakeSync::with_games(games);
        sync.resolvable = vec!["Azul".into()];
        CollectionView::new(sync)
    }

    #[tokio::test]
    async fn mount_populates_once() {
        let mut view = view_with(vec![record("g1", "Catan")]);
        view.mount().await.unwrap();
        view.mount().await.unwrap();

        assert_eq!(view.cache().len(), 1);
        assert_eq!(view.sync().list_calls(), 1);
    }

    #[tokio::test]
    async fn failed_mount_can_be_retried() {
        let mut view = view_with(vec![record("g1", "Catan")]);
        view.sync().fail_lists.store(true, Ordering::SeqCst);
        assert!(view.mount().await.is_err());

        view.sync().fail_lists.store(false, Ordering::SeqCst);
        view.mount().await.unwrap();
        assert_eq!(view.cache().len(), 1);
    }

    #[tokio::test]
    async fn unresolved_name_flags_the_form_and_skips_refresh() {
        let mut view = view_with(vec![record("g1", "Catan")]);
        view.mount().await.unwrap();
        let generation = view.cache().generation();

        view.set_name_input("Nonexistent Game XYZ");
        let outcome = view.submit_new_game().await.unwrap();

        assert_eq!(outcome, CreateOutcome::Unresolved);
        assert!(view.form().name_error());
        assert_eq!(view.form().name(), "Nonexistent Game XYZ");
        assert_eq!(view.form().helper_text(), "Check the spelling.");
        assert_eq!(view.cache().generation(), generation);
        assert_eq!(view.cache().len(), 1);
    }

    #[tokio::test]
    async fn created_game_clears_the_form_and_refreshes() {
        let mut view = view_with(vec![record("g1", "Catan")]);
        view.mount().await.unwrap();

        view.set_name_input("Nope");
        view.submit_new_game().await.unwrap();
        view.set_name_input("Azul");
        let outcome = view.submit_new_game().await.unwrap();

        assert!(matches!(outcome, CreateOutcome::Created(ref game) if game.name == "Azul"));
        assert_eq!(view.form(), &AddGameForm::default());
        assert_eq!(view.cache().len(), 2);
        assert_eq!(view.sync().list_calls(), 2);
    }

    #[tokio::test]
    async fn edit_sessions_are_per_record() {
        let mut view = view_with(vec![record("g1", "Catan"), record("g2", "Azul")]);
        view.mount().await.unwrap();

        view.begin_edit("g1").unwrap();
        assert_eq!(view.begin_edit("g1"), Err(EditError::AlreadyEditing));
        view.begin_edit("g2").unwrap();

        view.stage_rating("g1", 4.5).unwrap();
        view.stage_notes("g1", "fun").unwrap();
        view.commit("g1").await.unwrap();

        assert_eq!(view.existing_editor("g1").unwrap().state(), &EditState::Viewing);
        assert!(view.existing_editor("g2").unwrap().is_editing());
        let catan = view.cache().get("g1").unwrap();
        assert_eq!((catan.rating, catan.notes.as_str()), (4.5, "fun"));
    }

    #[tokio::test]
    async fn commit_without_session_is_rejected() {
        let mut view = view_with(vec![record("g1", "Catan")]);
        view.mount().await.unwrap();

        assert!(matches!(
            view.commit("g1").await,
            Err(CommitError::Edit(EditError::NotEditing))
        ));
        assert!(matches!(
            view.submit_notes("g1", "x").await,
            Err(CommitError::Edit(EditError::NotEditing))
        ));
    }

    #[tokio::test]
    async fn notes_submission_commits_through_the_view() {
        let mut view = view_with(vec![record("g1", "Catan")]);
        view.mount().await.unwrap();

        view.begin_edit("g1").unwrap();
        view.submit_notes("g1", "trading is key").await.unwrap();

        assert_eq!(view.cache().get("g1").unwrap().notes, "trading is key");
        assert!(!view.editor("g1").is_editing());
    }
}
