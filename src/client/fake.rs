//! Scripted [`SyncService`] used by the client unit tests.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use futures::future::BoxFuture;
use reqwest::StatusCode;

use super::sync::{SyncError, SyncService};
use crate::dto::game::{CreateOutcome, GameRecord, UpdateGameFieldsRequest};

#[derive(Default)]
pub struct FakeSync {
    pub games: Mutex<Vec<GameRecord>>,
    pub resolvable: Vec<String>,
    pub fail_updates: AtomicBool,
    pub fail_lists: AtomicBool,
    pub list_calls: AtomicUsize,
    pub update_calls: Mutex<Vec<(String, UpdateGameFieldsRequest)>>,
}

pub fn record(id: &str, name: &str) -> GameRecord {
    GameRecord {
        id: id.into(),
        name: name.into(),
        description: None,
        year_published: None,
        min_players: None,
        max_players: None,
        play_time: None,
        min_age: None,
        thumbnail: None,
        image: None,
        rating: 0.0,
        notes: String::new(),
    }
}

fn server_error(path: &str) -> SyncError {
    SyncError::Status {
        path: path.into(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: Some("store fault".into()),
    }
}

impl FakeSync {
    pub fn with_games(games: Vec<GameRecord>) -> Self {
        Self {
            games: Mutex::new(games),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: &str) -> Option<GameRecord> {
        let games = self.games.lock().unwrap();
        games.iter().find(|game| game.id == id).cloned()
    }
}

impl SyncService for FakeSync {
    fn list(&self) -> BoxFuture<'_, Result<Vec<GameRecord>, SyncError>> {
        Box::pin(async move {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(server_error("/api/games"));
            }
            Ok(self.games.lock().unwrap().clone())
        })
    }

    fn create(&self, name: &str) -> BoxFuture<'_, Result<CreateOutcome, SyncError>> {
        let name = name.trim().to_owned();
        Box::pin(async move {
            if !self.resolvable.iter().any(|known| known == &name) {
                return Ok(CreateOutcome::Unresolved);
            }
            let mut games = self.games.lock().unwrap();
            let created = record(&format!("g{}", games.len() + 1), &name);
            games.push(created.clone());
            Ok(CreateOutcome::Created(created))
        })
    }

    fn update_fields(
        &self,
        id: &str,
        fields: UpdateGameFieldsRequest,
    ) -> BoxFuture<'_, Result<GameRecord, SyncError>> {
        let id = id.to_owned();
        Box::pin(async move {
            self.update_calls
                .lock()
                .unwrap()
                .push((id.clone(), fields.clone()));
            let path = format!("/api/games/{id}");
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(server_error(&path));
            }
            let mut games = self.games.lock().unwrap();
            let game = games
                .iter_mut()
                .find(|game| game.id == id)
                .ok_or_else(|| server_error(&path))?;
            if let Some(rating) = fields.rating {
                game.rating = rating;
            }
            if let Some(notes) = fields.notes {
                game.notes = notes;
            }
            Ok(game.clone())
        })
    }
}
