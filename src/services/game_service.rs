use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dao::models::GameEntity,
    dto::game::{CreateGameRequest, CreateOutcome, GameRecord, UpdateGameFieldsRequest},
    error::ServiceError,
    state::SharedState,
};

/// Return every stored game in the store's default order.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameRecord>, ServiceError> {
    let store = state.require_game_store().await?;
    let games = store.list_games().await?;
    Ok(games.into_iter().map(Into::into).collect())
}

/// Resolve `name` through the lookup and store the resulting game.
///
/// Name resolution is best-effort: blank names, unknown names and lookup outages all yield
/// [`CreateOutcome::Unresolved`] rather than an error.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<CreateOutcome, ServiceError> {
    let name = request.name.trim();
    if name.is_empty() {
        debug!("ignoring create request with a blank name");
        return Ok(CreateOutcome::Unresolved);
    }

    let details = match state.lookup().resolve(name).await {
        Ok(Some(details)) => details,
        Ok(None) => {
            info!(%name, "game name did not resolve");
            return Ok(CreateOutcome::Unresolved);
        }
        Err(err) => {
            warn!(%name, error = %err, "game lookup failed; treating name as unresolved");
            return Ok(CreateOutcome::Unresolved);
        }
    };

    let store = state.require_game_store().await?;
    let game = GameEntity::new(details.into());
    store.insert_game(game.clone()).await?;
    info!(id = %game.id, name = %game.details.name, "game added to collection");

    Ok(CreateOutcome::Created(game.into()))
}

/// Overwrite the rating and notes of the game identified by `id`.
pub async fn update_game_fields(
    state: &SharedState,
    id: &str,
    request: UpdateGameFieldsRequest,
) -> Result<GameRecord, ServiceError> {
    let not_found = || ServiceError::NotFound(format!("game `{id}` not found"));
    let game_id = Uuid::parse_str(id).map_err(|_| not_found())?;

    let store = state.require_game_store().await?;
    let Some(game) = store.update_fields(game_id, request.into()).await? else {
        return Err(not_found());
    };

    debug!(id = %game.id, rating = game.rating, "game rating/notes updated");
    Ok(game.into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        dao::{
            game_store::{GameStore, memory::MemoryGameStore},
            models::GameDetailsEntity,
        },
        dto::game::GameDetails,
        services::lookup::CatalogLookup,
        state::AppState,
    };

    fn catalog() -> Arc<CatalogLookup> {
        Arc::new(CatalogLookup::new(vec![GameDetails {
            name: "Catan".into(),
            min_players: Some(3),
            max_players: Some(4),
            ..Default::default()
        }]))
    }

    async fn state_with(store: MemoryGameStore) -> SharedState {
        AppState::with_store(Arc::new(store), catalog()).await
    }

    #[tokio::test]
    async fn create_resolves_and_stores_with_defaults() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone()).await;

        let outcome = create_game(&state, CreateGameRequest { name: "catan".into() })
            .await
            .unwrap();
        let CreateOutcome::Created(record) = outcome else {
            panic!("expected the name to resolve");
        };

        assert_eq!(record.name, "Catan");
        assert_eq!(record.rating, 0.0);
        assert!(record.notes.is_empty());
        assert!(Uuid::parse_str(&record.id).is_ok());
        assert_eq!(store.list_games().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unresolved_and_blank_names_store_nothing() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone()).await;

        for name in ["Nonexistent Game XYZ", "   "] {
            let outcome = create_game(&state, CreateGameRequest { name: name.into() })
                .await
                .unwrap();
            assert!(matches!(outcome, CreateOutcome::Unresolved));
        }
        assert!(store.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_is_idempotent_and_isolated() {
        let existing = GameEntity::new(GameDetailsEntity {
            name: "Catan".into(),
            year_published: Some(1995),
            ..Default::default()
        });
        let id = existing.id.to_string();
        let state = state_with(MemoryGameStore::with_games([existing.clone()])).await;
        let request = UpdateGameFieldsRequest::pair(4.5, "fun");

        let first = update_game_fields(&state, &id, request.clone()).await.unwrap();
        let second = update_game_fields(&state, &id, request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.rating, 4.5);
        assert_eq!(second.notes, "fun");
        assert_eq!(second.year_published, Some(1995));
        assert_eq!(second.name, "Catan");
    }

    #[tokio::test]
    async fn partial_update_keeps_the_other_field() {
        let mut existing = GameEntity::new(GameDetailsEntity {
            name: "Catan".into(),
            ..Default::default()
        });
        existing.rating = 4.0;
        existing.notes = "fun".into();
        let id = existing.id.to_string();
        let state = state_with(MemoryGameStore::with_games([existing])).await;

        let rating_only = UpdateGameFieldsRequest {
            rating: Some(2.5),
            notes: None,
        };
        let record = update_game_fields(&state, &id, rating_only).await.unwrap();
        assert_eq!((record.rating, record.notes.as_str()), (2.5, "fun"));

        let notes_only = UpdateGameFieldsRequest {
            rating: None,
            notes: Some("better with five".into()),
        };
        let record = update_game_fields(&state, &id, notes_only).await.unwrap();
        assert_eq!((record.rating, record.notes.as_str()), (2.5, "better with five"));
    }

    #[tokio::test]
    async fn update_of_unknown_or_malformed_id_is_not_found() {
        let state = state_with(MemoryGameStore::new()).await;
        let request = UpdateGameFieldsRequest::pair(1.0, "");

        for id in [Uuid::new_v4().to_string(), "g1".to_string()] {
            let err = update_game_fields(&state, &id, request.clone())
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn store_fault_surfaces_as_unavailable() {
        let store = MemoryGameStore::new();
        store.set_offline(true);
        let state = state_with(store).await;

        assert!(matches!(
            list_games(&state).await,
            Err(ServiceError::Unavailable(_))
        ));
    }
}
