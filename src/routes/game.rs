use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use validator::Validate;

use crate::{
    dto::game::{CreateGameRequest, CreateOutcome, GameRecord, UpdateGameFieldsRequest},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes backing the game collection.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/{id}", patch(update_game_fields))
}

/// List every game in the collection.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    responses(
        (status = 200, description = "All games", body = [GameRecord]),
        (status = 500, description = "Store fault")
    )
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameRecord>>, AppError> {
    Ok(Json(game_service::list_games(&state).await?))
}

/// Add a game by name.
///
/// A name that does not resolve is answered with `200` and an empty body.
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameRecord),
        (status = 200, description = "Name did not resolve; empty body"),
        (status = 500, description = "Store fault")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Response, AppError> {
    match game_service::create_game(&state, payload).await? {
        CreateOutcome::Created(record) => Ok((StatusCode::CREATED, Json(record)).into_response()),
        CreateOutcome::Unresolved => Ok(StatusCode::OK.into_response()),
    }
}

/// Replace the rating and notes of a game. Other keys in the body are ignored.
#[utoipa::path(
    patch,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = String, Path, description = "Identifier of the game to update")),
    request_body = UpdateGameFieldsRequest,
    responses(
        (status = 200, description = "Game updated", body = GameRecord),
        (status = 400, description = "Rating outside 0..=5 or not a multiple of 0.5"),
        (status = 500, description = "Unknown game or store fault")
    )
)]
pub async fn update_game_fields(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateGameFieldsRequest>,
) -> Result<Json<GameRecord>, AppError> {
    payload.validate()?;
    Ok(Json(
        game_service::update_game_fields(&state, &id, payload).await?,
    ))
}
