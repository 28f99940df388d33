use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the game shelf API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::list_games,
        crate::routes::game::create_game,
        crate::routes::game::update_game_fields,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::GameRecord,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::UpdateGameFieldsRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "games", description = "Board game collection"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_game_route() {
        let doc = ApiDoc::openapi();
        let games = doc.paths.paths.get("/api/games").expect("collection path");
        assert!(games.get.is_some());
        assert!(games.post.is_some());

        let single = doc.paths.paths.get("/api/games/{id}").expect("record path");
        assert!(single.patch.is_some());
    }
}
