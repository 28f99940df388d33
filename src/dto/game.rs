use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dao::models::{GameDetailsEntity, GameEntity, GameFieldsUpdate},
    dto::validation::validate_rating,
};

/// Payload used to add a game to the collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    /// Name typed by the user; resolved through the game lookup.
    pub name: String,
}

/// Payload accepted by `PATCH /api/games/{id}`.
///
/// Both keys are optional; an absent key leaves the stored value alone. Keys other than
/// `rating` and `notes` are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateGameFieldsRequest {
    /// Rating between 0 and 5 in steps of 0.5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = validate_rating))]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateGameFieldsRequest {
    /// The full editable pair, as sent by the edit controller.
    pub fn pair(rating: f64, notes: impl Into<String>) -> Self {
        Self {
            rating: Some(rating),
            notes: Some(notes.into()),
        }
    }
}

impl From<UpdateGameFieldsRequest> for GameFieldsUpdate {
    fn from(value: UpdateGameFieldsRequest) -> Self {
        Self {
            rating: value.rating,
            notes: value.notes,
        }
    }
}

/// A game as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Opaque identifier assigned on creation.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_players: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
    /// Average play time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub notes: String,
}

impl From<GameEntity> for GameRecord {
    fn from(game: GameEntity) -> Self {
        let GameDetailsEntity {
            name,
            description,
            year_published,
            min_players,
            max_players,
            play_time,
            min_age,
            thumbnail,
            image,
        } = game.details;

        Self {
            id: game.id.to_string(),
            name,
            description,
            year_published,
            min_players,
            max_players,
            play_time,
            min_age,
            thumbnail,
            image,
            rating: game.rating,
            notes: game.notes,
        }
    }
}

/// Result of adding a game by name, shared by the server handler and the client.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The name resolved to a real game, which is now stored.
    Created(GameRecord),
    /// The name did not resolve; nothing was stored.
    Unresolved,
}

/// Enrichment data returned by a game lookup, as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default)]
    pub min_players: Option<u32>,
    #[serde(default)]
    pub max_players: Option<u32>,
    #[serde(default)]
    pub play_time: Option<u32>,
    #[serde(default)]
    pub min_age: Option<u32>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<GameDetails> for GameDetailsEntity {
    fn from(value: GameDetails) -> Self {
        Self {
            name: value.name,
            description: value.description,
            year_published: value.year_published,
            min_players: value.min_players,
            max_players: value.max_players,
            play_time: value.play_time,
            min_age: value.min_age,
            thumbnail: value.thumbnail,
            image: value.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_ignores_extra_keys() {
        let request: UpdateGameFieldsRequest = serde_json::from_value(json!({
            "rating": 4.5,
            "notes": "fun",
            "name": "Renamed",
            "minPlayers": 99,
            "id": "other",
        }))
        .unwrap();

        assert_eq!(request, UpdateGameFieldsRequest::pair(4.5, "fun"));
    }

    #[test]
    fn update_request_accepts_either_field_alone() {
        let rating_only: UpdateGameFieldsRequest =
            serde_json::from_value(json!({"rating": 3.5})).unwrap();
        assert_eq!(rating_only.rating, Some(3.5));
        assert_eq!(rating_only.notes, None);

        let notes_only: UpdateGameFieldsRequest =
            serde_json::from_value(json!({"notes": "fun"})).unwrap();
        assert_eq!(notes_only.rating, None);
        assert_eq!(notes_only.notes.as_deref(), Some("fun"));

        let update = GameFieldsUpdate::from(notes_only);
        assert_eq!(update.rating, None);
    }

    #[test]
    fn update_request_serializes_only_present_fields() {
        let value = serde_json::to_value(UpdateGameFieldsRequest {
            rating: Some(2.0),
            notes: None,
        })
        .unwrap();
        assert_eq!(value, json!({"rating": 2.0}));
    }

    #[test]
    fn update_request_validation_rejects_bad_ratings() {
        assert!(UpdateGameFieldsRequest::pair(4.2, "").validate().is_err());
        assert!(UpdateGameFieldsRequest::pair(4.0, "").validate().is_ok());
        assert!(UpdateGameFieldsRequest::default().validate().is_ok());
    }

    #[test]
    fn game_record_serializes_camel_case() {
        let game = GameEntity::new(GameDetailsEntity {
            name: "Catan".into(),
            year_published: Some(1995),
            min_players: Some(3),
            ..Default::default()
        });
        let id = game.id.to_string();

        let value = serde_json::to_value(GameRecord::from(game)).unwrap();
        assert_eq!(value["id"], id);
        assert_eq!(value["yearPublished"], 1995);
        assert_eq!(value["minPlayers"], 3);
        assert_eq!(value["rating"], 0.0);
        assert_eq!(value["notes"], "");
        assert!(value.get("description").is_none());
    }
}
