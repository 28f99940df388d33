use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::dao::models::{GameDetailsEntity, GameEntity};

use super::error::CouchDaoError;

pub const GAME_PREFIX: &str = "game::";
pub const END_SUFFIX: &str = "\u{ffff}";

#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    #[serde(default)]
    pub doc: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchGameDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub game: GameBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameBody {
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
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub notes: String,
}

impl From<GameEntity> for CouchGameDocument {
    fn from(game: GameEntity) -> Self {
        let details = game.details;
        Self {
            id: game_doc_id(game.id),
            rev: None,
            game: GameBody {
                name: details.name,
                description: details.description,
                year_published: details.year_published,
                min_players: details.min_players,
                max_players: details.max_players,
                play_time: details.play_time,
                min_age: details.min_age,
                thumbnail: details.thumbnail,
                image: details.image,
                rating: game.rating,
                notes: game.notes,
            },
        }
    }
}

impl CouchGameDocument {
    pub fn try_into_entity(self) -> Result<GameEntity, CouchDaoError> {
        let id = extract_uuid(&self.id)?;
        let body = self.game;
        Ok(GameEntity {
            id,
            details: GameDetailsEntity {
                name: body.name,
                description: body.description,
                year_published: body.year_published,
                min_players: body.min_players,
                max_players: body.max_players,
                play_time: body.play_time,
                min_age: body.min_age,
                thumbnail: body.thumbnail,
                image: body.image,
            },
            rating: body.rating,
            notes: body.notes,
        })
    }
}

pub fn game_doc_id(id: Uuid) -> String {
    format!("{GAME_PREFIX}{id}")
}

fn extract_uuid(doc_id: &str) -> Result<Uuid, CouchDaoError> {
    let raw = doc_id.strip_prefix(GAME_PREFIX).unwrap_or(doc_id);
    Uuid::parse_str(raw).map_err(|source| CouchDaoError::InvalidDocId {
        doc_id: doc_id.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ids_are_prefixed() {
        let id = Uuid::new_v4();
        assert_eq!(game_doc_id(id), format!("game::{id}"));
        assert_eq!(extract_uuid(&game_doc_id(id)).unwrap(), id);
    }

    #[test]
    fn revision_is_omitted_for_new_documents() {
        let game = GameEntity::new(GameDetailsEntity {
            name: "Carcassonne".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(CouchGameDocument::from(game)).unwrap();

        assert!(value.get("_rev").is_none());
        assert_eq!(value["name"], "Carcassonne");
        assert_eq!(value["rating"], 0.0);
        assert_eq!(value["notes"], "");
    }

    #[test]
    fn documents_missing_user_fields_load_with_defaults() {
        let id = Uuid::new_v4();
        let raw = serde_json::json!({
            "_id": game_doc_id(id),
            "_rev": "1-abc",
            "name": "Patchwork",
            "minPlayers": 2,
        });

        let doc: CouchGameDocument = serde_json::from_value(raw).unwrap();
        assert_eq!(doc.rev.as_deref(), Some("1-abc"));

        let entity = doc.try_into_entity().unwrap();
        assert_eq!(entity.id, id);
        assert_eq!(entity.details.min_players, Some(2));
        assert_eq!(entity.rating, 0.0);
        assert!(entity.notes.is_empty());
    }
}
