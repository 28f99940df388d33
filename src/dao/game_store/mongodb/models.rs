use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{GameDetailsEntity, GameEntity, GameFieldsUpdate};

use super::error::MongoDaoError;

/// Stored shape of a game. Field names follow the JSON the web client reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
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

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
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
        } = value.details;

        Self {
            id: value.id.to_string(),
            name,
            description,
            year_published,
            min_players,
            max_players,
            play_time,
            min_age,
            thumbnail,
            image,
            rating: value.rating,
            notes: value.notes,
        }
    }
}

impl TryFrom<MongoGameDocument> for GameEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoGameDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.id).map_err(|source| MongoDaoError::InvalidStoredId {
            id: value.id.clone(),
            source,
        })?;

        Ok(Self {
            id,
            details: GameDetailsEntity {
                name: value.name,
                description: value.description,
                year_published: value.year_published,
                min_players: value.min_players,
                max_players: value.max_players,
                play_time: value.play_time,
                min_age: value.min_age,
                thumbnail: value.thumbnail,
                image: value.image,
            },
            rating: value.rating,
            notes: value.notes,
        })
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.to_string()}
}

/// `$set` body holding only the fields present in `update`.
pub fn set_fields(update: GameFieldsUpdate) -> Document {
    let mut fields = Document::new();
    if let Some(rating) = update.rating {
        fields.insert("rating", rating);
    }
    if let Some(notes) = update.notes {
        fields.insert("notes", notes);
    }
    fields
}
