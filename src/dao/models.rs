use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Descriptive data supplied by the name lookup when a game is created.
///
/// These fields are snapshot data: nothing in the edit workflow writes them after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameDetailsEntity {
    /// Canonical name returned by the lookup.
    pub name: String,
    pub description: Option<String>,
    pub year_published: Option<i32>,
    pub min_players: Option<u32>,
    pub max_players: Option<u32>,
    /// Average play time in minutes.
    pub play_time: Option<u32>,
    /// Minimum recommended age in years.
    pub min_age: Option<u32>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
}

/// The only fields a stored game accepts after creation. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameFieldsUpdate {
    /// Rating between 0 and 5, in half-star increments.
    pub rating: Option<f64>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl GameFieldsUpdate {
    /// True when the update carries neither field.
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.notes.is_none()
    }
}

/// Game document persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameEntity {
    /// Primary key of the game, assigned on creation.
    pub id: Uuid,
    /// Enrichment data captured on creation.
    pub details: GameDetailsEntity,
    /// User rating, defaults to 0.
    pub rating: f64,
    /// User notes, defaults to empty.
    pub notes: String,
}

impl GameEntity {
    /// Build a brand-new game with default rating and notes.
    pub fn new(details: GameDetailsEntity) -> Self {
        Self {
            id: Uuid::new_v4(),
            details,
            rating: 0.0,
            notes: String::new(),
        }
    }

    /// Apply the present editable fields, leaving every other field untouched.
    pub fn apply_fields(&mut self, update: GameFieldsUpdate) {
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_starts_unrated_without_notes() {
        let game = GameEntity::new(GameDetailsEntity {
            name: "Catan".into(),
            ..Default::default()
        });

        assert_eq!(game.rating, 0.0);
        assert!(game.notes.is_empty());
        assert_eq!(game.details.name, "Catan");
    }

    #[test]
    fn apply_fields_only_touches_rating_and_notes() {
        let details = GameDetailsEntity {
            name: "Azul".into(),
            year_published: Some(2017),
            min_players: Some(2),
            max_players: Some(4),
            ..Default::default()
        };
        let mut game = GameEntity::new(details.clone());
        let id = game.id;

        game.apply_fields(GameFieldsUpdate {
            rating: Some(3.5),
            notes: Some("tile drafting".into()),
        });

        assert_eq!(game.id, id);
        assert_eq!(game.details, details);
        assert_eq!(game.rating, 3.5);
        assert_eq!(game.notes, "tile drafting");
    }

    #[test]
    fn apply_fields_keeps_absent_values() {
        let mut game = GameEntity::new(GameDetailsEntity {
            name: "Catan".into(),
            ..Default::default()
        });
        game.apply_fields(GameFieldsUpdate {
            rating: Some(4.0),
            notes: Some("longer than expected".into()),
        });

        game.apply_fields(GameFieldsUpdate {
            rating: Some(2.5),
            notes: None,
        });
        assert_eq!(game.rating, 2.5);
        assert_eq!(game.notes, "longer than expected");

        game.apply_fields(GameFieldsUpdate {
            rating: None,
            notes: Some("fun".into()),
        });
        assert_eq!(game.rating, 2.5);
        assert_eq!(game.notes, "fun");

        game.apply_fields(GameFieldsUpdate::default());
        assert_eq!(game.rating, 2.5);
        assert_eq!(game.notes, "fun");
    }
}
