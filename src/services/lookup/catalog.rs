use futures::future::BoxFuture;

use super::{GameLookup, LookupError};
use crate::dto::game::GameDetails;

/// Resolves names against a fixed list of games loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct CatalogLookup {
    games: Vec<GameDetails>,
}

impl CatalogLookup {
    pub fn new(games: Vec<GameDetails>) -> Self {
        Self { games }
    }

    /// Case-insensitive match on the trimmed name.
    pub fn find(&self, name: &str) -> Option<&GameDetails> {
        let wanted = name.trim();
        self.games
            .iter()
            .find(|game| game.name.trim().eq_ignore_ascii_case(wanted))
    }
}

impl GameLookup for CatalogLookup {
    fn resolve(&self, name: &str) -> BoxFuture<'static, Result<Option<GameDetails>, LookupError>> {
        let found = self.find(name).cloned();
        Box::pin(async move { Ok(found) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogLookup {
        CatalogLookup::new(vec![
            GameDetails {
                name: "Catan".into(),
                year_published: Some(1995),
                ..Default::default()
            },
            GameDetails {
                name: "Ticket to Ride".into(),
                ..Default::default()
            },
        ])
    }

    #[tokio::test]
    async fn resolves_ignoring_case_and_surrounding_whitespace() {
        let found = catalog().resolve("  ticket TO ride ").await.unwrap();
        assert_eq!(found.map(|g| g.name).as_deref(), Some("Ticket to Ride"));
    }

    #[tokio::test]
    async fn unknown_name_resolves_to_none() {
        assert!(catalog().resolve("Nonexistent Game XYZ").await.unwrap().is_none());
    }
}
