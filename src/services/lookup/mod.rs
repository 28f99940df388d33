//! Name resolution used when a game is added to the collection.

mod catalog;
mod http;

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::{config::AppConfig, dto::game::GameDetails};

pub use catalog::CatalogLookup;
pub use http::HttpGameLookup;

/// Failures of the lookup service itself. An unknown name is not an error.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to build lookup client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    #[error("lookup request for `{name}` failed")]
    Request {
        name: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("lookup for `{name}` answered with status {status}")]
    Status {
        name: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to decode lookup response for `{name}`")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves a user-typed name into the descriptive data of a real game.
pub trait GameLookup: Send + Sync {
    /// `Ok(None)` means the name does not match any known game.
    fn resolve(&self, name: &str) -> BoxFuture<'static, Result<Option<GameDetails>, LookupError>>;
}

/// Pick the lookup backend described by the configuration.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn GameLookup>, LookupError> {
    match config.lookup().base_url.as_deref() {
        Some(base_url) => Ok(Arc::new(HttpGameLookup::new(
            base_url,
            config.lookup().timeout,
        )?)),
        None => Ok(Arc::new(CatalogLookup::new(config.catalog().to_vec()))),
    }
}
