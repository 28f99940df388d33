use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{GameLookup, LookupError};
use crate::dto::game::GameDetails;

/// Queries a JSON enrichment service with `GET {base_url}?name=<name>`.
///
/// The service answers with a [`GameDetails`] object, or with 404 / an empty body when the
/// name does not match a known game.
#[derive(Clone)]
pub struct HttpGameLookup {
    client: Client,
    base_url: Arc<str>,
}

impl HttpGameLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| LookupError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url),
        })
    }

    async fn fetch(&self, name: String) -> Result<Option<GameDetails>, LookupError> {
        let response = self
            .client
            .get(self.base_url.as_ref())
            .query(&[("name", name.as_str())])
            .send()
            .await
            .map_err(|source| LookupError::Request {
                name: name.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            debug!(%name, %status, "lookup did not resolve name");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status { name, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LookupError::Request {
                name: name.clone(),
                source,
            })?;
        parse_details(&name, &body)
    }
}

impl GameLookup for HttpGameLookup {
    fn resolve(&self, name: &str) -> BoxFuture<'static, Result<Option<GameDetails>, LookupError>> {
        let lookup = self.clone();
        let name = name.to_owned();
        Box::pin(async move { lookup.fetch(name).await })
    }
}

/// Blank bodies and JSON `null` both mean "no match".
fn parse_details(name: &str, body: &[u8]) -> Result<Option<GameDetails>, LookupError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice::<Option<GameDetails>>(body).map_err(|source| LookupError::Decode {
        name: name.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_null_bodies_are_unresolved() {
        assert!(parse_details("x", b"").unwrap().is_none());
        assert!(parse_details("x", b"  \n").unwrap().is_none());
        assert!(parse_details("x", b"null").unwrap().is_none());
    }

    #[test]
    fn details_body_is_decoded() {
        let details =
            parse_details("azul", br#"{"name":"Azul","playTime":45,"minAge":8}"#).unwrap();
        let details = details.unwrap();
        assert_eq!(details.name, "Azul");
        assert_eq!(details.play_time, Some(45));
        assert_eq!(details.min_age, Some(8));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        assert!(matches!(
            parse_details("x", b"<items/>"),
            Err(LookupError::Decode { .. })
        ));
    }
}
