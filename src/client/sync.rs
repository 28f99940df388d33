use futures::future::BoxFuture;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use crate::dto::game::{CreateGameRequest, CreateOutcome, GameRecord, UpdateGameFieldsRequest};

const GAMES_PATH: &str = "/api/games";
const GAMES_SEGMENTS: [&str; 2] = ["api", "games"];

/// Failures reaching the game API from the client side.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The server origin is not an absolute `http(s)` URL.
    #[error("invalid server URL `{url}`: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request never produced a response.
    #[error("request to `{path}` failed")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("server answered {status} for `{path}`")]
    Status {
        path: String,
        status: StatusCode,
        /// `message` of the JSON error body, when the server sent one.
        message: Option<String>,
    },
    #[error("failed to decode response from `{path}`")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The three operations the view layer may call on the server.
pub trait SyncService: Send + Sync {
    /// Every game, in the store's default order.
    fn list(&self) -> BoxFuture<'_, Result<Vec<GameRecord>, SyncError>>;
    /// Add a game by name. An unknown name is [`CreateOutcome::Unresolved`], not an error.
    fn create(&self, name: &str) -> BoxFuture<'_, Result<CreateOutcome, SyncError>>;
    /// Send the `{rating, notes}` pair of one game.
    fn update_fields(
        &self,
        id: &str,
        fields: UpdateGameFieldsRequest,
    ) -> BoxFuture<'_, Result<GameRecord, SyncError>>;
}

/// [`SyncService`] talking to the REST API over HTTP.
#[derive(Clone)]
pub struct HttpSyncClient {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpSyncClient {
    /// `base_url` is the server origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let invalid = |message: String| SyncError::InvalidBaseUrl {
            url: base_url.to_owned(),
            message,
        };
        let base_url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }

        let client = Client::builder()
            .build()
            .map_err(|source| SyncError::ClientBuilder { source })?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/games`, followed by `segments` each percent-encoded as one path segment.
    fn games_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always editable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(GAMES_SEGMENTS)
                .extend(segments);
        }
        url
    }

    async fn send(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, SyncError> {
        let response = request.send().await.map_err(|source| SyncError::Transport {
            path: path.to_owned(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are informative only; a missing or odd body still yields the status.
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.message);
        Err(SyncError::Status {
            path: path.to_owned(),
            status,
            message,
        })
    }

    async fn read_body(path: &str, response: Response) -> Result<Vec<u8>, SyncError> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|source| SyncError::Transport {
                path: path.to_owned(),
                source,
            })
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, SyncError> {
        let body = Self::read_body(path, response).await?;
        serde_json::from_slice(&body).map_err(|source| SyncError::Decode {
            path: path.to_owned(),
            source,
        })
    }

    async fn list_games(&self) -> Result<Vec<GameRecord>, SyncError> {
        let response = self
            .send(GAMES_PATH, self.client.get(self.games_url(&[])))
            .await?;
        Self::decode(GAMES_PATH, response).await
    }

    async fn create_game(&self, name: &str) -> Result<CreateOutcome, SyncError> {
        let request = self
            .client
            .post(self.games_url(&[]))
            .json(&CreateGameRequest {
                name: name.to_owned(),
            });
        let response = self.send(GAMES_PATH, request).await?;

        let status = response.status();
        let body = Self::read_body(GAMES_PATH, response).await?;
        if status != StatusCode::CREATED && body.iter().all(u8::is_ascii_whitespace) {
            return Ok(CreateOutcome::Unresolved);
        }

        serde_json::from_slice(&body)
            .map(CreateOutcome::Created)
            .map_err(|source| SyncError::Decode {
                path: GAMES_PATH.to_owned(),
                source,
            })
    }

    async fn patch_game(
        &self,
        id: &str,
        fields: UpdateGameFieldsRequest,
    ) -> Result<GameRecord, SyncError> {
        let url = self.games_url(&[id]);
        let path = url.path().to_owned();
        let request = self.client.patch(url).json(&fields);
        let response = self.send(&path, request).await?;
        Self::decode(&path, response).await
    }
}

impl SyncService for HttpSyncClient {
    fn list(&self) -> BoxFuture<'_, Result<Vec<GameRecord>, SyncError>> {
        Box::pin(self.list_games())
    }

    fn create(&self, name: &str) -> BoxFuture<'_, Result<CreateOutcome, SyncError>> {
        let name = name.to_owned();
        Box::pin(async move { self.create_game(&name).await })
    }

    fn update_fields(
        &self,
        id: &str,
        fields: UpdateGameFieldsRequest,
    ) -> BoxFuture<'_, Result<GameRecord, SyncError>> {
        let id = id.to_owned();
        Box::pin(async move { self.patch_game(&id, fields).await })
    }
}
