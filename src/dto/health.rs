use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: &'static str,
}

impl HealthResponse {
    /// The document store is reachable.
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    /// No document store is installed; every game route answers 500.
    pub fn degraded() -> Self {
        Self { status: "degraded" }
    }
}
