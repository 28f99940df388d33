/// OpenAPI documentation generation.
pub mod documentation;
/// Listing, creating and updating games.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Game name resolution used on creation.
pub mod lookup;
/// Storage connection supervision with degraded-mode toggling.
pub mod storage_supervisor;
