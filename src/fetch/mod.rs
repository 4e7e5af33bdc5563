//! Tile fetch pipeline
//!
//! The concurrent fetch-and-cache half of the engine: an HTTP client
//! abstraction, per-key deduplication, bounded retries and a single
//! event channel for completion and terminal failure.

mod coordinator;
mod event;
mod http;

pub use coordinator::FetchCoordinator;
pub use event::{FetchError, TileEvent};
pub use http::{HttpClient, ReqwestClient};

#[cfg(test)]
pub(crate) use http::tests::MockHttpClient;
