//! Fetch pipeline events and errors

use crate::coord::TileKey;
use crate::layer::LayerError;
use thiserror::Error;

/// Errors a single tile fetch attempt can produce.
///
/// Every variant takes the same bounded retry path; after the retry
/// budget is spent the coordinator reports the key as failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure, HTTP error status or timeout
    #[error("network error: {0}")]
    Network(String),
    /// Response body was not a decodable image
    #[error("image decode failed: {0}")]
    Decode(String),
    /// No valid URL could be built for the key
    #[error("malformed tile request: {0}")]
    MalformedRequest(#[from] LayerError),
}

/// Notifications emitted by the fetch coordinator.
///
/// `Fetched` means the key's image is now in the cache, whether freshly
/// fetched or already present. `Failed` means the retry budget was
/// exhausted; no further attempts happen until the key is requested
/// again. A failure for one key never affects other keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileEvent {
    Fetched(TileKey),
    Failed {
        key: TileKey,
        /// Attempts actually made, `max_retries + 1` on exhaustion
        attempts: u32,
    },
}
