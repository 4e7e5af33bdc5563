//! Tile fetch coordination
//!
//! One coordinator serves one tile source. It deduplicates concurrent
//! demand per tile key, short-circuits cache hits, runs each miss as a
//! spawned worker task with a bounded retry loop and reports outcomes on
//! a single event channel.

use super::event::{FetchError, TileEvent};
use super::http::HttpClient;
use crate::cache::{CacheKey, ImageHandle, TileCache};
use crate::config::FetchConfig;
use crate::coord::TileKey;
use crate::layer::Layer;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Concurrent fetch-and-cache pipeline for one tile source.
///
/// `ensure` is the only entry point: it guarantees the keyed tile is
/// cached or being fetched, with at most one outstanding fetch per key.
/// Completion and terminal failure are delivered on the event receiver
/// returned from [`FetchCoordinator::new`]; nothing propagates as an
/// error to callers.
pub struct FetchCoordinator<C: HttpClient> {
    client: Arc<C>,
    layer: Layer,
    cache: Arc<TileCache>,
    config: FetchConfig,
    /// Keys with an outstanding fetch task. Retries stay inside the one
    /// task, so membership spans all attempts for a key.
    in_flight: Arc<Mutex<HashSet<TileKey>>>,
    events: mpsc::UnboundedSender<TileEvent>,
}

impl<C: HttpClient> FetchCoordinator<C> {
    /// Creates a coordinator for `layer` and returns it with the
    /// receiving end of its event channel.
    pub fn new(
        client: Arc<C>,
        layer: Layer,
        cache: Arc<TileCache>,
        config: FetchConfig,
    ) -> (Self, mpsc::UnboundedReceiver<TileEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                client,
                layer,
                cache,
                config,
                in_flight: Arc::new(Mutex::new(HashSet::new())),
                events,
            },
            receiver,
        )
    }

    /// The tile source this coordinator fetches from.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Number of keys currently being fetched.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().unwrap().len()
    }

    /// Makes sure the keyed tile is cached or being fetched.
    ///
    /// A key already in flight is left alone. A cached key emits
    /// `Fetched` immediately without touching the network. Otherwise the
    /// key is marked in flight and a worker is spawned on the current
    /// Tokio runtime; the in-flight mark holds across that worker's
    /// retries and is removed when it settles.
    pub fn ensure(&self, key: TileKey) {
        let cache_key = CacheKey::new(self.layer.id(), key);
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            if in_flight.contains(&key) {
                trace!(tile = %key, "fetch already in flight");
                return;
            }
            if self.cache.get(&cache_key).is_some() {
                trace!(tile = %key, "cache hit");
                let _ = self.events.send(TileEvent::Fetched(key));
                return;
            }
            in_flight.insert(key);
        }

        debug!(tile = %key, layer = self.layer.id(), "starting tile fetch");
        let client = Arc::clone(&self.client);
        let layer = self.layer.clone();
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);
        let events = self.events.clone();
        let max_retries = self.config.max_retries();
        tokio::spawn(async move {
            Self::fetch_task(
                client,
                layer,
                cache,
                cache_key,
                in_flight,
                events,
                key,
                max_retries,
            )
            .await;
        });
    }

    /// Runs the bounded retry loop for one key. Retries are uniform
    /// across error kinds; the attempt counter is what bounds them.
    #[allow(clippy::too_many_arguments)]
    async fn fetch_task(
        client: Arc<C>,
        layer: Layer,
        cache: Arc<TileCache>,
        cache_key: CacheKey,
        in_flight: Arc<Mutex<HashSet<TileKey>>>,
        events: mpsc::UnboundedSender<TileEvent>,
        key: TileKey,
        max_retries: u32,
    ) {
        let mut attempts = 0u32;
        let outcome = loop {
            attempts += 1;
            match Self::attempt(&client, &layer, &key).await {
                Ok(image) => break Ok(image),
                Err(error) => {
                    if attempts > max_retries {
                        break Err(error);
                    }
                    debug!(
                        tile = %key,
                        attempt = attempts,
                        error = %error,
                        "tile fetch failed, retrying"
                    );
                }
            }
        };

        match outcome {
            Ok(image) => {
                // Publish to the cache before clearing the in-flight
                // mark, so a concurrent ensure() sees one or the other.
                cache.put(cache_key, image);
                in_flight.lock().unwrap().remove(&key);
                trace!(tile = %key, attempts = attempts, "tile fetched");
                let _ = events.send(TileEvent::Fetched(key));
            }
            Err(error) => {
                in_flight.lock().unwrap().remove(&key);
                warn!(
                    tile = %key,
                    attempts = attempts,
                    error = %error,
                    "tile fetch failed permanently"
                );
                let _ = events.send(TileEvent::Failed { key, attempts });
            }
        }
    }

    /// One fetch attempt: build the URL, GET it, decode the body.
    async fn attempt(client: &C, layer: &Layer, key: &TileKey) -> Result<ImageHandle, FetchError> {
        let url = layer.url_for(key)?;
        let bytes = client.get(&url).await?;
        let image =
            image::load_from_memory(&bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(Arc::new(image.to_rgba8()))
    }
}
