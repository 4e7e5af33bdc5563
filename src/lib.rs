//! Wristmap - slippy-map tile engine for small displays
//!
//! This library provides the map internals behind a watch-face map:
//! spherical Mercator projection math, a concurrent tile fetch and
//! cache pipeline over HTTP tile services, and a viewport that tracks
//! which tiles are visible as the user pans and zooms.
//!
//! # High-Level API
//!
//! Most hosts only need a [`viewport::Viewport`] over one of the
//! built-in layers:
//!
//! ```ignore
//! use std::sync::Arc;
//! use wristmap::cache::TileCache;
//! use wristmap::config::{FetchConfig, ViewportConfig};
//! use wristmap::fetch::ReqwestClient;
//! use wristmap::layer::Layer;
//! use wristmap::viewport::Viewport;
//!
//! let config = ViewportConfig::new(208, 248);
//! let cache = Arc::new(TileCache::default());
//! let layer = Layer::defaults().remove(0);
//! let mut viewport = Viewport::new(
//!     config,
//!     FetchConfig::default(),
//!     layer,
//!     ReqwestClient::new()?,
//!     cache,
//! );
//!
//! // Per frame: drain fetch results, then draw viewport.tiles().
//! for event in viewport.pump_events() {
//!     // mark the display dirty
//! }
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod fetch;
pub mod layer;
pub mod logging;
pub mod viewport;

/// Version of the wristmap library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
