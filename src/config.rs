//! Engine configuration
//!
//! Explicit configuration structs with builder-style setters. There is no
//! ambient or global configuration; the embedding host constructs these
//! and hands them to the components that need them.

use crate::coord::GeoPoint;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;
/// Default retry budget after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;
/// Default starting zoom level.
pub const DEFAULT_ZOOM: u8 = 4;

/// Configuration for the tile fetch pipeline.
///
/// # Example
///
/// ```
/// use wristmap::config::FetchConfig;
///
/// // Using defaults
/// let config = FetchConfig::default();
/// assert_eq!(config.timeout_secs(), 3);
/// assert_eq!(config.max_retries(), 2);
///
/// // Custom configuration
/// let config = FetchConfig::new()
///     .with_timeout_secs(10)
///     .with_max_retries(4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Maximum time to spend on one HTTP attempt (in seconds)
    timeout_secs: u64,
    /// Retries after the first failed attempt; a key is attempted at
    /// most `max_retries + 1` times
    max_retries: u32,
}

impl FetchConfig {
    /// Create a new fetch configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request timeout in seconds.
    ///
    /// Applies to each individual HTTP attempt. Default: 3 seconds.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    /// Set the retry budget for a failed tile.
    ///
    /// A tile is attempted `max_retries + 1` times before its fetch is
    /// reported as failed. Default: 2 retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Get the per-request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Get the retry budget.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Configuration for the viewport: screen geometry and starting view.
///
/// # Example
///
/// ```
/// use wristmap::config::ViewportConfig;
/// use wristmap::coord::GeoPoint;
///
/// let config = ViewportConfig::new(208, 248)
///     .with_center(GeoPoint::new(63.4305, 10.3950))
///     .with_zoom(12);
/// assert_eq!(config.tile_size(), 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Drawable width in screen pixels
    screen_width: u32,
    /// Drawable height in screen pixels
    screen_height: u32,
    /// Tile edge length in pixels
    tile_size: u32,
    /// Starting map center
    initial_center: GeoPoint,
    /// Starting zoom level, clamped to the active layer's range
    initial_zoom: u8,
    /// Request the center tile of the adjacent zoom levels ahead of a
    /// zoom gesture landing there
    prewarm_adjacent_zooms: bool,
}

impl ViewportConfig {
    /// Create a viewport configuration for a screen of the given pixel
    /// dimensions, with default tile size, center and zoom.
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            tile_size: DEFAULT_TILE_SIZE,
            initial_center: GeoPoint::new(0.0, 0.0),
            initial_zoom: DEFAULT_ZOOM,
            prewarm_adjacent_zooms: true,
        }
    }

    /// Set the tile edge length in pixels. Default: 256.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the starting map center. Default: 0°N 0°E.
    pub fn with_center(mut self, center: GeoPoint) -> Self {
        self.initial_center = center;
        self
    }

    /// Set the starting zoom level. Default: 4.
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.initial_zoom = zoom;
        self
    }

    /// Enable or disable adjacent-zoom prewarming. Default: enabled.
    pub fn with_prewarm_adjacent_zooms(mut self, prewarm: bool) -> Self {
        self.prewarm_adjacent_zooms = prewarm;
        self
    }

    /// Get the drawable width in screen pixels.
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Get the drawable height in screen pixels.
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Get the tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Get the starting map center.
    pub fn initial_center(&self) -> GeoPoint {
        self.initial_center
    }

    /// Get the starting zoom level.
    pub fn initial_zoom(&self) -> u8 {
        self.initial_zoom
    }

    /// Whether adjacent-zoom prewarming is enabled.
    pub fn prewarm_adjacent_zooms(&self) -> bool {
        self.prewarm_adjacent_zooms
    }
}
