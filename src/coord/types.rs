//! Coordinate and tile identity types

use std::fmt;

/// Spherical Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels supported by the projection math
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 20;

/// Geographic coordinate in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Position in projected spherical-Mercator meters.
///
/// The origin is the projection center (0°N 0°E); the world spans
/// `[-ORIGIN_SHIFT, ORIGIN_SHIFT]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedMeters {
    pub x: f64,
    pub y: f64,
}

impl ProjectedMeters {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise absolute difference, used when checking a point
    /// against tile extents.
    pub fn abs_diff(&self, other: &ProjectedMeters) -> ProjectedMeters {
        ProjectedMeters {
            x: (self.x - other.x).abs(),
            y: (self.y - other.y).abs(),
        }
    }
}

/// Position on the global pixel grid of one zoom level.
///
/// The grid origin is the bottom-left (south-west) corner of the world
/// extent, so `y` grows northward. One tile covers `tile_size` pixels
/// per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoord {
    pub x: f64,
    pub y: f64,
}

impl PixelCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference.
    pub fn sub(&self, other: &PixelCoord) -> PixelCoord {
        PixelCoord {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Tile index in TMS convention: row 0 at the south edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    /// Column, 0 at west
    pub x: i32,
    /// Row, 0 at south
    pub y: i32,
}

impl TileIndex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to the top-left row order used by raster tile services.
    pub fn flip(&self, zoom: u8) -> FlippedTileIndex {
        FlippedTileIndex {
            x: self.x,
            y: flip_row(self.y, zoom),
        }
    }
}

/// Tile index in the raster-service convention: row 0 at the north edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlippedTileIndex {
    /// Column, 0 at west
    pub x: i32,
    /// Row, 0 at north
    pub y: i32,
}

impl FlippedTileIndex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts back to TMS row order. Flipping twice returns the input.
    pub fn flip(&self, zoom: u8) -> TileIndex {
        TileIndex {
            x: self.x,
            y: flip_row(self.y, zoom),
        }
    }

    /// True when both axes lie within `[0, 2^zoom)`.
    pub fn in_bounds(&self, zoom: u8) -> bool {
        let n = 1i64 << zoom;
        (0..n).contains(&(self.x as i64)) && (0..n).contains(&(self.y as i64))
    }

    /// Builds the fetch/cache identity for this index, or `None` when the
    /// index lies outside the world extent at `zoom`.
    pub fn to_key(&self, zoom: u8, tile_size: u32) -> Option<TileKey> {
        if !self.in_bounds(zoom) {
            return None;
        }
        Some(TileKey {
            zoom,
            x: self.x as u32,
            y: self.y as u32,
            size: tile_size,
        })
    }
}

// Row mirror between TMS and raster-service order. i64 keeps the shift
// in range for all zooms up to MAX_ZOOM.
fn flip_row(y: i32, zoom: u8) -> i32 {
    ((1i64 << zoom) - 1 - y as i64) as i32
}

/// Identity of one fetchable tile.
///
/// Column and row use the flipped (row 0 north) convention. This is the
/// sole key for caching and fetch deduplication: two requests with equal
/// keys are the same tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Zoom level
    pub zoom: u8,
    /// Column, 0 at west
    pub x: u32,
    /// Flipped row, 0 at north
    pub y: u32,
    /// Tile edge length in pixels
    pub size: u32,
}

impl TileKey {
    pub fn new(zoom: u8, x: u32, y: u32, size: u32) -> Self {
        Self { zoom, x, y, size }
    }

    /// This key's index in the flipped convention.
    pub fn flipped(&self) -> FlippedTileIndex {
        FlippedTileIndex {
            x: self.x as i32,
            y: self.y as i32,
        }
    }

    /// This key's index in TMS row order.
    pub fn tile_index(&self) -> TileIndex {
        self.flipped().flip(self.zoom)
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z{}/{}/{}@{}", self.zoom, self.x, self.y, self.size)
    }
}
