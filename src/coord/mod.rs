//! Spherical Mercator projection
//!
//! Conversions between geographic coordinates, projected meters, the global
//! pixel grid of a zoom level, and tile indices, following the classic
//! global-mercator derivation (EPSG:900913 / EPSG:3857).
//!
//! All conversions are pure and infallible. Pixel space and TMS tile rows
//! grow northward from the world's south-west corner; [`TileIndex::flip`]
//! converts to the row-0-at-north order that raster tile services expect.

mod types;

pub use types::{
    FlippedTileIndex, GeoPoint, PixelCoord, ProjectedMeters, TileIndex, TileKey, MAX_LAT,
    MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Equatorial radius of the spherical earth model, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Half the projected world extent. The world spans
/// `[-ORIGIN_SHIFT, ORIGIN_SHIFT]` meters on both axes.
pub const ORIGIN_SHIFT: f64 = PI * EARTH_RADIUS_M;

/// Projection math for one tile size.
///
/// Bundles the conversions that depend on the pixel grid granularity:
/// `initial_resolution` is the meters-per-pixel of the single zoom-0 tile
/// and halves at every zoom step.
///
/// # Example
///
/// ```
/// use wristmap::coord::{GeoPoint, Mercator};
///
/// let mercator = Mercator::new(256);
/// let tile = mercator.geo_to_tile(GeoPoint::new(63.4305, 10.3950), 17);
/// let key = tile.flip(17).to_key(17, 256);
/// assert!(key.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    tile_size: u32,
    initial_resolution: f64,
}

impl Mercator {
    /// Creates projection math for tiles of `tile_size` pixels per edge.
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            initial_resolution: 2.0 * PI * EARTH_RADIUS_M / tile_size as f64,
        }
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Meters per pixel at `zoom`.
    pub fn resolution(&self, zoom: u8) -> f64 {
        self.initial_resolution / 2.0_f64.powi(zoom as i32)
    }

    /// Projects a geographic coordinate to spherical-Mercator meters.
    ///
    /// Latitude outside [`MIN_LAT`]/[`MAX_LAT`] projects beyond the square
    /// world extent; callers keep coordinates in range.
    pub fn geo_to_meters(&self, geo: GeoPoint) -> ProjectedMeters {
        let mx = geo.lon * ORIGIN_SHIFT / 180.0;
        let my = ((90.0 + geo.lat) * PI / 360.0).tan().ln() / (PI / 180.0);
        ProjectedMeters::new(mx, my * ORIGIN_SHIFT / 180.0)
    }

    /// Unprojects spherical-Mercator meters back to degrees.
    pub fn meters_to_geo(&self, meters: ProjectedMeters) -> GeoPoint {
        let lon = meters.x / ORIGIN_SHIFT * 180.0;
        let lat = meters.y / ORIGIN_SHIFT * 180.0;
        let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
        GeoPoint::new(lat, lon)
    }

    /// Projected meters to the pixel grid of `zoom`.
    pub fn meters_to_pixels(&self, meters: ProjectedMeters, zoom: u8) -> PixelCoord {
        let res = self.resolution(zoom);
        PixelCoord::new(
            (meters.x + ORIGIN_SHIFT) / res,
            (meters.y + ORIGIN_SHIFT) / res,
        )
    }

    /// Pixel grid of `zoom` back to projected meters.
    pub fn pixels_to_meters(&self, pixels: PixelCoord, zoom: u8) -> ProjectedMeters {
        let res = self.resolution(zoom);
        ProjectedMeters::new(pixels.x * res - ORIGIN_SHIFT, pixels.y * res - ORIGIN_SHIFT)
    }

    /// The TMS tile containing a pixel position.
    ///
    /// The pixel offset is floored, so a pixel on a shared tile edge
    /// belongs to exactly one tile (the one it opens).
    pub fn pixels_to_tile(&self, pixels: PixelCoord) -> TileIndex {
        let ts = self.tile_size as f64;
        TileIndex::new(
            (pixels.x / ts).floor() as i32,
            (pixels.y / ts).floor() as i32,
        )
    }

    /// The TMS tile containing a projected position.
    pub fn meters_to_tile(&self, meters: ProjectedMeters, zoom: u8) -> TileIndex {
        self.pixels_to_tile(self.meters_to_pixels(meters, zoom))
    }

    /// The TMS tile containing a geographic coordinate.
    pub fn geo_to_tile(&self, geo: GeoPoint, zoom: u8) -> TileIndex {
        self.meters_to_tile(self.geo_to_meters(geo), zoom)
    }

    /// Projected position of a tile's pixel-grid origin, its south-west
    /// corner.
    pub fn tile_origin_meters(&self, tile: TileIndex, zoom: u8) -> ProjectedMeters {
        let ts = self.tile_size as f64;
        self.pixels_to_meters(
            PixelCoord::new(tile.x as f64 * ts, tile.y as f64 * ts),
            zoom,
        )
    }

    /// Projected position of a tile's center.
    pub fn tile_center_meters(&self, tile: TileIndex, zoom: u8) -> ProjectedMeters {
        let ts = self.tile_size as f64;
        self.pixels_to_meters(
            PixelCoord::new((tile.x as f64 + 0.5) * ts, (tile.y as f64 + 0.5) * ts),
            zoom,
        )
    }

    /// South-west and north-east corners of a tile in projected meters.
    pub fn tile_bounds_meters(
        &self,
        tile: TileIndex,
        zoom: u8,
    ) -> (ProjectedMeters, ProjectedMeters) {
        (
            self.tile_origin_meters(tile, zoom),
            self.tile_origin_meters(TileIndex::new(tile.x + 1, tile.y + 1), zoom),
        )
    }
}

impl Default for Mercator {
    fn default() -> Self {
        Self::new(256)
    }
}
