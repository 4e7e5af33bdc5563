//! Viewport state and tile visibility
//!
//! Owns the on-screen view of the map: geographic center, zoom, the
//! in-progress pan and the live set of visible tiles. Every interaction
//! recomputes which tiles are required (the focus tile under the view
//! center plus its eight neighbors, overlap-tested against the screen),
//! requests the missing ones through the fetch coordinator and drops the
//! rest. Fetch outcomes arrive on an event queue drained with
//! [`Viewport::pump_events`].
//!
//! Screen coordinates grow rightward and downward; the projected pixel
//! grid grows northward. The sign flips where the two meet are the whole
//! trick of this module.

use crate::cache::{CacheKey, ImageHandle, TileCache};
use crate::config::{FetchConfig, ViewportConfig};
use crate::coord::{FlippedTileIndex, GeoPoint, Mercator, PixelCoord, ProjectedMeters, TileKey};
use crate::fetch::{FetchCoordinator, HttpClient, TileEvent};
use crate::layer::Layer;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// One live tile: identity plus, once fetched, its decoded image.
///
/// Created image-less when its key enters the visible set; the image is
/// attached at most once and the whole tile is dropped when it scrolls
/// out. A tile whose fetch failed simply stays image-less.
#[derive(Debug, Clone)]
pub struct Tile {
    pub key: TileKey,
    pub image: Option<ImageHandle>,
}

impl Tile {
    fn new(key: TileKey) -> Self {
        Self { key, image: None }
    }
}

/// Axis-aligned rectangle in screen pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ScreenRect {
    /// True when any part lies inside a `width` by `height` screen.
    pub fn overlaps_screen(&self, width: f64, height: f64) -> bool {
        !(self.x > width || self.x + self.w < 0.0 || self.y > height || self.y + self.h < 0.0)
    }
}

/// Map view over a tile source for one small screen.
///
/// All mutating operations are synchronous and recompute the live tile
/// set before returning; fetches run on spawned tasks and report back
/// through the event queue. Construct inside a Tokio runtime, since the
/// initial tile demand spawns fetch workers immediately.
pub struct Viewport<C: HttpClient> {
    config: ViewportConfig,
    fetch_config: FetchConfig,
    mercator: Mercator,
    client: Arc<C>,
    cache: Arc<TileCache>,
    layer: Layer,
    coordinator: FetchCoordinator<C>,
    events: mpsc::UnboundedReceiver<TileEvent>,
    /// Committed view center; pans move it only on commit
    center_meters: ProjectedMeters,
    zoom: u8,
    /// Fractional draw scale between zoom levels
    scale: f64,
    /// Tile under the (pan-adjusted) view center, flipped indices
    focus: FlippedTileIndex,
    /// Tile the screen offsets are anchored to; reset on re-anchoring
    anchor: FlippedTileIndex,
    /// Accumulated screen offset of the anchor tile center from the
    /// view center, in unscaled pixels
    offset_x: f64,
    offset_y: f64,
    /// In-progress drag translation in screen pixels
    pan_x: f64,
    pan_y: f64,
    tiles: HashMap<TileKey, Tile>,
}

impl<C: HttpClient> Viewport<C> {
    /// Creates a viewport over `layer` and requests its initial tiles.
    ///
    /// The starting zoom is clamped into the layer's range. The cache is
    /// shared: pass the same handle to other viewports or keep one for
    /// reuse across layer switches.
    pub fn new(
        config: ViewportConfig,
        fetch_config: FetchConfig,
        layer: Layer,
        client: C,
        cache: Arc<TileCache>,
    ) -> Self {
        let client = Arc::new(client);
        let mercator = Mercator::new(config.tile_size());
        let zoom = layer.zoom_range().clamp(config.initial_zoom());
        let center_meters = mercator.geo_to_meters(config.initial_center());
        let (coordinator, events) = FetchCoordinator::new(
            Arc::clone(&client),
            layer.clone(),
            Arc::clone(&cache),
            fetch_config,
        );

        let mut viewport = Self {
            config,
            fetch_config,
            mercator,
            client,
            cache,
            layer,
            coordinator,
            events,
            center_meters,
            zoom,
            scale: 1.0,
            focus: FlippedTileIndex::new(0, 0),
            anchor: FlippedTileIndex::new(0, 0),
            offset_x: 0.0,
            offset_y: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            tiles: HashMap::new(),
        };
        viewport.reanchor();
        viewport
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Current fractional draw scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The active tile source.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Attribution line for the active tile source.
    pub fn attribution(&self) -> &str {
        self.layer.attribution()
    }

    /// Committed view center as a geographic coordinate.
    pub fn center_geo(&self) -> GeoPoint {
        self.mercator.meters_to_geo(self.center_meters)
    }

    /// Key of the tile under the view center, when it lies inside the
    /// world extent.
    pub fn focus_key(&self) -> Option<TileKey> {
        self.focus.to_key(self.zoom, self.config.tile_size())
    }

    /// The live tiles, in no particular order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Where a tile draws on screen: top-left corner and edge length,
    /// scaled by the fractional zoom factor.
    pub fn tile_screen_rect(&self, key: &TileKey) -> ScreenRect {
        let size = self.config.tile_size() as f64 * self.scale;
        let index = key.flipped();
        let x = self.center_x() - size / 2.0 + size * (index.x - self.anchor.x) as f64;
        let y = self.center_y() - size / 2.0 + size * (index.y - self.anchor.y) as f64;
        ScreenRect { x, y, w: size, h: size }
    }

    /// Applies the current drag translation (the gesture's absolute
    /// offset, not an increment) and refreshes the visible set. The
    /// geographic center moves only on [`Viewport::pan_commit`].
    pub fn pan_update(&mut self, dx: f64, dy: f64) {
        self.pan_x = dx;
        self.pan_y = dy;
        let (focus, _) = self.center_under_pan();
        self.focus = focus;
        self.refresh();
    }

    /// Folds the finished drag into the accumulated offset and commits
    /// the new geographic center.
    pub fn pan_commit(&mut self) {
        self.offset_x += self.pan_x;
        self.offset_y += self.pan_y;
        let (focus, meters) = self.center_under_pan();
        self.focus = focus;
        self.center_meters = meters;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.refresh();
    }

    /// Sets an absolute zoom level, clamped into the active layer's
    /// range, and re-anchors the view on the committed center.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = self.layer.zoom_range().clamp(zoom);
        self.reanchor();
    }

    /// One zoom step in.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.saturating_add(1));
    }

    /// One zoom step out.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.saturating_sub(1));
    }

    /// Moves the view center to a geographic position and re-anchors.
    /// Follow-location updates land here.
    pub fn recenter(&mut self, center: GeoPoint) {
        self.center_meters = self.mercator.geo_to_meters(center);
        self.reanchor();
    }

    /// Sets the fractional draw scale a crown or pinch gesture is at
    /// between zoom levels. Callers keep it positive.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.refresh();
    }

    /// Switches the active tile source.
    ///
    /// Zoom is clamped into the new layer's range, the live set is
    /// cleared and a fresh coordinator (with an empty in-flight set) is
    /// built. Cached tiles of both sources survive in the shared cache,
    /// so switching back is cheap.
    pub fn set_layer(&mut self, layer: Layer) {
        debug!(layer = layer.id(), "switching tile source");
        self.layer = layer;
        let (coordinator, events) = FetchCoordinator::new(
            Arc::clone(&self.client),
            self.layer.clone(),
            Arc::clone(&self.cache),
            self.fetch_config,
        );
        self.coordinator = coordinator;
        self.events = events;
        self.tiles.clear();
        self.zoom = self.layer.zoom_range().clamp(self.zoom);
        self.reanchor();
    }

    /// Drains pending fetch events, attaching images to live tiles that
    /// completed, and returns the events for the embedding UI to react
    /// to (typically by redrawing).
    pub fn pump_events(&mut self) -> Vec<TileEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let TileEvent::Fetched(key) = &event {
                if let Some(tile) = self.tiles.get_mut(key) {
                    if tile.image.is_none() {
                        tile.image = self.cache.get(&CacheKey::new(self.layer.id(), *key));
                    }
                }
            }
            drained.push(event);
        }
        drained
    }

    /// Recomputes the required tile set and brings the live set in
    /// line: registers missing tiles and requests any without an image,
    /// drops tiles that scrolled out and attaches cached images to
    /// image-less ones.
    pub fn refresh(&mut self) {
        let required = self.visible_keys();

        for key in &required {
            let tile = self.tiles.entry(*key).or_insert_with(|| Tile::new(*key));
            if tile.image.is_none() {
                self.coordinator.ensure(*key);
            }
        }
        self.tiles.retain(|key, _| required.contains(key));
        self.attach_cached_images();

        if self.config.prewarm_adjacent_zooms() {
            self.prewarm();
        }
    }

    /// Re-derives the anchor tile and its screen offset from the
    /// committed center, then refreshes. Runs after zoom, recenter and
    /// layer changes, when no pan is in progress.
    fn reanchor(&mut self) {
        let tile = self.mercator.meters_to_tile(self.center_meters, self.zoom);
        let tile_center = self.mercator.tile_center_meters(tile, self.zoom);
        let tile_center_px = self.mercator.meters_to_pixels(tile_center, self.zoom);
        let center_px = self.mercator.meters_to_pixels(self.center_meters, self.zoom);

        self.focus = tile.flip(self.zoom);
        self.anchor = self.focus;

        // Pixel y grows north, screen y grows down: the y offset flips.
        let center_offset = tile_center_px.sub(&center_px);
        self.offset_x = center_offset.x;
        self.offset_y = -center_offset.y;

        self.refresh();
    }

    /// The focus tile and center position once the in-progress pan is
    /// applied. Dragging right moves the center west; dragging down
    /// moves it north.
    fn center_under_pan(&self) -> (FlippedTileIndex, ProjectedMeters) {
        let px = self.mercator.meters_to_pixels(self.center_meters, self.zoom);
        let shifted = PixelCoord::new(px.x - self.pan_x, px.y + self.pan_y);
        let meters = self.mercator.pixels_to_meters(shifted, self.zoom);
        let tile = self.mercator.meters_to_tile(meters, self.zoom);
        (tile.flip(self.zoom), meters)
    }

    /// The focus tile and its eight neighbors, kept when they lie
    /// inside the world extent and their screen rectangle overlaps the
    /// viewport. Indices past the world edge are simply absent; there
    /// is no wraparound.
    fn visible_keys(&self) -> HashSet<TileKey> {
        let offsets: [(i32, i32); 9] = [
            (0, 0),
            (0, -1),  // N
            (1, -1),  // NE
            (1, 0),   // E
            (1, 1),   // SE
            (0, 1),   // S
            (-1, 1),  // SW
            (-1, 0),  // W
            (-1, -1), // NW
        ];
        let width = self.config.screen_width() as f64;
        let height = self.config.screen_height() as f64;
        offsets
            .iter()
            .filter_map(|(dx, dy)| {
                FlippedTileIndex::new(self.focus.x + dx, self.focus.y + dy)
                    .to_key(self.zoom, self.config.tile_size())
            })
            .filter(|key| self.tile_screen_rect(key).overlaps_screen(width, height))
            .collect()
    }

    /// Fills in images for live tiles that have none yet.
    fn attach_cached_images(&mut self) {
        for tile in self.tiles.values_mut() {
            if tile.image.is_none() {
                tile.image = self.cache.get(&CacheKey::new(self.layer.id(), tile.key));
            }
        }
    }

    /// Requests the center tile of the adjacent zoom levels so a zoom
    /// step lands on a warm cache. Demand only: these keys never enter
    /// the live set.
    fn prewarm(&self) {
        let range = self.layer.zoom_range();
        for target in [self.zoom.saturating_sub(1), self.zoom.saturating_add(1)] {
            if target == self.zoom || !range.contains(target) {
                continue;
            }
            let tile = self.mercator.meters_to_tile(self.center_meters, target);
            if let Some(key) = tile.flip(target).to_key(target, self.config.tile_size()) {
                self.coordinator.ensure(key);
            }
        }
    }

    fn center_x(&self) -> f64 {
        self.offset_x * self.scale + self.pan_x + self.config.screen_width() as f64 / 2.0
    }

    fn center_y(&self) -> f64 {
        self.offset_y * self.scale + self.pan_y + self.config.screen_height() as f64 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockHttpClient;
    use crate::layer::ZoomRange;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    /// Nidaros Cathedral, Trondheim.
    const TRONDHEIM: GeoPoint = GeoPoint {
        lat: 63.4305,
        lon: 10.3950,
    };

    fn tile_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(8, 8, image::Rgba([30, 90, 60, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn test_layer() -> Layer {
        Layer::template("test", "https://tiles.example/{z}/{x}/{y}.png")
    }

    /// Trondheim at zoom 17 on a 200x200 screen, prewarm off.
    fn trondheim_config() -> ViewportConfig {
        ViewportConfig::new(200, 200)
            .with_center(TRONDHEIM)
            .with_zoom(17)
            .with_prewarm_adjacent_zooms(false)
    }

    fn test_viewport(
        config: ViewportConfig,
        layer: Layer,
    ) -> (Viewport<Arc<MockHttpClient>>, Arc<MockHttpClient>) {
        let client = Arc::new(MockHttpClient::ok(tile_png()));
        let cache = Arc::new(TileCache::new(64 * 1024 * 1024));
        let viewport = Viewport::new(
            config,
            FetchConfig::default(),
            layer,
            Arc::clone(&client),
            cache,
        );
        (viewport, client)
    }

    /// Pumps until at least `want` events arrived, yielding so spawned
    /// fetch workers get to run.
    async fn pump_until(viewport: &mut Viewport<Arc<MockHttpClient>>, want: usize) -> Vec<TileEvent> {
        let mut events = Vec::new();
        for _ in 0..100 {
            events.extend(viewport.pump_events());
            if events.len() >= want {
                break;
            }
            tokio::task::yield_now().await;
        }
        events
    }

    #[tokio::test]
    async fn test_refresh_builds_visible_set() {
        let (viewport, _client) = test_viewport(trondheim_config(), test_layer());

        assert_eq!(
            viewport.focus_key(),
            Some(TileKey::new(17, 69320, 35424, 256))
        );

        // The center sits near the tile's north-east corner, so only
        // the north and east neighbors also overlap the 200px screen.
        let mut keys: Vec<(u32, u32)> = viewport.tiles().map(|t| (t.key.x, t.key.y)).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                (69320, 35423),
                (69320, 35424),
                (69321, 35423),
                (69321, 35424)
            ]
        );
    }

    #[tokio::test]
    async fn test_anchor_offsets_match_center() {
        let (viewport, _client) = test_viewport(trondheim_config(), test_layer());
        let focus = viewport.focus_key().unwrap();

        let rect = viewport.tile_screen_rect(&focus);
        // offset = focus tile center minus view center, y sign flipped
        // into screen space.
        assert!((rect.x - (-80.224)).abs() < 1e-6, "rect.x = {}", rect.x);
        assert!(
            (rect.y - 24.936868112534285).abs() < 1e-6,
            "rect.y = {}",
            rect.y
        );
        assert_eq!(rect.w, 256.0);
        assert_eq!(rect.h, 256.0);
    }

    #[tokio::test]
    async fn test_fetch_flow_attaches_images() {
        let (mut viewport, client) = test_viewport(trondheim_config(), test_layer());

        let events = pump_until(&mut viewport, 4).await;
        assert_eq!(events.len(), 4);
        assert!(events
            .iter()
            .all(|e| matches!(e, TileEvent::Fetched(_))));

        assert_eq!(client.call_count(), 4);
        assert!(viewport.tiles().all(|tile| tile.image.is_some()));
    }

    #[tokio::test]
    async fn test_failed_tiles_stay_unpopulated() {
        let client = Arc::new(MockHttpClient::failing("unreachable"));
        let cache = Arc::new(TileCache::new(64 * 1024 * 1024));
        let mut viewport = Viewport::new(
            trondheim_config(),
            FetchConfig::default(),
            test_layer(),
            Arc::clone(&client),
            cache,
        );

        let events = pump_until(&mut viewport, 4).await;
        assert_eq!(events.len(), 4);
        for event in &events {
            assert!(matches!(event, TileEvent::Failed { attempts: 3, .. }));
        }
        assert!(viewport.tiles().all(|tile| tile.image.is_none()));
        // 4 visible tiles, 3 attempts each.
        assert_eq!(client.call_count(), 12);
    }

    #[tokio::test]
    async fn test_pan_updates_follow_the_drag() {
        let (mut viewport, _client) = test_viewport(trondheim_config(), test_layer());
        let focus = viewport.focus_key().unwrap();
        let before = viewport.tile_screen_rect(&focus);

        viewport.pan_update(50.0, 30.0);
        let during = viewport.tile_screen_rect(&focus);
        assert!((during.x - before.x - 50.0).abs() < 1e-9);
        assert!((during.y - before.y - 30.0).abs() < 1e-9);

        viewport.pan_commit();
        let after = viewport.tile_screen_rect(&focus);
        // Commit folds the pan into the accumulated offset; the tile
        // stays where the drag left it.
        assert!((after.x - during.x).abs() < 1e-9);
        assert!((after.y - during.y).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_pan_commit_moves_center_west_and_north() {
        let (mut viewport, _client) = test_viewport(trondheim_config(), test_layer());

        viewport.pan_update(50.0, 30.0);
        viewport.pan_commit();

        let center = viewport.center_geo();
        assert!(center.lon < TRONDHEIM.lon, "lon = {}", center.lon);
        assert!(center.lat > TRONDHEIM.lat, "lat = {}", center.lat);
    }

    #[tokio::test]
    async fn test_pan_past_a_tile_drops_stale_tiles() {
        let (mut viewport, _client) = test_viewport(trondheim_config(), test_layer());

        // Drag far enough left that the east neighbor becomes focus.
        viewport.pan_update(-300.0, 0.0);
        assert_eq!(
            viewport.focus_key(),
            Some(TileKey::new(17, 69321, 35424, 256))
        );

        let keys: HashSet<(u32, u32)> = viewport.tiles().map(|t| (t.key.x, t.key.y)).collect();
        assert!(!keys.contains(&(69320, 35424)), "stale tile kept: {:?}", keys);
        assert!(keys.contains(&(69321, 35424)));
        assert!(keys.iter().all(|(x, _)| *x >= 69321));
    }

    #[tokio::test]
    async fn test_zoom_clamped_to_layer_range() {
        let (mut viewport, _client) = test_viewport(trondheim_config(), test_layer());

        viewport.set_zoom(25);
        assert_eq!(viewport.zoom(), 19);
        viewport.zoom_in();
        assert_eq!(viewport.zoom(), 19);

        viewport.set_zoom(1);
        assert_eq!(viewport.zoom(), 4);
        viewport.zoom_out();
        assert_eq!(viewport.zoom(), 4);
    }

    #[tokio::test]
    async fn test_initial_zoom_clamped() {
        let config = ViewportConfig::new(200, 200)
            .with_center(TRONDHEIM)
            .with_zoom(2)
            .with_prewarm_adjacent_zooms(false);
        let (viewport, _client) = test_viewport(config, test_layer());
        assert_eq!(viewport.zoom(), 4);
    }

    #[tokio::test]
    async fn test_world_edges_stay_in_bounds() {
        let polar_layer = Layer::Template {
            id: "wide".to_string(),
            template: "https://tiles.example/{z}/{x}/{y}.png".to_string(),
            zoom: ZoomRange::new(0, 19),
            attribution: String::new(),
        };
        let config = ViewportConfig::new(200, 200)
            .with_center(GeoPoint::new(84.9, -179.5))
            .with_zoom(1)
            .with_prewarm_adjacent_zooms(false);
        let (viewport, _client) = test_viewport(config, polar_layer.clone());

        assert!(viewport.tiles().count() >= 1);
        for tile in viewport.tiles() {
            assert!(tile.key.x <= 1, "column out of world: {}", tile.key.x);
            assert!(tile.key.y <= 1, "row out of world: {}", tile.key.y);
        }

        // The single zoom-0 tile is the whole world.
        let config = ViewportConfig::new(200, 200)
            .with_zoom(0)
            .with_prewarm_adjacent_zooms(false);
        let (viewport, _client) = test_viewport(config, polar_layer);
        let keys: Vec<TileKey> = viewport.tiles().map(|t| t.key).collect();
        assert_eq!(keys, vec![TileKey::new(0, 0, 0, 256)]);
    }

    #[tokio::test]
    async fn test_scale_shrinks_tiles_and_widens_the_view() {
        let (mut viewport, _client) = test_viewport(trondheim_config(), test_layer());
        assert_eq!(viewport.tiles().count(), 4);

        viewport.set_scale(0.5);
        let focus = viewport.focus_key().unwrap();
        let rect = viewport.tile_screen_rect(&focus);
        assert_eq!(rect.w, 128.0);
        assert!((rect.x - 9.888).abs() < 1e-6, "rect.x = {}", rect.x);

        // At half scale the full 3x3 neighborhood fits on screen.
        assert_eq!(viewport.tiles().count(), 9);
    }

    #[tokio::test]
    async fn test_prewarm_requests_adjacent_zooms() {
        let config = trondheim_config().with_prewarm_adjacent_zooms(true);
        let (mut viewport, client) = test_viewport(config, test_layer());

        // 4 visible tiles plus the center tile at zoom 16 and 18.
        let events = pump_until(&mut viewport, 6).await;
        assert_eq!(events.len(), 6);
        assert_eq!(client.call_count(), 6);
        assert_eq!(viewport.tiles().count(), 4);
    }

    #[tokio::test]
    async fn test_set_layer_clamps_zoom_and_rebuilds() {
        let (mut viewport, _client) = test_viewport(trondheim_config(), test_layer());
        let mut shallow = test_layer();
        if let Layer::Template { id, zoom, .. } = &mut shallow {
            *id = "shallow".to_string();
            *zoom = ZoomRange::new(4, 10);
        }

        viewport.set_layer(shallow);
        assert_eq!(viewport.zoom(), 10);
        assert_eq!(viewport.layer().id(), "shallow");
        assert!(viewport.tiles().count() >= 1);
        assert!(viewport.tiles().all(|t| t.key.zoom == 10));
    }

    #[tokio::test]
    async fn test_layer_switch_keeps_both_caches_warm() {
        let (mut viewport, client) = test_viewport(trondheim_config(), test_layer());
        pump_until(&mut viewport, 4).await;
        let calls_after_first = client.call_count();

        let mut other = test_layer();
        if let Layer::Template { id, .. } = &mut other {
            *id = "other".to_string();
        }
        viewport.set_layer(other);
        pump_until(&mut viewport, 4).await;
        assert!(client.call_count() > calls_after_first);

        // Switching back serves every tile from cache.
        viewport.set_layer(test_layer());
        let calls_before_switch_back = client.call_count();
        pump_until(&mut viewport, 4).await;
        assert_eq!(client.call_count(), calls_before_switch_back);
        assert!(viewport.tiles().all(|tile| tile.image.is_some()));
    }

    #[tokio::test]
    async fn test_recenter_moves_focus() {
        let (mut viewport, _client) = test_viewport(trondheim_config(), test_layer());

        viewport.recenter(GeoPoint::new(59.9139, 10.7522)); // Oslo
        let focus = viewport.focus_key().unwrap();
        assert_ne!(focus, TileKey::new(17, 69320, 35424, 256));

        let center = viewport.center_geo();
        assert!((center.lat - 59.9139).abs() < 1e-6);
        assert!((center.lon - 10.7522).abs() < 1e-6);
    }
}
