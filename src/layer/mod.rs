//! Tile-source definitions
//!
//! A closed set of raster tile sources: WMTS tile caches addressed by a
//! path template, WMS endpoints queried per tile with a GetMap bounding
//! box, and generic `{z}/{x}/{y}` slippy-map templates. Each source turns
//! a [`TileKey`] into one fetchable URL; the rest of the engine treats
//! that URL as an opaque fetch target.

use crate::coord::{Mercator, TileKey};
use thiserror::Error;

/// Errors from tile URL construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    /// Template lacks a placeholder, so no per-tile URL can be formed
    #[error("tile URL template {template:?} is missing the {placeholder} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: &'static str,
    },
}

/// Inclusive zoom range a tile source serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    pub min: u8,
    pub max: u8,
}

impl ZoomRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Clamps `zoom` into this range.
    pub fn clamp(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min, self.max)
    }

    pub fn contains(&self, zoom: u8) -> bool {
        (self.min..=self.max).contains(&zoom)
    }
}

/// A raster tile source.
///
/// The set of kinds is closed: consumers match exhaustively, and adding
/// a kind is a compile-visible change everywhere a `Layer` is inspected.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// WMTS tile cache addressed by a path template with `{z}`, `{y}`
    /// and `{x}` (flipped row before column, as the services publish it).
    Wmts {
        id: String,
        template: String,
        zoom: ZoomRange,
        attribution: String,
    },
    /// WMS endpoint; each tile becomes a GetMap query with a projected
    /// bounding box derived from the key.
    Wms {
        id: String,
        endpoint: String,
        layers: String,
        zoom: ZoomRange,
        attribution: String,
    },
    /// Generic slippy-map URL template with `{z}`, `{x}` and `{y}`.
    Template {
        id: String,
        template: String,
        zoom: ZoomRange,
        attribution: String,
    },
}

impl Layer {
    /// Kartverket's public WMTS cache for one of its map products
    /// (`topo`, `topograatone`, `toporaster`).
    pub fn kartverket(id: &str, map: &str) -> Self {
        Layer::Wmts {
            id: id.to_string(),
            template: format!(
                "https://cache.kartverket.no/{}/v1/wmts/1.0.0/default/googlemaps/{{z}}/{{y}}/{{x}}.png",
                map
            ),
            zoom: ZoomRange::new(4, 19),
            attribution: "© Kartverket".to_string(),
        }
    }

    /// Geonorge WMS endpoint (`wms.topo` and friends) serving a named
    /// layer set.
    pub fn geonorge(id: &str, map: &str, layers: &str) -> Self {
        Layer::Wms {
            id: id.to_string(),
            endpoint: format!("https://wms.geonorge.no/skwms1/{}", map),
            layers: layers.to_string(),
            zoom: ZoomRange::new(4, 20),
            attribution: "© Kartverket".to_string(),
        }
    }

    /// A user-supplied slippy-map template, OpenStreetMap-style.
    pub fn template(id: &str, template: &str) -> Self {
        Layer::Template {
            id: id.to_string(),
            template: template.to_string(),
            zoom: ZoomRange::new(4, 19),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }

    /// The built-in layer set: Kartverket's three map products.
    pub fn defaults() -> Vec<Self> {
        vec![
            Layer::kartverket("Topographic", "topo"),
            Layer::kartverket("Grayscale", "topograatone"),
            Layer::kartverket("Toporaster", "toporaster"),
        ]
    }

    /// Stable identifier, also the cache scope for this source's tiles.
    pub fn id(&self) -> &str {
        match self {
            Layer::Wmts { id, .. } | Layer::Wms { id, .. } | Layer::Template { id, .. } => id,
        }
    }

    /// Zoom levels this source serves.
    pub fn zoom_range(&self) -> ZoomRange {
        match self {
            Layer::Wmts { zoom, .. } | Layer::Wms { zoom, .. } | Layer::Template { zoom, .. } => {
                *zoom
            }
        }
    }

    /// Attribution line the embedding UI must display.
    pub fn attribution(&self) -> &str {
        match self {
            Layer::Wmts { attribution, .. }
            | Layer::Wms { attribution, .. }
            | Layer::Template { attribution, .. } => attribution,
        }
    }

    /// Builds the fetch URL for one tile.
    ///
    /// Pure function of the key: equal keys always produce equal URLs.
    pub fn url_for(&self, key: &TileKey) -> Result<String, LayerError> {
        match self {
            Layer::Wmts { template, .. } | Layer::Template { template, .. } => {
                expand_template(template, key)
            }
            Layer::Wms {
                endpoint, layers, ..
            } => Ok(wms_url(endpoint, layers, key)),
        }
    }
}

/// Substitutes `{z}`, `{x}` and `{y}` (flipped row) into a URL template,
/// each at most once.
fn expand_template(template: &str, key: &TileKey) -> Result<String, LayerError> {
    for placeholder in ["{z}", "{x}", "{y}"] {
        if !template.contains(placeholder) {
            return Err(LayerError::MissingPlaceholder {
                template: template.to_string(),
                placeholder,
            });
        }
    }
    Ok(template
        .replacen("{z}", &key.zoom.to_string(), 1)
        .replacen("{x}", &key.x.to_string(), 1)
        .replacen("{y}", &key.y.to_string(), 1))
}

/// GetMap query for one tile. The bounding box is the tile's projected
/// extent, so the rendered map aligns with neighboring WMTS tiles.
fn wms_url(endpoint: &str, layers: &str, key: &TileKey) -> String {
    let mercator = Mercator::new(key.size);
    let (min, max) = mercator.tile_bounds_meters(key.tile_index(), key.zoom);
    format!(
        "{}?layers={}&service=WMS&request=GetMap&version=1.3.0&crs=EPSG:900913&width={}&height={}&format=image/png&bbox={},{},{},{}",
        endpoint, layers, key.size, key.size, min.x, min.y, max.x, max.y
    )
}
