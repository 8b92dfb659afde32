// ── Map view constants ──
//
// Tile source, framing, and marker sizing shared by every map in the
// portal. Rendering is up to the caller; this is just the configuration a
// map widget needs.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::sheet::DESKTOP_MIN_WIDTH;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl Bounds {
    pub fn contains(&self, at: Coordinates) -> bool {
        (self.south_west[0]..=self.north_east[0]).contains(&at.lat)
            && (self.south_west[1]..=self.north_east[1]).contains(&at.lon)
    }
}

/// Map widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    pub tile_url: String,
    pub attribution: String,
    /// `[lat, lon]` of the initial view.
    pub center: [f64; 2],
    pub bounds: Bounds,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Zoom used when flying to a selected center.
    pub focus_zoom: u8,
    pub marker_size_mobile: u32,
    pub marker_size_desktop: u32,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            tile_url: OSM_TILE_URL.into(),
            attribution: OSM_ATTRIBUTION.into(),
            center: [14.1709, 121.244],
            bounds: Bounds {
                south_west: [14.135, 121.185],
                north_east: [14.23, 121.295],
            },
            min_zoom: 13,
            max_zoom: 18,
            focus_zoom: 18,
            marker_size_mobile: 30,
            marker_size_desktop: 50,
        }
    }
}

impl MapView {
    /// Marker icon edge length for a viewport width.
    pub fn marker_size(&self, viewport_width: f64) -> u32 {
        if viewport_width >= DESKTOP_MIN_WIDTH {
            self.marker_size_desktop
        } else {
            self.marker_size_mobile
        }
    }

    /// Concrete tile URL for one tile, using subdomain `a`.
    pub fn tile(&self, z: u8, x: u32, y: u32) -> String {
        self.tile_url
            .replace("{s}", "a")
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// `true` if `at` is inside the map's pan bounds.
    pub fn covers(&self, at: Coordinates) -> bool {
        self.bounds.contains(at)
    }
}
