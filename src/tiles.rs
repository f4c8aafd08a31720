/// Map tile style registry.
///
/// Defines the base-map styles the map view can be drawn on, along with
/// the attribution each provider requires. This is the single source of
/// truth for tile names; other modules look styles up here rather than
/// hardcoding provider strings.

use crate::model::OutlookError;
use serde::Serialize;

const STAMEN_ATTRIBUTION: &str =
    "Map tiles by Stamen Design, CC BY 3.0 — Map data © OpenStreetMap contributors";

/// A selectable base-map style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileStyle {
    /// Name shown in the tile selector.
    pub name: &'static str,
    /// Provider identifier handed to the map renderer.
    pub provider: &'static str,
    /// Attribution text, for providers whose terms require one.
    pub attribution: Option<&'static str>,
}

/// All tile styles, in selector order. The first entry is the default.
pub static TILE_REGISTRY: &[TileStyle] = &[
    TileStyle {
        name: "CartoDB Positron",
        provider: "CartoDB positron",
        attribution: None,
    },
    TileStyle {
        name: "OpenStreetMap",
        provider: "OpenStreetMap",
        attribution: None,
    },
    TileStyle {
        name: "Stamen Terrain",
        provider: "Stamen Terrain",
        attribution: Some(STAMEN_ATTRIBUTION),
    },
    TileStyle {
        name: "Stamen Toner",
        provider: "Stamen Toner",
        attribution: Some(STAMEN_ATTRIBUTION),
    },
];

/// The style used when none is selected.
pub fn default_tile() -> &'static TileStyle {
    &TILE_REGISTRY[0]
}

/// Names of all styles, in selector order.
pub fn tile_names() -> Vec<&'static str> {
    TILE_REGISTRY.iter().map(|t| t.name).collect()
}

/// Looks up a style by display name or provider id, ignoring case.
pub fn find_tile(name: &str) -> Result<&'static TileStyle, OutlookError> {
    let wanted = name.trim();
    TILE_REGISTRY
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(wanted) || t.provider.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| OutlookError::UnknownTile(name.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
