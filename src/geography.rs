//! Region boundary loading and map view construction.
//!
//! The boundary is an ordinary GeoJSON document. It is only checked for a
//! recognisable top-level shape and otherwise passed through untouched,
//! except that every feature gets the fill style of the selected year's
//! tier attached under `properties.style`, the convention Leaflet-style
//! renderers read.

use crate::alert::banner::{check_extreme_rainfall, rainfall_alert};
use crate::alert::tiers::classify_color;
use crate::config::MapConfig;
use crate::logging::TARGET_GEOGRAPHY;
use crate::model::{ForecastPoint, OutlookError};
use crate::tiles::TileStyle;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;

const GEOMETRY_TYPES: &[&str] = &[
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses GeoJSON text and checks its top-level `type`.
pub fn parse_geojson(text: &str) -> Result<Value, OutlookError> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| OutlookError::GeographyParse(e.to_string()))?;

    let kind = doc
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| OutlookError::GeographyParse("missing top-level \"type\"".to_string()))?;

    match kind {
        "FeatureCollection" => {
            if !doc.get("features").is_some_and(Value::is_array) {
                return Err(OutlookError::GeographyParse(
                    "FeatureCollection without a \"features\" array".to_string(),
                ));
            }
        }
        "Feature" => {}
        other if GEOMETRY_TYPES.contains(&other) => {}
        other => {
            return Err(OutlookError::GeographyParse(format!(
                "unsupported GeoJSON type \"{}\"",
                other
            )));
        }
    }

    Ok(doc)
}

/// Reads and parses a GeoJSON file.
pub fn load_geojson(path: &Path) -> Result<Value, OutlookError> {
    let text = fs::read_to_string(path)
        .map_err(|e| OutlookError::GeographyIo(format!("{}: {}", path.display(), e)))?;
    let doc = parse_geojson(&text)?;
    log::debug!(
        target: TARGET_GEOGRAPHY,
        "Loaded {} with {} feature(s)",
        path.display(),
        feature_count(&doc)
    );
    Ok(doc)
}

/// Number of features the document will draw as.
pub fn feature_count(doc: &Value) -> usize {
    match doc.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => doc
            .get("features")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        Some(_) => 1,
        None => 0,
    }
}

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

/// Fill style for the region overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayStyle {
    #[serde(rename = "fillColor")]
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: u8,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
}

impl OverlayStyle {
    pub fn for_value(value_mm: f64) -> Self {
        Self {
            fill_color: classify_color(value_mm),
            color: "black",
            weight: 1,
            fill_opacity: 0.6,
        }
    }
}

fn attach_style(feature: &mut Value, style: &Value) {
    if let Value::Object(obj) = feature {
        let props = obj
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        if !props.is_object() {
            *props = Value::Object(Map::new());
        }
        if let Value::Object(props) = props {
            props.insert("style".to_string(), style.clone());
        }
    }
}

/// Copies the document with `style` attached to every feature. A bare
/// geometry is wrapped into a Feature first.
pub fn styled_overlay(doc: &Value, style: &OverlayStyle) -> Value {
    let style = json!(style);
    let mut out = match doc.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") | Some("Feature") => doc.clone(),
        _ => json!({ "type": "Feature", "properties": {}, "geometry": doc }),
    };

    if out.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
        if let Some(features) = out.get_mut("features").and_then(Value::as_array_mut) {
            for feature in features {
                attach_style(feature, &style);
            }
        }
    } else {
        attach_style(&mut out, &style);
    }
    out
}

// ---------------------------------------------------------------------------
// Map view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
    pub icon_color: &'static str,
    pub icon: &'static str,
}

/// Everything a renderer needs to draw the map for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub region: String,
    pub year: i32,
    pub precipitation_mm: f64,
    pub alert_headline: String,
    pub extreme_warning: Option<String>,
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub width_px: u32,
    pub height_px: u32,
    pub tile: TileStyle,
    pub style: OverlayStyle,
    pub marker: MapMarker,
    pub overlay: Value,
}

pub fn build_map_view(
    doc: &Value,
    point: &ForecastPoint,
    tile: &TileStyle,
    map: &MapConfig,
    region: &str,
) -> MapView {
    let style = OverlayStyle::for_value(point.precipitation_mm);
    let overlay = styled_overlay(doc, &style);

    MapView {
        region: region.to_string(),
        year: point.year,
        precipitation_mm: point.precipitation_mm,
        alert_headline: rainfall_alert(point).headline(),
        extreme_warning: check_extreme_rainfall(point).map(|w| w.message),
        center: [map.center_lat, map.center_lon],
        zoom: map.zoom,
        width_px: map.width_px,
        height_px: map.height_px,
        tile: *tile,
        style,
        marker: MapMarker {
            lat: map.marker_lat,
            lon: map.marker_lon,
            popup: format!("{} Predicted: {:.2} mm", point.year, point.precipitation_mm),
            icon_color: "blue",
            icon: "cloud",
        },
        overlay,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::default_tile;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Test" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[76.0, 10.0], [77.0, 10.0], [77.0, 11.0], [76.0, 11.0], [76.0, 10.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": { "type": "Point", "coordinates": [76.5, 10.5] }
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let doc = parse_geojson(SQUARE).expect("valid GeoJSON");
        assert_eq!(feature_count(&doc), 2);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_geojson("{ not json").unwrap_err();
        assert!(matches!(err, OutlookError::GeographyParse(_)), "got {:?}", err);
    }

    #[test]
    fn test_parse_rejects_missing_type() {
        let err = parse_geojson(r#"{"features": []}"#).unwrap_err();
        assert!(matches!(err, OutlookError::GeographyParse(_)), "got {:?}", err);
    }

    #[test]
    fn test_parse_rejects_collection_without_features() {
        assert!(parse_geojson(r#"{"type": "FeatureCollection"}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        assert!(parse_geojson(r#"{"type": "Topology"}"#).is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_geojson(Path::new("/nonexistent/state.geojson")).unwrap_err();
        assert!(matches!(err, OutlookError::GeographyIo(_)), "got {:?}", err);
    }

    #[test]
    fn test_style_uses_tier_color() {
        let style = OverlayStyle::for_value(55310.82);
        assert_eq!(style.fill_color, "#08306b");
        assert_eq!(style.color, "black");
        assert_eq!(style.weight, 1);
        assert_eq!(style.fill_opacity, 0.6);
    }

    #[test]
    fn test_styled_overlay_styles_every_feature() {
        let doc = parse_geojson(SQUARE).expect("valid GeoJSON");
        let out = styled_overlay(&doc, &OverlayStyle::for_value(53929.17));
        let features = out["features"].as_array().expect("features array");
        for feature in features {
            assert_eq!(feature["properties"]["style"]["fillColor"], "#4292c6");
            assert_eq!(feature["properties"]["style"]["fillOpacity"], 0.6);
        }
        // Existing properties survive.
        assert_eq!(features[0]["properties"]["name"], "Test");
        // Input document is left untouched.
        assert!(doc["features"][0]["properties"].get("style").is_none());
    }

    #[test]
    fn test_bare_geometry_is_wrapped() {
        let doc = parse_geojson(r#"{"type": "Point", "coordinates": [76.5, 10.5]}"#)
            .expect("geometry is valid");
        let out = styled_overlay(&doc, &OverlayStyle::for_value(0.0));
        assert_eq!(out["type"], "Feature");
        assert_eq!(out["geometry"]["type"], "Point");
        assert_eq!(out["properties"]["style"]["fillColor"], "#c6dbef");
    }

    #[test]
    fn test_map_view_for_extreme_year() {
        let doc = parse_geojson(SQUARE).expect("valid GeoJSON");
        let view = build_map_view(
            &doc,
            &ForecastPoint::new(2030, 55310.82),
            default_tile(),
            &MapConfig::default(),
            "Kerala",
        );
        assert_eq!(view.center, [10.5, 76.5]);
        assert_eq!(view.zoom, 7);
        assert_eq!(view.marker.popup, "2030 Predicted: 55310.82 mm");
        assert_eq!(view.marker.icon, "cloud");
        assert_eq!(view.alert_headline, "🔔 2030 Rainfall Alert: 🚨 Very Heavy");
        assert!(view.extreme_warning.is_some());
    }

    #[test]
    fn test_map_view_without_warning() {
        let doc = parse_geojson(SQUARE).expect("valid GeoJSON");
        let view = build_map_view(
            &doc,
            &ForecastPoint::new(2027, 54020.01),
            default_tile(),
            &MapConfig::default(),
            "Kerala",
        );
        assert!(view.extreme_warning.is_none());
        assert_eq!(view.style.fill_color, "#2171b5");
    }
}
