/// Integration tests for the dashboard command flow
///
/// Tests verify:
/// 1. Map view built from the bundled boundary file
/// 2. Chart views for every chart type
/// 3. Full export batch: CSV, chart specs, map view, manifest
/// 4. Degraded export when the boundary file is missing
///
/// Run with: cargo test --test dashboard_integration

use precip_outlook::cli::{ChartArgs, Commands, Context, ExportArgs, MapArgs, execute};
use precip_outlook::charts::ChartKind;
use precip_outlook::config::DashboardConfig;
use precip_outlook::export::{FORECAST_CSV_FILE, MANIFEST_FILE, MAP_VIEW_FILE};
use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn fixture_geojson() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/state.geojson")
}

fn context_with(geojson: PathBuf, user: &[&str]) -> Context {
    let config = DashboardConfig {
        geojson_path: geojson,
        ..DashboardConfig::default()
    };
    let pairs: Vec<String> = user.iter().map(|s| s.to_string()).collect();
    Context::new(config, &pairs).expect("test user pairs are valid")
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("export is valid JSON")
}

// ---------------------------------------------------------------------------
// Map view
// ---------------------------------------------------------------------------

#[test]
fn test_map_view_for_2030_raises_extreme_warning() {
    let ctx = context_with(fixture_geojson(), &[]);
    let out_dir = tempfile::tempdir().expect("temp dir");

    let text = execute(
        &ctx,
        &Commands::Map(MapArgs {
            year: Some(2030),
            tile: Some("Stamen Terrain".to_string()),
            geojson: None,
            out: Some(out_dir.path().to_path_buf()),
        }),
    )
    .expect("map view builds from fixture");

    assert!(text.contains("🔔 2030 Rainfall Alert: 🚨 Very Heavy"), "got:\n{}", text);
    assert!(text.contains("🚨 Alert: Very High Rainfall Predicted — 55310.82 mm"));
    assert!(text.contains("Map tiles by Stamen Design"));

    let view = read_json(&out_dir.path().join(MAP_VIEW_FILE));
    assert_eq!(view["year"], 2030);
    assert_eq!(view["tile"]["provider"], "Stamen Terrain");
    assert_eq!(view["overlay"]["features"][0]["properties"]["style"]["fillColor"], "#08306b");
    assert_eq!(view["overlay"]["features"][0]["properties"]["name"], "Kerala");
    assert_eq!(view["marker"]["popup"], "2030 Predicted: 55310.82 mm");
}

#[test]
fn test_map_view_defaults_to_first_year_and_default_tile() {
    let ctx = context_with(fixture_geojson(), &[]);
    let text = execute(
        &ctx,
        &Commands::Map(MapArgs { year: None, tile: None, geojson: None, out: None }),
    )
    .expect("map view builds");

    assert!(text.starts_with("🔔 2025 Rainfall Alert: 🟠 Medium"), "got:\n{}", text);
    assert!(!text.contains("Very High Rainfall"));
    assert!(text.contains("CartoDB Positron"));
    assert!(text.contains("fill #4292c6"));
}

#[test]
fn test_map_view_with_missing_boundary_fails() {
    let ctx = context_with(PathBuf::from("/nonexistent/state.geojson"), &[]);
    let err = execute(
        &ctx,
        &Commands::Map(MapArgs { year: Some(2027), tile: None, geojson: None, out: None }),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("Geography read error"), "got: {}", err);
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[test]
fn test_every_chart_kind_renders_and_exports() {
    let ctx = context_with(fixture_geojson(), &["2025=54000", "2030=56000"]);
    let out_dir = tempfile::tempdir().expect("temp dir");

    for kind in ChartKind::ALL {
        let text = execute(
            &ctx,
            &Commands::Chart(ChartArgs { kind, out: Some(out_dir.path().to_path_buf()) }),
        )
        .expect("chart renders");
        assert!(text.contains(kind.title()), "{} output missing title:\n{}", kind, text);
        assert!(text.contains("Trend Summary:"));

        let spec = read_json(&out_dir.path().join(format!("{}.json", kind.file_stem())));
        let expected_series = if kind.compares_user() { 2 } else { 1 };
        assert_eq!(
            spec["series"].as_array().map(Vec::len),
            Some(expected_series),
            "{} should have {} series",
            kind,
            expected_series
        );
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn test_full_export_writes_all_files() {
    let ctx = context_with(fixture_geojson(), &[]);
    let out_dir = tempfile::tempdir().expect("temp dir");

    let text = execute(
        &ctx,
        &Commands::Export(ExportArgs { out: Some(out_dir.path().to_path_buf()) }),
    )
    .expect("export succeeds");
    assert!(!text.contains("skipped"), "nothing should be skipped:\n{}", text);

    let csv = fs::read_to_string(out_dir.path().join(FORECAST_CSV_FILE)).expect("CSV written");
    assert!(csv.starts_with("Year,Precipitation (mm)\n2025,53929.17\n"));

    for kind in ChartKind::ALL {
        assert!(
            out_dir.path().join(format!("{}.json", kind.file_stem())).exists(),
            "missing chart export for {}",
            kind
        );
    }

    let manifest = read_json(&out_dir.path().join(MANIFEST_FILE));
    assert_eq!(manifest["files"].as_array().map(Vec::len), Some(6));
    assert_eq!(manifest["failed"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_export_without_boundary_skips_only_map_view() {
    let ctx = context_with(PathBuf::from("/nonexistent/state.geojson"), &[]);
    let out_dir = tempfile::tempdir().expect("temp dir");

    let text = execute(
        &ctx,
        &Commands::Export(ExportArgs { out: Some(out_dir.path().to_path_buf()) }),
    )
    .expect("partial export is not an error");

    assert!(text.contains(&format!("⚠ {} skipped", MAP_VIEW_FILE)), "got:\n{}", text);
    assert!(out_dir.path().join(FORECAST_CSV_FILE).exists());
    assert!(!out_dir.path().join(MAP_VIEW_FILE).exists());
}

#[test]
fn test_tables_reflect_user_forecast() {
    let ctx = context_with(fixture_geojson(), &["2026=53000"]);
    let text = execute(&ctx, &Commands::Tables).expect("tables render");

    let row = text
        .lines()
        .filter(|l| l.trim_start().starts_with("2026"))
        .find(|l| l.contains("53000.00"))
        .expect("comparison row for 2026");
    assert!(row.contains("113.59"), "difference 53000 - 52886.41: '{}'", row);
    assert!(row.ends_with("🟡 Light"));
}
