//! Command line entry point.

use crate::alert::tiers::{Classification, classify};
use crate::analysis::comparison::{UserForecast, comparison_table};
use crate::analysis::summary::{ForecastSummary, TrendSummary};
use crate::analysis::trends::trend_table;
use crate::charts::{ChartKind, build_chart};
use crate::config::{DashboardConfig, load_config};
use crate::dashboard;
use crate::export::{self, ExportItem, FORECAST_CSV_FILE, MAP_VIEW_FILE};
use crate::geography::{build_map_view, load_geojson};
use crate::logging::{Component, TARGET_CONFIG, init_logger, log_failure};
use crate::model::{ForecastPoint, OutlookError, find_point, model_forecast};
use crate::tiles::{TILE_REGISTRY, find_tile};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "precip-outlook",
    about = "Long-term precipitation outlook: tiers, alerts, maps, charts and exports",
    version
)]
pub struct Cli {
    /// Config file (defaults to $PRECIP_OUTLOOK_CONFIG or precip_outlook.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Your own forecast for a year, e.g. --user 2027=54100. Repeatable.
    #[arg(long = "user", value_name = "YEAR=MM", global = true)]
    pub user: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify precipitation values (mm) into tiers.
    Classify(ClassifyArgs),

    /// Print max/min/average of the model forecast.
    Summary,

    /// Map view for one forecast year.
    Map(MapArgs),

    /// Chart view for one chart type.
    Chart(ChartArgs),

    /// Trend, comparison and data tables.
    Tables,

    /// Write the forecast CSV, chart specs and map view to a directory.
    Export(ExportArgs),

    /// List map tile styles.
    Tiles,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Forecast year; defaults to the first year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Tile style name; defaults to the configured style.
    #[arg(long)]
    pub tile: Option<String>,

    /// GeoJSON boundary; defaults to the configured path.
    #[arg(long)]
    pub geojson: Option<PathBuf>,

    /// Also write the map view JSON into this directory.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// bar, line, grouped-bar or multi-line.
    #[arg(long, default_value = "bar")]
    pub kind: ChartKind,

    /// Also write the chart spec JSON into this directory.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory; defaults to the configured one.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub config: DashboardConfig,
    pub model: Vec<ForecastPoint>,
    pub user: UserForecast,
}

impl Context {
    pub fn new(config: DashboardConfig, user_pairs: &[String]) -> Result<Self, OutlookError> {
        Ok(Self {
            config,
            model: model_forecast(),
            user: UserForecast::from_pairs(user_pairs)?,
        })
    }
}

pub fn run_from_env() -> Result<(), OutlookError> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let level = config.logging.min_level()?;
    init_logger(level, config.logging.file.as_deref(), config.logging.console_timestamps);
    log::debug!(target: TARGET_CONFIG, "Using config: {:?}", config);

    let ctx = Context::new(config, &cli.user)?;
    let output = execute(&ctx, &cli.command).inspect_err(|err| {
        log_failure(Component::System, "command", err);
    })?;
    print!("{}", output);
    Ok(())
}

/// Runs one command and returns the text to print.
pub fn execute(ctx: &Context, command: &Commands) -> Result<String, OutlookError> {
    match command {
        Commands::Classify(args) => run_classify(args),
        Commands::Summary => Ok(run_summary(ctx)),
        Commands::Map(args) => run_map(ctx, args),
        Commands::Chart(args) => run_chart(ctx, args),
        Commands::Tables => Ok(run_tables(ctx)),
        Commands::Export(args) => run_export(ctx, args),
        Commands::Tiles => Ok(run_tiles()),
    }
}

#[derive(Serialize)]
struct ClassifiedValue {
    value_mm: f64,
    #[serde(flatten)]
    classification: Classification,
}

fn run_classify(args: &ClassifyArgs) -> Result<String, OutlookError> {
    let results: Vec<ClassifiedValue> = args
        .values
        .iter()
        .map(|&value_mm| ClassifiedValue { value_mm, classification: classify(value_mm) })
        .collect();

    if args.json {
        let mut text = serde_json::to_string_pretty(&results)
            .map_err(|e| OutlookError::Encode(e.to_string()))?;
        text.push('\n');
        return Ok(text);
    }

    let mut out = String::new();
    for r in &results {
        let _ = writeln!(
            out,
            "{:.2} mm → tier {} · {} · {}",
            r.value_mm,
            r.classification.tier,
            r.classification.color,
            r.classification.alert.badge()
        );
    }
    Ok(out)
}

fn run_summary(ctx: &Context) -> String {
    let mut panels = vec![dashboard::render_header(&ctx.config.region, &ctx.model)];
    if let Some(summary) = ForecastSummary::from_points(&ctx.model) {
        panels.push(dashboard::render_summary(&summary));
    }
    dashboard::join_panels(&panels)
}

fn run_map(ctx: &Context, args: &MapArgs) -> Result<String, OutlookError> {
    let year = args.year.unwrap_or(ctx.model[0].year);
    let point = find_point(year)?;
    let tile = find_tile(args.tile.as_deref().unwrap_or(&ctx.config.map.default_tile))?;
    let geojson_path = args.geojson.as_ref().unwrap_or(&ctx.config.geojson_path);
    let doc = load_geojson(geojson_path)?;

    let view = build_map_view(&doc, &point, tile, &ctx.config.map, &ctx.config.region);
    let mut text = dashboard::render_map_view(&view);

    if let Some(dir) = &args.out {
        let path = export::write_json(dir, MAP_VIEW_FILE, &view)?;
        let _ = writeln!(text, "📥 Map view written to {}", path.display());
    }
    Ok(text)
}

fn run_chart(ctx: &Context, args: &ChartArgs) -> Result<String, OutlookError> {
    let spec = build_chart(args.kind, &ctx.model, &ctx.user);
    let trend = TrendSummary::from_points(&ctx.model);
    let mut text = dashboard::render_chart_view(&spec, &ctx.model, trend.as_ref());

    if let Some(dir) = &args.out {
        let path = export::write_json(dir, &spec.file_name(), &spec)?;
        let _ = writeln!(text, "📥 Chart written to {}", path.display());
    }
    Ok(text)
}

fn run_tables(ctx: &Context) -> String {
    let mut comparison = dashboard::render_comparison_table(&comparison_table(&ctx.model, &ctx.user));
    if ctx.user.is_blank() {
        let _ = writeln!(comparison, "  (no forecast of your own yet; add one with --user YEAR=MM)");
    }
    dashboard::join_panels(&[
        dashboard::render_trend_table(&trend_table(&ctx.model)),
        comparison,
        dashboard::render_data_table(&ctx.model),
    ])
}

/// Builds the export batch. A boundary that cannot be loaded only fails
/// the map view item.
pub fn export_items(ctx: &Context) -> Vec<ExportItem> {
    let mut items = vec![ExportItem::bytes(
        FORECAST_CSV_FILE,
        export::forecast_csv(&ctx.model).into_bytes(),
    )];

    for kind in ChartKind::ALL {
        let spec = build_chart(kind, &ctx.model, &ctx.user);
        items.push(ExportItem::json(spec.file_name(), &spec));
    }

    let map_item = find_tile(&ctx.config.map.default_tile).and_then(|tile| {
        let doc = load_geojson(&ctx.config.geojson_path)?;
        let point = ctx.model[0];
        Ok(build_map_view(&doc, &point, tile, &ctx.config.map, &ctx.config.region))
    });
    items.push(match map_item {
        Ok(view) => ExportItem::json(MAP_VIEW_FILE, &view),
        Err(err) => ExportItem::failed(MAP_VIEW_FILE, err),
    });

    items
}

fn run_export(ctx: &Context, args: &ExportArgs) -> Result<String, OutlookError> {
    let dir = args.out.as_ref().unwrap_or(&ctx.config.output_dir);
    let mut report = export::export_all(dir, export_items(ctx));

    if report.written.is_empty() && !report.failed.is_empty() {
        let (_, err) = report.failed.swap_remove(0);
        return Err(err);
    }

    let mut out = String::new();
    for path in &report.written {
        let _ = writeln!(out, "📥 {}", path.display());
    }
    for (name, err) in &report.failed {
        let _ = writeln!(out, "⚠ {} skipped: {}", name, err);
    }
    Ok(out)
}

fn run_tiles() -> String {
    let mut out = String::new();
    for tile in TILE_REGISTRY {
        match tile.attribution {
            Some(attr) => {
                let _ = writeln!(out, "{} ({})", tile.name, attr);
            }
            None => {
                let _ = writeln!(out, "{}", tile.name);
            }
        }
    }
    out
}
