//! Terminal rendering of the dashboard panels.
//!
//! Every panel is a pure function from derived data to text, so the CLI
//! can print any combination and tests can check the output directly.

use crate::alert::banner::rainfall_alert;
use crate::analysis::comparison::ComparisonRow;
use crate::analysis::summary::{ForecastSummary, TrendSummary};
use crate::analysis::trends::TrendRow;
use crate::charts::ChartSpec;
use crate::geography::MapView;
use crate::model::{ForecastPoint, PRECIP_COLUMN};
use std::fmt::Write;

const RULE: &str = "───────────────────────────────────────────────────────────────";

/// Formats a value with thousands separators and two decimals,
/// e.g. `55310.82` → `"55,310.82"`.
pub fn format_mm(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

fn opt_2dp(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{:.2}", v))
}

/// Title block.
pub fn render_header(region: &str, points: &[ForecastPoint]) -> String {
    let span = match (points.first(), points.last()) {
        (Some(first), Some(last)) => format!(" ({}–{})", first.year, last.year),
        _ => String::new(),
    };
    format!(
        "💧 {} Long-Term Precipitation Outlook{}\nForecast. Visualize. Compare. Understand {}'s Rainfall Future.\n",
        region, span, region
    )
}

pub fn render_summary(summary: &ForecastSummary) -> String {
    format!(
        "📊 Summary\n  Max:     {} mm\n  Min:     {} mm\n  Average: {} mm\n",
        format_mm(summary.max_mm),
        format_mm(summary.min_mm),
        format_mm(summary.mean_mm)
    )
}

pub fn render_map_view(view: &MapView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.alert_headline);
    if let Some(warning) = &view.extreme_warning {
        let _ = writeln!(out, "{}", warning);
    }
    let _ = writeln!(
        out,
        "🛰️ Tiles: {} · center ({}, {}) · zoom {}",
        view.tile.name, view.center[0], view.center[1], view.zoom
    );
    if let Some(attribution) = view.tile.attribution {
        let _ = writeln!(out, "   {}", attribution);
    }
    let _ = writeln!(
        out,
        "🗺️ {} overlay: fill {} (opacity {}), outline {} {}px",
        view.region,
        view.style.fill_color,
        view.style.fill_opacity,
        view.style.color,
        view.style.weight
    );
    let _ = writeln!(
        out,
        "📍 Marker ({}, {}): {}",
        view.marker.lat, view.marker.lon, view.marker.popup
    );
    out
}

pub fn render_chart(spec: &ChartSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", spec.kind.label());
    let _ = writeln!(out, "{}", spec.title);

    let _ = write!(out, "  {:<6}", spec.x_label);
    for series in &spec.series {
        let _ = write!(out, " {:>14}", series.name);
    }
    let _ = writeln!(out);

    let rows = spec.series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    for i in 0..rows {
        let year = spec
            .series
            .iter()
            .find_map(|s| s.points.get(i))
            .map(|p| p.year.to_string())
            .unwrap_or_default();
        let _ = write!(out, "  {:<6}", year);
        for series in &spec.series {
            let cell = series
                .points
                .get(i)
                .map(|p| format!("{:.2}", p.precipitation_mm))
                .unwrap_or_default();
            let _ = write!(out, " {:>14}", cell);
        }
        let _ = writeln!(out);
    }
    out
}

/// Chart view: the first year's alert banner, the chart, and the trend
/// summary underneath.
pub fn render_chart_view(spec: &ChartSpec, model: &[ForecastPoint], trend: Option<&TrendSummary>) -> String {
    let mut out = String::new();
    if let Some(first) = model.first() {
        let _ = writeln!(out, "{}", rainfall_alert(first).banner());
        let _ = writeln!(out);
    }
    out.push_str(&render_chart(spec));
    if let (Some(trend), Some(first), Some(last)) = (trend, model.first(), model.last()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Trend Summary:");
        let _ = writeln!(
            out,
            "  ➤ Overall change from {} to {}: {}%",
            first.year,
            last.year,
            opt_2dp(trend.percent_change)
        );
        let _ = writeln!(out, "  ➤ Highest rainfall predicted in: {}", trend.max_year);
        let _ = writeln!(out, "  ➤ Lowest rainfall predicted in: {}", trend.min_year);
    }
    out
}

pub fn render_trend_table(rows: &[TrendRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📉 Trend Insights");
    let _ = writeln!(
        out,
        "  {:<6} {:>20} {:>12} {:>20} {:<12}",
        "Year", PRECIP_COLUMN, "Change (mm)", "Percent Change (%)", "Alert Level"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<6} {:>20.2} {:>12} {:>20} {}",
            row.year,
            row.precipitation_mm,
            opt_2dp(row.change_mm),
            opt_2dp(row.percent_change),
            row.alert.badge()
        );
    }
    out
}

pub fn render_comparison_table(rows: &[ComparisonRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 Forecast Comparison Table");
    let _ = writeln!(
        out,
        "  {:<6} {:>22} {:>21} {:>12} {:<12}",
        "Year", "Model Prediction (mm)", "Your Prediction (mm)", "Difference", "Alert"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<6} {:>22.2} {:>21.2} {:>12.2} {}",
            row.year,
            row.model_mm,
            row.user_mm,
            row.difference_mm,
            row.alert.badge()
        );
    }
    out
}

pub fn render_data_table(points: &[ForecastPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📄 Forecast Data Table");
    let _ = writeln!(out, "  {:<6} {:>20}", "Year", PRECIP_COLUMN);
    for point in points {
        let _ = writeln!(out, "  {:<6} {:>20.2}", point.year, point.precipitation_mm);
    }
    out
}

/// Joins panels with horizontal rules.
pub fn join_panels(panels: &[String]) -> String {
    panels
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&format!("{}\n", RULE))
}
