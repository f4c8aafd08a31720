//! Chart specifications for the chart view.
//!
//! Charts are described, not drawn: a `ChartSpec` holds the series, colors
//! and styling a plotting front end needs, and serializes to JSON for
//! export.

use crate::analysis::comparison::UserForecast;
use crate::model::{ForecastPoint, OutlookError, PRECIP_COLUMN};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Sequential blue palette, lightest first.
pub const BLUES: [&str; 9] = [
    "rgb(247,251,255)",
    "rgb(222,235,247)",
    "rgb(198,219,239)",
    "rgb(158,202,225)",
    "rgb(107,174,214)",
    "rgb(66,146,198)",
    "rgb(33,113,181)",
    "rgb(8,81,156)",
    "rgb(8,48,107)",
];

pub const MODEL_LINE_COLOR: &str = "#1f77b4";
pub const MODEL_COMPARE_COLOR: &str = "skyblue";
pub const USER_COMPARE_COLOR: &str = "white";
pub const LINE_WIDTH: u8 = 3;

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Model values as bars.
    Bar,
    /// Model values as a line.
    Line,
    /// Model and user values as side-by-side bars.
    GroupedBar,
    /// Model and user values as two lines.
    MultiLine,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::GroupedBar,
        ChartKind::MultiLine,
    ];

    /// Selector label.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "📊 Bar Chart (Model Only)",
            ChartKind::Line => "📈 Line Chart (Model Only)",
            ChartKind::GroupedBar => "🧱 Stacked Bar Chart (Model vs You)",
            ChartKind::MultiLine => "📉 Multi-Line Chart (Model vs You)",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart: Model Predicted Precipitation",
            ChartKind::Line => "Line Chart: Model Predicted Precipitation",
            ChartKind::GroupedBar => "Stacked Bar Chart: Model vs Your Prediction",
            ChartKind::MultiLine => "Multiple Line Chart: Model vs Your Forecast",
        }
    }

    /// Export file name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar_chart",
            ChartKind::Line => "line_chart",
            ChartKind::GroupedBar => "stacked_bar_chart",
            ChartKind::MultiLine => "multi_line_chart",
        }
    }

    pub fn compares_user(self) -> bool {
        matches!(self, ChartKind::GroupedBar | ChartKind::MultiLine)
    }

    fn mark(self) -> Mark {
        match self {
            ChartKind::Bar | ChartKind::GroupedBar => Mark::Bar,
            ChartKind::Line | ChartKind::MultiLine => Mark::Line,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::GroupedBar => "grouped-bar",
            ChartKind::MultiLine => "multi-line",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ChartKind {
    type Err = OutlookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "grouped-bar" | "stacked-bar" => Ok(ChartKind::GroupedBar),
            "multi-line" => Ok(ChartKind::MultiLine),
            _ => Err(OutlookError::UnknownChart(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart spec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    /// One color for the whole series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    /// One color per point; used by the model-only bar chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_colors: Option<Vec<&'static str>>,
    pub points: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub mark: Mark,
    /// "group" for side-by-side bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<u8>,
    pub markers: bool,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn file_name(&self) -> String {
        format!("{}.json", self.kind.file_stem())
    }
}

/// Picks `n` shades from the dark end of the palette, lightest first.
fn palette_for(n: usize) -> Vec<&'static str> {
    let start = BLUES.len().saturating_sub(n);
    (0..n).map(|i| BLUES[(start + i).min(BLUES.len() - 1)]).collect()
}

pub fn build_chart(kind: ChartKind, model: &[ForecastPoint], user: &UserForecast) -> ChartSpec {
    let mark = kind.mark();

    let series = match kind {
        ChartKind::Bar => vec![Series {
            name: "Model".to_string(),
            color: None,
            point_colors: Some(palette_for(model.len())),
            points: model.to_vec(),
        }],
        ChartKind::Line => vec![Series {
            name: "Model".to_string(),
            color: Some(MODEL_LINE_COLOR),
            point_colors: None,
            points: model.to_vec(),
        }],
        ChartKind::GroupedBar | ChartKind::MultiLine => vec![
            Series {
                name: "Model".to_string(),
                color: Some(MODEL_COMPARE_COLOR),
                point_colors: None,
                points: model.to_vec(),
            },
            Series {
                name: "User".to_string(),
                color: Some(USER_COMPARE_COLOR),
                point_colors: None,
                points: user.points(),
            },
        ],
    };

    log::debug!(
        target: crate::logging::TARGET_CHARTS,
        "Built {} chart with {} series",
        kind,
        series.len()
    );

    ChartSpec {
        kind,
        title: kind.title(),
        x_label: "Year",
        y_label: PRECIP_COLUMN,
        mark,
        bar_mode: (kind == ChartKind::GroupedBar).then_some("group"),
        line_width: (mark == Mark::Line).then_some(LINE_WIDTH),
        markers: mark == Mark::Line,
        series,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
