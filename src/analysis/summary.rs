//! Headline statistics over a forecast series.

use crate::model::ForecastPoint;
use serde::Serialize;

/// Max/min/average shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub max_mm: f64,
    pub min_mm: f64,
    pub mean_mm: f64,
}

impl ForecastSummary {
    /// Returns `None` for an empty series.
    pub fn from_points(points: &[ForecastPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let values = points.iter().map(|p| p.precipitation_mm);
        let max_mm = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let min_mm = values.clone().fold(f64::INFINITY, f64::min);
        let mean_mm = values.sum::<f64>() / points.len() as f64;
        Some(Self { max_mm, min_mm, mean_mm })
    }
}

/// Overall direction of the series, shown under the charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSummary {
    /// Change from the first to the last point, in percent. `None` when the
    /// first value is zero.
    pub percent_change: Option<f64>,
    /// First year holding the maximum value.
    pub max_year: i32,
    /// First year holding the minimum value.
    pub min_year: i32,
}

impl TrendSummary {
    pub fn from_points(points: &[ForecastPoint]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;

        let percent_change = if first.precipitation_mm == 0.0 {
            None
        } else {
            Some((last.precipitation_mm - first.precipitation_mm) / first.precipitation_mm * 100.0)
        };

        let mut max = first;
        let mut min = first;
        for point in points {
            if point.precipitation_mm > max.precipitation_mm {
                max = point;
            }
            if point.precipitation_mm < min.precipitation_mm {
                min = point;
            }
        }

        Some(Self {
            percent_change,
            max_year: max.year,
            min_year: min.year,
        })
    }
}
