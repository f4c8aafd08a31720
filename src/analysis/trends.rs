//! Year-over-year trend table.

use crate::alert::tiers::{AlertLevel, classify_alert};
use crate::model::ForecastPoint;
use serde::Serialize;

/// One row of the trend insights table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub year: i32,
    pub precipitation_mm: f64,
    /// Difference from the previous year; `None` on the first row.
    pub change_mm: Option<f64>,
    /// Percent difference from the previous year; `None` on the first row
    /// or when the previous value is zero.
    pub percent_change: Option<f64>,
    pub alert: AlertLevel,
}

/// Builds the trend table in the order the points are given.
pub fn trend_table(points: &[ForecastPoint]) -> Vec<TrendRow> {
    let mut rows = Vec::with_capacity(points.len());
    let mut previous: Option<f64> = None;

    for point in points {
        let value = point.precipitation_mm;
        let change_mm = previous.map(|prev| value - prev);
        let percent_change = previous
            .filter(|prev| *prev != 0.0)
            .map(|prev| (value - prev) / prev * 100.0);

        rows.push(TrendRow {
            year: point.year,
            precipitation_mm: value,
            change_mm,
            percent_change,
            alert: classify_alert(value),
        });
        previous = Some(value);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::model_forecast;

    #[test]
    fn test_first_row_has_no_change() {
        let rows = trend_table(&model_forecast());
        assert_eq!(rows.len(), 6);
        assert!(rows[0].change_mm.is_none());
        assert!(rows[0].percent_change.is_none());
    }

    #[test]
    fn test_change_is_relative_to_previous_year() {
        let rows = trend_table(&model_forecast());
        let change = rows[1].change_mm.expect("second row has a change");
        assert!((change - (52886.41 - 53929.17)).abs() < 1e-9);
        let pct = rows[1].percent_change.expect("previous value is non-zero");
        assert!(pct < 0.0, "2026 is drier than 2025, got {}", pct);
    }

    #[test]
    fn test_alert_column_matches_classifier() {
        for row in trend_table(&model_forecast()) {
            assert_eq!(row.alert, classify_alert(row.precipitation_mm));
        }
    }

    #[test]
    fn test_zero_previous_value_has_change_but_no_percent() {
        let rows = trend_table(&[ForecastPoint::new(2025, 0.0), ForecastPoint::new(2026, 500.0)]);
        assert_eq!(rows[1].change_mm, Some(500.0));
        assert!(rows[1].percent_change.is_none());
    }

    #[test]
    fn test_empty_series_gives_empty_table() {
        assert!(trend_table(&[]).is_empty());
    }
}
