//! Rainfall alert banners.
//!
//! Turns a forecast point into the headline shown above the map or chart,
//! plus the separate warning raised when a year lands in the highest tier.

use crate::alert::tiers::{AlertLevel, Classification, classify};
use crate::model::ForecastPoint;

/// The alert headline for one forecast year.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallAlert {
    pub year: i32,
    pub precipitation_mm: f64,
    pub classification: Classification,
}

impl RainfallAlert {
    /// e.g. "🔔 2027 Rainfall Alert: 🟠 Medium"
    pub fn headline(&self) -> String {
        format!(
            "🔔 {} Rainfall Alert: {}",
            self.year,
            self.classification.alert.badge()
        )
    }

    /// One-line banner used in the chart view.
    pub fn banner(&self) -> String {
        format!(
            "🔔 Rainfall Alert ({}): {} — Predicted: {:.2} mm",
            self.year,
            self.classification.alert.badge(),
            self.precipitation_mm
        )
    }
}

/// Warning raised only for values in the Very Heavy tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeRainfallWarning {
    pub year: i32,
    pub message: String,
}

pub fn rainfall_alert(point: &ForecastPoint) -> RainfallAlert {
    RainfallAlert {
        year: point.year,
        precipitation_mm: point.precipitation_mm,
        classification: classify(point.precipitation_mm),
    }
}

/// Returns a warning if the point is in the highest tier (strictly above
/// 55000 mm), `None` otherwise.
pub fn check_extreme_rainfall(point: &ForecastPoint) -> Option<ExtremeRainfallWarning> {
    if classify(point.precipitation_mm).alert != AlertLevel::VeryHeavy {
        return None;
    }
    Some(ExtremeRainfallWarning {
        year: point.year,
        message: format!(
            "🚨 Alert: Very High Rainfall Predicted — {:.2} mm",
            point.precipitation_mm
        ),
    })
}
