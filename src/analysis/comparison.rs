//! User-entered forecasts and the model-vs-user comparison table.

use crate::alert::tiers::{AlertLevel, classify_alert};
use crate::model::{FORECAST_YEARS, ForecastPoint, OutlookError};
use serde::Serialize;

/// Smallest value a user may enter, in mm.
pub const USER_MIN_MM: f64 = 0.0;

/// One user-entered value per forecast year. Years left blank stay at 0 mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserForecast {
    values_mm: [f64; FORECAST_YEARS.len()],
}

impl Default for UserForecast {
    fn default() -> Self {
        Self {
            values_mm: [USER_MIN_MM; FORECAST_YEARS.len()],
        }
    }
}

impl UserForecast {
    /// Sets the value for one year.
    pub fn set(&mut self, year: i32, value_mm: f64) -> Result<(), OutlookError> {
        let index = FORECAST_YEARS
            .iter()
            .position(|&y| y == year)
            .ok_or(OutlookError::YearOutOfRange(year))?;

        if !value_mm.is_finite() || value_mm < USER_MIN_MM {
            return Err(OutlookError::InvalidUserValue {
                year,
                value: value_mm.to_string(),
            });
        }

        self.values_mm[index] = value_mm;
        Ok(())
    }

    /// Parses a single `YEAR=VALUE` pair, e.g. `2027=54100`.
    pub fn apply_pair(&mut self, pair: &str) -> Result<(), OutlookError> {
        let (year_str, value_str) = pair.split_once('=').ok_or_else(|| {
            OutlookError::InvalidUserValue {
                year: 0,
                value: pair.to_string(),
            }
        })?;

        let year: i32 = year_str.trim().parse().map_err(|_| OutlookError::InvalidUserValue {
            year: 0,
            value: pair.to_string(),
        })?;
        let value_mm: f64 = value_str.trim().parse().map_err(|_| OutlookError::InvalidUserValue {
            year,
            value: value_str.trim().to_string(),
        })?;

        self.set(year, value_mm)
    }

    /// Builds a user forecast from any number of `YEAR=VALUE` pairs.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, OutlookError> {
        let mut forecast = Self::default();
        for pair in pairs {
            forecast.apply_pair(pair.as_ref())?;
        }
        Ok(forecast)
    }

    pub fn value_for(&self, year: i32) -> Option<f64> {
        FORECAST_YEARS
            .iter()
            .position(|&y| y == year)
            .map(|index| self.values_mm[index])
    }

    /// The user values as forecast points, aligned with `FORECAST_YEARS`.
    pub fn points(&self) -> Vec<ForecastPoint> {
        FORECAST_YEARS
            .iter()
            .zip(self.values_mm.iter())
            .map(|(&year, &value)| ForecastPoint::new(year, value))
            .collect()
    }

    /// True when the user has not entered anything.
    pub fn is_blank(&self) -> bool {
        self.values_mm.iter().all(|&v| v == USER_MIN_MM)
    }
}

/// One row of the model-vs-user comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub year: i32,
    pub model_mm: f64,
    pub user_mm: f64,
    /// `user_mm - model_mm`.
    pub difference_mm: f64,
    /// Alert level of the model value.
    pub alert: AlertLevel,
}

/// Pairs each model point with the user value for the same year. Years the
/// user forecast does not cover compare against 0 mm.
pub fn comparison_table(model: &[ForecastPoint], user: &UserForecast) -> Vec<ComparisonRow> {
    model
        .iter()
        .map(|point| {
            let user_mm = user.value_for(point.year).unwrap_or(USER_MIN_MM);
            ComparisonRow {
                year: point.year,
                model_mm: point.precipitation_mm,
                user_mm,
                difference_mm: user_mm - point.precipitation_mm,
                alert: classify_alert(point.precipitation_mm),
            }
        })
        .collect()
}
