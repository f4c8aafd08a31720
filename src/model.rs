/// Core data types for the precipitation outlook.
///
/// This module defines the shared domain model imported by all other modules:
/// the forecast points, the compiled-in reference forecast, and the crate
/// error type. It contains no logic beyond lookups and no I/O.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Reference forecast
// ---------------------------------------------------------------------------

/// Forecast years, in chronological order.
pub const FORECAST_YEARS: [i32; 6] = [2025, 2026, 2027, 2028, 2029, 2030];

/// Model-predicted yearly precipitation in millimeters, aligned with
/// `FORECAST_YEARS`.
pub const FORECAST_VALUES_MM: [f64; 6] = [
    53929.17, 52886.41, 54020.01, 54448.36, 54710.53, 55310.82,
];

/// Unit label used in table headers and chart axes.
pub const PRECIP_COLUMN: &str = "Precipitation (mm)";

// ---------------------------------------------------------------------------
// Forecast point
// ---------------------------------------------------------------------------

/// A single yearly forecast value.
///
/// Points are never mutated after construction; every view re-derives its
/// own rows from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub precipitation_mm: f64,
}

impl ForecastPoint {
    pub fn new(year: i32, precipitation_mm: f64) -> Self {
        Self { year, precipitation_mm }
    }
}

/// The reference model forecast, in chronological order.
pub fn model_forecast() -> Vec<ForecastPoint> {
    FORECAST_YEARS
        .iter()
        .zip(FORECAST_VALUES_MM.iter())
        .map(|(&year, &value)| ForecastPoint::new(year, value))
        .collect()
}

/// Looks up the model forecast for a single year.
pub fn find_point(year: i32) -> Result<ForecastPoint, OutlookError> {
    model_forecast()
        .into_iter()
        .find(|p| p.year == year)
        .ok_or(OutlookError::YearOutOfRange(year))
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the dashboard layers around the classifier.
///
/// Classification itself is total and never produces one of these.
#[derive(Debug, PartialEq)]
pub enum OutlookError {
    /// The requested year is not part of the forecast horizon.
    YearOutOfRange(i32),
    /// A user-entered comparison value was negative or not a number.
    InvalidUserValue { year: i32, value: String },
    /// The named map tile style is not in the registry.
    UnknownTile(String),
    /// The named chart type is not supported.
    UnknownChart(String),
    /// The geography file could not be read.
    GeographyIo(String),
    /// The geography file is not a usable GeoJSON document.
    GeographyParse(String),
    /// The configuration file could not be read or parsed.
    Config(String),
    /// Writing an export file failed.
    Export(String),
    /// A value could not be encoded as JSON.
    Encode(String),
}

impl std::fmt::Display for OutlookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutlookError::YearOutOfRange(year) => write!(
                f,
                "Year {} is outside the forecast horizon {}-{}",
                year,
                FORECAST_YEARS[0],
                FORECAST_YEARS[FORECAST_YEARS.len() - 1]
            ),
            OutlookError::InvalidUserValue { year, value } => {
                write!(f, "Invalid forecast value for {}: '{}' (must be >= 0 mm)", year, value)
            }
            OutlookError::UnknownTile(name) => write!(
                f,
                "Unknown map tile style: {} (available: {})",
                name,
                crate::tiles::tile_names().join(", ")
            ),
            OutlookError::UnknownChart(name) => write!(f, "Unknown chart type: {}", name),
            OutlookError::GeographyIo(msg) => write!(f, "Geography read error: {}", msg),
            OutlookError::GeographyParse(msg) => write!(f, "Geography parse error: {}", msg),
            OutlookError::Config(msg) => write!(f, "Config error: {}", msg),
            OutlookError::Export(msg) => write!(f, "Export error: {}", msg),
            OutlookError::Encode(msg) => write!(f, "JSON encoding error: {}", msg),
        }
    }
}

impl std::error::Error for OutlookError {}

impl OutlookError {
    /// Process exit code: 2 for bad user input, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            OutlookError::YearOutOfRange(_)
            | OutlookError::InvalidUserValue { .. }
            | OutlookError::UnknownTile(_)
            | OutlookError::UnknownChart(_) => 2,
            _ => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
