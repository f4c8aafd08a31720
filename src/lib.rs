//! Long-term precipitation outlook.
//!
//! Classifies yearly precipitation forecasts into seven color/alert tiers and
//! builds the dashboard views around them: map overlay, charts, trend and
//! comparison tables, and file exports.

pub mod alert;
pub mod analysis;
pub mod charts;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod geography;
pub mod logging;
pub mod model;
pub mod tiles;

pub use alert::tiers::{AlertLevel, Classification, classify, classify_alert, classify_color};
pub use cli::run_from_env;
pub use model::{ForecastPoint, OutlookError};
