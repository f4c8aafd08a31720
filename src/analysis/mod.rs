/// Derived views over the forecast series.
///
/// Submodules:
/// - `summary` — max/min/average and first-to-last trend direction.
/// - `trends` — year-over-year change table with alert levels.
/// - `comparison` — user-entered forecasts and the model-vs-user table.

pub mod comparison;
pub mod summary;
pub mod trends;
