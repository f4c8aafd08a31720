/// Precipitation tier classification and alert banners.
///
/// Submodules:
/// - `tiers` — the threshold ladder and the color/alert classifier.
/// - `banner` — alert headlines and the very-high-rainfall warning.

pub mod banner;
pub mod tiers;

pub use tiers::{AlertLevel, Classification, classify, classify_alert, classify_color};
