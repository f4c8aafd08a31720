//! Precipitation tier classification.
//!
//! A yearly precipitation value is placed in one of seven tiers by scanning
//! a single descending ladder of breakpoints. Each tier carries the fill
//! color used on the map and the alert level shown as text, so the two can
//! never describe different tiers for the same input.
//!
//! Comparisons are strictly greater-than: a value exactly on a breakpoint
//! falls into the tier below it.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Alert levels
// ---------------------------------------------------------------------------

/// Rainfall alert levels, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AlertLevel {
    Normal,
    Light,
    Medium,
    Heavy,
    #[serde(rename = "Very Heavy")]
    VeryHeavy,
}

impl AlertLevel {
    /// Plain label, e.g. "Very Heavy".
    pub fn label(self) -> &'static str {
        match self {
            AlertLevel::Normal => "Normal",
            AlertLevel::Light => "Light",
            AlertLevel::Medium => "Medium",
            AlertLevel::Heavy => "Heavy",
            AlertLevel::VeryHeavy => "Very Heavy",
        }
    }

    /// Label decorated with its status glyph, as shown in alert banners.
    pub fn badge(self) -> &'static str {
        match self {
            AlertLevel::Normal => "🟢 Normal",
            AlertLevel::Light => "🟡 Light",
            AlertLevel::Medium => "🟠 Medium",
            AlertLevel::Heavy => "🔴 Heavy",
            AlertLevel::VeryHeavy => "🚨 Very Heavy",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Threshold ladder
// ---------------------------------------------------------------------------

/// One row of the tier ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBand {
    /// Values strictly above this breakpoint (mm) land in this band.
    /// `None` marks the catch-all lowest band.
    pub above_mm: Option<f64>,
    /// Map fill color as a hex string.
    pub color: &'static str,
    pub alert: AlertLevel,
}

/// Number of tiers in the ladder.
pub const TIER_COUNT: usize = 7;

/// The tier ladder, highest tier first.
///
/// Breakpoints are calibration constants carried over unchanged; they have
/// no derivation to recompute them from.
pub static TIER_LADDER: [TierBand; TIER_COUNT] = [
    TierBand { above_mm: Some(55_000.0), color: "#08306b", alert: AlertLevel::VeryHeavy },
    TierBand { above_mm: Some(54_500.0), color: "#08519c", alert: AlertLevel::Heavy },
    TierBand { above_mm: Some(54_000.0), color: "#2171b5", alert: AlertLevel::Medium },
    TierBand { above_mm: Some(53_500.0), color: "#4292c6", alert: AlertLevel::Medium },
    TierBand { above_mm: Some(53_000.0), color: "#6baed6", alert: AlertLevel::Light },
    TierBand { above_mm: Some(52_000.0), color: "#9ecae1", alert: AlertLevel::Light },
    TierBand { above_mm: None, color: "#c6dbef", alert: AlertLevel::Normal },
];

/// The six breakpoints of `TIER_LADDER`, highest first.
pub fn breakpoints() -> Vec<f64> {
    TIER_LADDER.iter().filter_map(|band| band.above_mm).collect()
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Color and alert level for one precipitation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Tier rank: 0 is the lowest tier, `TIER_COUNT - 1` the highest.
    pub tier: u8,
    pub color: &'static str,
    pub alert: AlertLevel,
}

/// Classifies a precipitation value (mm) into its tier.
///
/// Total over all inputs: negative values and NaN exceed no breakpoint and
/// land in the lowest tier.
pub fn classify(value_mm: f64) -> Classification {
    let index = TIER_LADDER
        .iter()
        .position(|band| match band.above_mm {
            Some(breakpoint) => value_mm > breakpoint,
            None => true,
        })
        .unwrap_or(TIER_COUNT - 1);

    let band = &TIER_LADDER[index];
    Classification {
        tier: (TIER_COUNT - 1 - index) as u8,
        color: band.color,
        alert: band.alert,
    }
}

/// Map fill color for a precipitation value.
pub fn classify_color(value_mm: f64) -> &'static str {
    classify(value_mm).color
}

/// Alert level for a precipitation value.
pub fn classify_alert(value_mm: f64) -> AlertLevel {
    classify(value_mm).alert
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
