//! File exports: the forecast CSV, chart specs and the map view.

use crate::logging::{Component, TARGET_EXPORT, log_export_summary, log_failure};
use crate::model::{ForecastPoint, OutlookError, PRECIP_COLUMN};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const FORECAST_CSV_FILE: &str = "kerala_precipitation_forecast.csv";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const MAP_VIEW_FILE: &str = "map_view.json";

/// Renders the forecast table as CSV. Values are written unrounded.
pub fn forecast_csv(points: &[ForecastPoint]) -> String {
    let mut csv = format!("Year,{}\n", PRECIP_COLUMN);
    for point in points {
        csv.push_str(&format!("{},{}\n", point.year, point.precipitation_mm));
    }
    csv
}

/// Writes `bytes` to `dir/name`, creating `dir` if needed.
pub fn write_export(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, OutlookError> {
    fs::create_dir_all(dir)
        .map_err(|e| OutlookError::Export(format!("{}: {}", dir.display(), e)))?;
    let path = dir.join(name);
    fs::write(&path, bytes)
        .map_err(|e| OutlookError::Export(format!("{}: {}", path.display(), e)))?;
    log::debug!(target: TARGET_EXPORT, "Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Serializes `value` as pretty JSON into `dir/name`.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf, OutlookError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| OutlookError::Export(format!("{}: {}", name, e)))?;
    write_export(dir, name, text.as_bytes())
}

/// One pending export: a file name and its rendered contents.
pub struct ExportItem {
    pub name: String,
    pub contents: Result<Vec<u8>, OutlookError>,
}

impl ExportItem {
    pub fn bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), contents: Ok(bytes) }
    }

    pub fn json<T: Serialize>(name: impl Into<String>, value: &T) -> Self {
        let name = name.into();
        let contents = serde_json::to_vec_pretty(value)
            .map_err(|e| OutlookError::Export(format!("{}: {}", name, e)));
        Self { name, contents }
    }

    /// An item that could not be rendered in the first place.
    pub fn failed(name: impl Into<String>, err: OutlookError) -> Self {
        Self { name: name.into(), contents: Err(err) }
    }
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub generated_at: DateTime<Utc>,
    pub files: Vec<String>,
    pub failed: Vec<String>,
}

/// Outcome of a batch export.
#[derive(Debug)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, OutlookError)>,
}

/// Writes every item into `dir`, then a manifest listing what was written.
/// Individual failures are logged and collected rather than aborting the
/// batch.
pub fn export_all(dir: &Path, items: Vec<ExportItem>) -> ExportReport {
    let total = items.len();
    let mut report = ExportReport { written: Vec::new(), failed: Vec::new() };

    for item in items {
        let result = item
            .contents
            .and_then(|bytes| write_export(dir, &item.name, &bytes));
        match result {
            Ok(path) => report.written.push(path),
            Err(err) => {
                log_failure(Component::Export, &format!("export {}", item.name), &err);
                report.failed.push((item.name, err));
            }
        }
    }

    let manifest = ExportManifest {
        generated_at: Utc::now(),
        files: report
            .written
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect(),
        failed: report.failed.iter().map(|(name, _)| name.clone()).collect(),
    };
    if let Err(err) = write_json(dir, MANIFEST_FILE, &manifest) {
        log_failure(Component::Export, "write manifest", &err);
    }

    log_export_summary(total, report.written.len(), report.failed.len());
    report
}
