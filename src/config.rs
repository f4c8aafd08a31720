/// Dashboard configuration.
///
/// Settings are read from a TOML file. Every field has a default, so a
/// missing file or a partial file is fine; only unreadable or malformed
/// files are errors. Two environment variables (also picked up from a
/// `.env` file) override the file:
///
/// - `PRECIP_OUTLOOK_CONFIG` — path of the config file.
/// - `PRECIP_OUTLOOK_LOG` — minimum log level.

use crate::logging::LogLevel;
use crate::model::OutlookError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file used when neither the command line nor the environment
/// names one.
pub const DEFAULT_CONFIG_FILE: &str = "precip_outlook.toml";

pub const CONFIG_ENV_VAR: &str = "PRECIP_OUTLOOK_CONFIG";
pub const LOG_LEVEL_ENV_VAR: &str = "PRECIP_OUTLOOK_LOG";

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Region name used in titles.
    pub region: String,
    /// GeoJSON boundary drawn as the map overlay.
    pub geojson_path: PathBuf,
    /// Directory export files are written to.
    pub output_dir: PathBuf,
    pub map: MapConfig,
    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            region: "Kerala".to_string(),
            geojson_path: PathBuf::from("data/state.geojson"),
            output_dir: PathBuf::from("exports"),
            map: MapConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub marker_lat: f64,
    pub marker_lon: f64,
    pub default_tile: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 10.5,
            center_lon: 76.5,
            zoom: 7,
            marker_lat: 10.15,
            marker_lon: 76.6,
            default_tile: "CartoDB Positron".to_string(),
            width_px: 900,
            height_px: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of "debug", "info", "warn", "error".
    pub level: String,
    /// Append log lines to this file as well as the console.
    pub file: Option<PathBuf>,
    /// Prefix console lines with timestamps and component tags.
    pub console_timestamps: bool,
}

impl LoggingConfig {
    /// Parses `level`; an unknown name is a config error.
    pub fn min_level(&self) -> Result<LogLevel, OutlookError> {
        self.level.parse()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl DashboardConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, OutlookError> {
        toml::from_str(text).map_err(|e| OutlookError::Config(e.to_string()))
    }

    /// Reads a config file. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, OutlookError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| OutlookError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Applies `PRECIP_OUTLOOK_LOG` if set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var(LOG_LEVEL_ENV_VAR) {
            if !level.trim().is_empty() {
                self.logging.level = level.trim().to_string();
            }
        }
    }
}

/// Picks the config file: explicit path, then `PRECIP_OUTLOOK_CONFIG`,
/// then `precip_outlook.toml` in the working directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env::var(CONFIG_ENV_VAR)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Loads `.env`, resolves the config path and reads the config with
/// environment overrides applied. The log level is checked after the
/// overrides, so a bad value from either source is rejected.
pub fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig, OutlookError> {
    dotenv::dotenv().ok();
    let path = resolve_config_path(explicit);
    let mut config = DashboardConfig::load(&path)?;
    config.apply_env_overrides();
    config.logging.min_level()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Sets an environment variable for the duration of a test and
    /// removes it on drop. Tests using it must be `#[serial]`.
    struct EnvVarGuard(&'static str);

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            // Serial tests: no other thread reads the environment meanwhile.
            unsafe { env::set_var(key, value) };
            Self(key)
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            unsafe { env::remove_var(self.0) };
        }
    }

    fn write_config(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("precip_outlook.toml");
        fs::write(&path, text).expect("write config");
        path
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = DashboardConfig::from_toml_str("").expect("empty TOML is valid");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.map.zoom, 7);
        assert_eq!(config.map.center_lat, 10.5);
    }

    #[test]
    fn test_partial_map_section_keeps_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            region = "Kerala"

            [map]
            zoom = 9
            default_tile = "OpenStreetMap"
            "#,
        )
        .expect("valid config");
        assert_eq!(config.map.zoom, 9);
        assert_eq!(config.map.default_tile, "OpenStreetMap");
        assert_eq!(config.map.marker_lon, 76.6);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_logging_section() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [logging]
            level = "debug"
            file = "outlook.log"
            console_timestamps = true
            "#,
        )
        .expect("valid config");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("outlook.log")));
        assert!(config.logging.console_timestamps);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = DashboardConfig::from_toml_str("map = [").unwrap_err();
        assert!(matches!(err, OutlookError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let err = DashboardConfig::from_toml_str("[map]\nzoom = \"close\"").unwrap_err();
        assert!(matches!(err, OutlookError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = DashboardConfig::load(Path::new("/nonexistent/precip_outlook.toml"))
            .expect("missing file falls back to defaults");
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_config_path(Some(Path::new("custom.toml")));
        assert_eq!(path, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_min_level_parses_known_names() {
        let logging = LoggingConfig { level: "Warning".to_string(), ..LoggingConfig::default() };
        assert_eq!(logging.min_level(), Ok(LogLevel::Warning));
        assert_eq!(LoggingConfig::default().min_level(), Ok(LogLevel::Info));
    }

    #[test]
    #[serial]
    fn test_misspelled_level_in_file_is_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_config(dir.path(), "[logging]\nlevel = \"wraning\"\n");

        let err = load_config(Some(&path)).unwrap_err();
        assert_eq!(err, OutlookError::Config("unknown log level 'wraning'".to_string()));
    }

    #[test]
    #[serial]
    fn test_log_env_var_overrides_file_level() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_config(dir.path(), "[logging]\nlevel = \"error\"\n");
        let _log = EnvVarGuard::set(LOG_LEVEL_ENV_VAR, " debug ");

        let config = load_config(Some(&path)).expect("valid config");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.min_level(), Ok(LogLevel::Debug));
    }

    #[test]
    #[serial]
    fn test_blank_log_env_var_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_config(dir.path(), "[logging]\nlevel = \"warn\"\n");
        let _log = EnvVarGuard::set(LOG_LEVEL_ENV_VAR, "   ");

        let config = load_config(Some(&path)).expect("valid config");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    #[serial]
    fn test_bad_log_env_var_is_config_error() {
        let _log = EnvVarGuard::set(LOG_LEVEL_ENV_VAR, "loud");
        let err = load_config(Some(Path::new("/nonexistent/precip_outlook.toml"))).unwrap_err();
        assert!(matches!(err, OutlookError::Config(_)), "got {:?}", err);
    }

    #[test]
    #[serial]
    fn test_config_env_var_used_without_explicit_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_config(dir.path(), "region = \"Malabar\"\n");
        let _config = EnvVarGuard::set(CONFIG_ENV_VAR, &path.to_string_lossy());

        assert_eq!(resolve_config_path(None), path);
        assert_eq!(resolve_config_path(Some(Path::new("custom.toml"))), PathBuf::from("custom.toml"));
        let config = load_config(None).expect("config from env path");
        assert_eq!(config.region, "Malabar");
    }

    #[test]
    #[serial]
    fn test_blank_config_env_var_falls_back_to_default_file() {
        let _config = EnvVarGuard::set(CONFIG_ENV_VAR, "");
        assert_eq!(resolve_config_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
