/// Structured logging for the precipitation outlook
///
/// Provides context-rich logging with component tags, timestamps, and
/// severity levels. Supports both console output and file-based logging.
/// The logger is installed as the backend of the `log` facade, so the rest
/// of the crate logs with `log::info!(target: TARGET_..., ...)`.

use crate::model::OutlookError;
use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = OutlookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(OutlookError::Config(format!("unknown log level '{}'", other))),
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl LogLevel {
    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

pub const TARGET_TIERS: &str = "tiers";
pub const TARGET_GEOGRAPHY: &str = "geography";
pub const TARGET_CHARTS: &str = "charts";
pub const TARGET_EXPORT: &str = "export";
pub const TARGET_CONFIG: &str = "config";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Tiers,
    Geography,
    Charts,
    Export,
    Config,
    System,
}

impl Component {
    /// Maps a `log` record target to a component; unknown targets are
    /// reported as `System`.
    pub fn from_target(target: &str) -> Self {
        match target {
            TARGET_TIERS => Component::Tiers,
            TARGET_GEOGRAPHY => Component::Geography,
            TARGET_CHARTS => Component::Charts,
            TARGET_EXPORT => Component::Export,
            TARGET_CONFIG => Component::Config,
            _ => Component::System,
        }
    }

    pub fn target(self) -> &'static str {
        match self {
            Component::Tiers => TARGET_TIERS,
            Component::Geography => TARGET_GEOGRAPHY,
            Component::Charts => TARGET_CHARTS,
            Component::Export => TARGET_EXPORT,
            Component::Config => TARGET_CONFIG,
            Component::System => "system",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Tiers => write!(f, "TIER"),
            Component::Geography => write!(f, "GEO"),
            Component::Charts => write!(f, "CHART"),
            Component::Export => write!(f, "EXPORT"),
            Component::Config => write!(f, "CFG"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - bad user input such as an unknown year or tile
    Expected,
    /// Unexpected failure - unreadable files or failed writes
    Unexpected,
    /// Unknown - content problems that may or may not be the user's doing
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

pub fn classify_failure(err: &OutlookError) -> FailureType {
    match err {
        OutlookError::YearOutOfRange(_)
        | OutlookError::InvalidUserValue { .. }
        | OutlookError::UnknownTile(_)
        | OutlookError::UnknownChart(_) => FailureType::Expected,
        OutlookError::GeographyIo(_)
        | OutlookError::Export(_)
        | OutlookError::Config(_)
        | OutlookError::Encode(_) => FailureType::Unexpected,
        OutlookError::GeographyParse(_) => FailureType::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

/// `log` facade backend; forwards records to the global logger.
static FACADE: Facade = Facade;

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<PathBuf>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    pub fn new(min_level: LogLevel, log_file: Option<PathBuf>, console_timestamps: bool) -> Self {
        Self {
            min_level,
            log_file,
            console_timestamps,
        }
    }

    /// Formats the line written to the log file.
    pub fn format_entry(level: LogLevel, component: Component, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        format!("{} {} {}: {}", timestamp, level, component, message)
    }

    fn log(&self, level: LogLevel, component: Component, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, component, message);
        eprintln!("{}", self.console_line(level, component, message, &log_entry));

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path.display(), e);
            }
        }
    }

    /// Formats the line written to stderr.
    fn console_line(&self, level: LogLevel, component: Component, message: &str, entry: &str) -> String {
        if self.console_timestamps {
            match level {
                LogLevel::Error => entry.to_string(),
                LogLevel::Warning => format!("   {}", entry),
                LogLevel::Info => format!("   {}", message),
                LogLevel::Debug => format!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => format!("   ✗ {}: {}", component, message),
                LogLevel::Warning => format!("   ⚠ {}: {}", component, message),
                LogLevel::Info => format!("   {}", message),
                LogLevel::Debug => format!("   [DEBUG] {}: {}", component, message),
            }
        }
    }

    fn append_to_file(path: &Path, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

struct Facade;

impl log::Log for Facade {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let level = LogLevel::from(metadata.level());
        LOGGER
            .lock()
            .map(|guard| guard.as_ref().is_some_and(|l| level >= l.min_level))
            .unwrap_or(false)
    }

    fn log(&self, record: &log::Record) {
        if let Ok(guard) = LOGGER.lock() {
            if let Some(logger) = guard.as_ref() {
                logger.log(
                    LogLevel::from(record.level()),
                    Component::from_target(record.target()),
                    &record.args().to_string(),
                );
            }
        }
    }

    fn flush(&self) {}
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger and install it behind the `log` macros.
///
/// Safe to call more than once; later calls replace the settings.
pub fn init_logger(min_level: LogLevel, log_file: Option<&Path>, console_timestamps: bool) {
    let logger = Logger::new(min_level, log_file.map(Path::to_path_buf), console_timestamps);
    match LOGGER.lock() {
        Ok(mut guard) => *guard = Some(logger),
        Err(poisoned) => *poisoned.into_inner() = Some(logger),
    }
    // Fails only if already installed, which is fine.
    let _ = log::set_logger(&FACADE);
    log::set_max_level(min_level.to_filter());
}

/// Log an error with automatic failure classification
pub fn log_failure(component: Component, operation: &str, err: &OutlookError) {
    let failure_type = classify_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => log::debug!(target: component.target(), "{}", message),
        FailureType::Unexpected => log::error!(target: component.target(), "{}", message),
        FailureType::Unknown => log::warn!(target: component.target(), "{}", message),
    }
}

// ---------------------------------------------------------------------------
// Export Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of export operations
pub fn log_export_summary(total: usize, written: usize, failed: usize) {
    let message = format!("Export complete: {}/{} written, {} failed", written, total, failed);

    if failed == 0 {
        log::info!(target: TARGET_EXPORT, "{}", message);
    } else if written == 0 {
        log::error!(target: TARGET_EXPORT, "{}", message);
    } else {
        log::warn!(target: TARGET_EXPORT, "{}", message);
    }
}
