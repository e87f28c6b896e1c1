// LsViz - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LsViz configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/lsviz/ or %APPDATA%\LsViz\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so a newer config file still loads in an
/// older binary.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[loading]` section.
    pub loading: LoadingSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[loading]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoadingSection {
    /// Maximum entries read from one listing file.
    pub max_entries: Option<usize>,
    /// Size above which listings are memory-mapped.
    pub large_file_threshold_bytes: Option<u64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
    /// Initial width of the Name column in points.
    pub name_column_width: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Loading --
    pub max_entries: usize,
    pub large_file_threshold: u64,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    pub font_size: f32,
    pub name_column_width: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_entries: constants::DEFAULT_MAX_ENTRIES,
            large_file_threshold: constants::DEFAULT_LARGE_FILE_THRESHOLD,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            name_column_width: constants::DEFAULT_NAME_COLUMN_WIDTH,
            log_level: None,
        }
    }
}

/// Read and deserialise config.toml. A missing file is `Ok(None)`.
pub fn read_raw_config(path: &Path) -> Result<Option<RawConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Validate a raw config against the named limits.
///
/// Every out-of-range value becomes a warning and keeps its default.
pub fn validate(raw: &RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut config = AppConfig::default();
    let mut problems = Vec::new();

    if let Some(max) = raw.loading.max_entries {
        if (constants::MIN_MAX_ENTRIES..=constants::ABSOLUTE_MAX_ENTRIES).contains(&max) {
            config.max_entries = max;
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "[loading] max_entries".to_string(),
                value: max.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_MAX_ENTRIES,
                    constants::ABSOLUTE_MAX_ENTRIES,
                    constants::DEFAULT_MAX_ENTRIES
                ),
            });
        }
    }

    if let Some(threshold) = raw.loading.large_file_threshold_bytes {
        if threshold > 0 {
            config.large_file_threshold = threshold;
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "[loading] large_file_threshold_bytes".to_string(),
                value: threshold.to_string(),
                expected: format!(
                    "a positive byte count (using default {})",
                    constants::DEFAULT_LARGE_FILE_THRESHOLD
                ),
            });
        }
    }

    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => problems.push(ConfigError::ValueOutOfRange {
                field: "[ui] theme".to_string(),
                value: other.to_string(),
                expected: "\"dark\" or \"light\" (using dark)".to_string(),
            }),
        }
    }

    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "[ui] font_size".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_FONT_SIZE,
                    constants::MAX_FONT_SIZE,
                    constants::DEFAULT_FONT_SIZE
                ),
            });
        }
    }

    if let Some(width) = raw.ui.name_column_width {
        if (constants::MIN_NAME_COLUMN_WIDTH..=constants::MAX_NAME_COLUMN_WIDTH).contains(&width) {
            config.name_column_width = width;
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "[ui] name_column_width".to_string(),
                value: width.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_NAME_COLUMN_WIDTH,
                    constants::MAX_NAME_COLUMN_WIDTH,
                    constants::DEFAULT_NAME_COLUMN_WIDTH
                ),
            });
        }
    }

    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: "error, warn, info, debug, or trace (using info)".to_string(),
            });
        }
    }

    (config, problems)
}

/// Load and validate config.toml from `config_dir`.
///
/// Returns the validated config and a list of human-readable warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults plus a warning; the application still
/// starts.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let raw = match read_raw_config(&config_path) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
            return (AppConfig::default(), Vec::new());
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, problems) = validate(&raw);
    let warnings: Vec<String> = problems.iter().map(ToString::to_string).collect();
    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }
    (config, warnings)
}
