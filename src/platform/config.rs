// MQLSleuth - platform/config.rs
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

/// Resolved platform paths for MQLSleuth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/mqlsleuth/ or %APPDATA%\MQLSleuth\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
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

    /// Default location of `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[display]` section.
    pub display: DisplaySection,
    /// `[picker]` section.
    pub picker: PickerSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Excerpt width in characters.
    pub excerpt_width: Option<usize>,
}

/// `[picker]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PickerSection {
    /// Source file extension, without the dot.
    pub extension: Option<String>,
    /// Maximum directory recursion depth.
    pub max_depth: Option<usize>,
    /// Tree viewport height in rows; 0 derives it from the terminal.
    pub viewport_height: Option<usize>,
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
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Excerpt Windower width.
    pub excerpt_width: usize,
    /// Picker scan extension.
    pub extension: String,
    /// Picker scan depth.
    pub max_depth: usize,
    /// Fixed viewport height, `None` to follow the terminal.
    pub viewport_height: Option<usize>,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            excerpt_width: constants::DEFAULT_EXCERPT_WIDTH,
            extension: constants::DEFAULT_SOURCE_EXTENSION.to_string(),
            max_depth: constants::DEFAULT_MAX_DEPTH,
            viewport_height: None,
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Viewport height after applying a command-line value. `None` and 0
    /// both defer to the config, and `None` from both means "follow the
    /// terminal".
    pub fn viewport_height_with(&self, flag: Option<usize>) -> Option<usize> {
        flag.filter(|h| *h > 0).or(self.viewport_height)
    }
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning so the
/// tool still runs but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, value_warnings) = parse_config(&content, config_path);
    if value_warnings.is_empty() {
        tracing::debug!(path = %config_path.display(), "Loaded config.toml");
    }
    warnings.extend(value_warnings);
    (config, warnings)
}

/// Parse and validate config text read from `path`. Separated from
/// [`load_config`] so the validation rules can be tested without touching
/// the filesystem.
pub fn parse_config(content: &str, path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: path.to_path_buf(),
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Display: excerpt_width --
    if let Some(width) = raw.display.excerpt_width {
        if (constants::MIN_EXCERPT_WIDTH..=constants::MAX_EXCERPT_WIDTH).contains(&width) {
            config.excerpt_width = width;
        } else {
            warnings.push(out_of_range(
                "display.excerpt_width",
                width,
                format!(
                    "{}-{}",
                    constants::MIN_EXCERPT_WIDTH,
                    constants::MAX_EXCERPT_WIDTH
                ),
                constants::DEFAULT_EXCERPT_WIDTH,
            ));
        }
    }

    // -- Picker: extension --
    if let Some(ref ext) = raw.picker.extension {
        let ext = ext.trim().trim_start_matches('.');
        if !ext.is_empty() && !ext.contains(['/', '\\', '*', '?', '[']) {
            config.extension = ext.to_string();
        } else {
            warnings.push(format!(
                "[picker] extension = \"{ext}\" is not a plain file extension. Using default ({}).",
                constants::DEFAULT_SOURCE_EXTENSION,
            ));
        }
    }

    // -- Picker: max_depth --
    if let Some(depth) = raw.picker.max_depth {
        if (1..=constants::ABSOLUTE_MAX_DEPTH).contains(&depth) {
            config.max_depth = depth;
        } else {
            warnings.push(out_of_range(
                "picker.max_depth",
                depth,
                format!("1-{}", constants::ABSOLUTE_MAX_DEPTH),
                constants::DEFAULT_MAX_DEPTH,
            ));
        }
    }

    // -- Picker: viewport_height --
    match raw.picker.viewport_height {
        None | Some(0) => {}
        Some(h) if h <= constants::MAX_VIEWPORT_HEIGHT => config.viewport_height = Some(h),
        Some(h) => warnings.push(out_of_range(
            "picker.viewport_height",
            h,
            format!("0-{}", constants::MAX_VIEWPORT_HEIGHT),
            "terminal height",
        )),
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}

fn out_of_range(
    field: &str,
    value: impl std::fmt::Display,
    expected: String,
    fallback: impl std::fmt::Display,
) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    format!("{err}. Using default ({fallback}).")
}
