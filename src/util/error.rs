// MQLSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Malformed compiler log lines are deliberately absent: the parser recovers
// from them locally and never produces an error value.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all MQLSleuth operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum MqlSleuthError {
    /// A referenced source file or line could not be loaded.
    Source(SourceError),

    /// The file tree could not be built.
    Tree(TreeError),

    /// File discovery failed.
    Discovery(DiscoveryError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// A report could not be serialised to JSON.
    Json(serde_json::Error),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for MqlSleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "Source error: {e}"),
            Self::Tree(e) => write!(f, "File tree error: {e}"),
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Json(e) => write!(f, "JSON output error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for MqlSleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Tree(e) => Some(e),
            Self::Discovery(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for MqlSleuthError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

/// Errors raised while correlating a diagnostic with its source text.
///
/// Both variants are per-diagnostic: the presenter degrades the affected
/// record to a header-only display and carries on with the batch.
#[derive(Debug)]
pub enum SourceError {
    /// The source file could not be read.
    Unavailable { path: PathBuf, source: io::Error },

    /// The diagnostic points past the last line of the file.
    LineOutOfRange {
        path: PathBuf,
        line: usize,
        line_count: usize,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { path, source } => {
                write!(f, "Cannot read source '{}': {source}", path.display())
            }
            Self::LineOutOfRange {
                path,
                line,
                line_count,
            } => write!(
                f,
                "'{}' has {line_count} lines, diagnostic references line {line}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } => Some(source),
            Self::LineOutOfRange { .. } => None,
        }
    }
}

impl From<SourceError> for MqlSleuthError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

// ---------------------------------------------------------------------------
// Tree errors
// ---------------------------------------------------------------------------

/// Errors related to building the picker's file tree.
#[derive(Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The scan produced no candidate files.
    NoFilesFound { root: String },

    /// The selection index does not address any file.
    SelectionOutOfRange { index: usize, len: usize },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFilesFound { root } => write!(f, "No files found under '{root}'"),
            Self::SelectionOutOfRange { index, len } => {
                write!(f, "Selection {index} is out of range for {len} files")
            }
        }
    }
}

impl std::error::Error for TreeError {}

impl From<TreeError> for MqlSleuthError {
    fn from(e: TreeError) -> Self {
        Self::Tree(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to file discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The root scan path does not exist or is not accessible.
    RootNotFound { path: PathBuf },

    /// The root path is not a directory.
    NotADirectory { path: PathBuf },

    /// The extension filter could not be turned into a glob pattern.
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Scan path '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Scan path '{}' is not a directory", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid file pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for MqlSleuthError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MqlSleuthError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for MQLSleuth results.
pub type Result<T> = std::result::Result<T, MqlSleuthError>;
