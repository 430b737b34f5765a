// MQLSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "MQLSleuth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "MQLSleuth";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log grammar
// =============================================================================

/// Prefix of the summary line written by a full compile.
/// Example: `Result: 2 errors, 1 warnings, 340 msec elapsed`
pub const COMPILE_SUMMARY_PREFIX: &str = "Result:";

/// Prefix of the summary line written by a syntax-only check.
/// Example: ` : information: result 0 errors, 0 warnings, 18 msec elapsed`
pub const SYNTAX_SUMMARY_PREFIX: &str = " : information: result";

/// Substring that marks an information line.
pub const INFORMATION_MARKER: &str = "information:";

/// Separator between the source path and the message of an information line.
pub const INFORMATION_SEPARATOR: &str = ": information: ";

/// Elapsed time reported when the summary line has no third field.
pub const DEFAULT_ELAPSED_TIME: &str = "0";

// =============================================================================
// Excerpt windowing
// =============================================================================

/// Default excerpt width in characters. A legacy 80-column terminal
/// assumption: 80 minus the line-number gutter and the box border.
pub const DEFAULT_EXCERPT_WIDTH: usize = 69;

/// Minimum user-configurable excerpt width.
pub const MIN_EXCERPT_WIDTH: usize = 10;

/// Maximum user-configurable excerpt width.
pub const MAX_EXCERPT_WIDTH: usize = 1_000;

// =============================================================================
// File picker
// =============================================================================

/// Default source file extension offered by the picker.
pub const DEFAULT_SOURCE_EXTENSION: &str = "mq4";

/// Maximum directory recursion depth during the picker scan.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Hard upper bound on max depth (prevents runaway traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 50;

/// Rows the picker reserves above the tree for its help bar.
pub const PICKER_CHROME_ROWS: usize = 3;

/// Terminal height assumed when no terminal is attached.
pub const FALLBACK_TERMINAL_HEIGHT: usize = 24;

/// Maximum user-configurable viewport height.
pub const MAX_VIEWPORT_HEIGHT: usize = 10_000;

/// Preview shown for a selected file with no content.
pub const EMPTY_FILE_PREVIEW: &str = "#Empty file";

// =============================================================================
// Banners
// =============================================================================

pub const COMPILE_SUCCESS_BANNER: &str = "Compilation successful!";
pub const COMPILE_FAILURE_BANNER: &str = "Failed to compile";
pub const SYNTAX_SUCCESS_BANNER: &str = "Syntax check successful!";
pub const SYNTAX_FAILURE_BANNER: &str = "Syntax check failed";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at `warn` so diagnostics output stays clean.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
