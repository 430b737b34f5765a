// MQLSleuth - core/discovery.rs
//
// Recursive source-file discovery for the picker.
//
// Architecture note: this module uses `walkdir` for directory traversal as an
// OS abstraction. It reads only directory entries, never file contents.
//
//   - Per-entry I/O errors are non-fatal and collected as warnings.
//   - Excluded directory names short-circuit descent via filter_entry.
//   - Entries are visited in file-name order, which is the same order the
//     tree renderer lists them in, so picker navigation follows the display.

use crate::util::error::DiscoveryError;
use std::path::Path;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// File extension (without the dot) that a file must carry.
    pub extension: String,

    /// Maximum directory recursion depth.
    pub max_depth: usize,

    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        use crate::util::constants;
        Self {
            extension: constants::DEFAULT_SOURCE_EXTENSION.to_string(),
            max_depth: constants::DEFAULT_MAX_DEPTH,
            exclude_dirs: vec![".git".to_string(), "node_modules".to_string()],
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Discover source files under `root`.
///
/// Returned paths are relative to `root`, use `/` separators and appear in
/// depth-first file-name order. Inaccessible entries are reported in the
/// warnings vector and do not fail the scan.
///
/// Returns `Err` only if the root is missing, not a directory, or the
/// extension cannot form a valid glob.
pub fn discover_sources(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<String>, Vec<String>), DiscoveryError> {
    use crate::util::constants;

    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    }

    let pattern_text = format!("*.{}", config.extension.trim_start_matches('.'));
    let pattern =
        glob::Pattern::new(&pattern_text).map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern_text.clone(),
            source,
        })?;

    let max_depth = config.max_depth.min(constants::ABSOLUTE_MAX_DEPTH);

    tracing::debug!(
        root = %root.display(),
        pattern = %pattern_text,
        max_depth,
        "Discovery starting"
    );

    let mut files: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let walker = walkdir::WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_str().unwrap_or("");
            !config.exclude_dirs.iter().any(|d| d == name)
        });

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            warnings.push(format!("Skipping '{}': non-UTF-8 filename", path.display()));
            continue;
        };

        if !pattern.matches(file_name) {
            tracing::trace!(file = file_name, "Not matched by extension");
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let Some(relative) = relative.to_str() else {
            warnings.push(format!("Skipping '{}': non-UTF-8 path", path.display()));
            continue;
        };
        files.push(crate::core::model::normalize_path(relative));
    }

    tracing::debug!(
        files = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

// =============================================================================
// Tests
// =============================================================================
