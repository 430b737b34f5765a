// MQLSleuth - app/source_cache.rs
//
// Per-run memoisation of source file contents, keyed by normalised path.
//
// The cache is owned by one presentation run and dropped with it; nothing
// is shared between runs. Failed loads are not cached, so a file that
// appears between two lookups is picked up on the second one.

use crate::core::model::normalize_path;
use crate::platform::fs;
use crate::util::error::SourceError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Lazily loaded source lines for every file a batch references.
#[derive(Debug, Default)]
pub struct SourceCache {
    /// Directory that relative script paths are resolved against.
    /// `None` resolves them against the process working directory.
    base_dir: Option<PathBuf>,

    /// Normalised path -> lines, line N at index N-1.
    files: HashMap<String, Vec<String>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that resolves relative script paths against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            files: HashMap::new(),
        }
    }

    /// Number of files loaded so far.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Pre-load content for `path` without touching the filesystem.
    pub fn insert(&mut self, path: &str, content: &str) {
        self.files
            .insert(normalize_path(path), fs::split_source_lines(content));
    }

    /// All lines of `path`, reading the file on first access.
    ///
    /// Backslash and forward-slash spellings of the same path share one entry.
    pub fn get_lines(&mut self, path: &str) -> Result<&[String], SourceError> {
        let key = normalize_path(path);

        if !self.files.contains_key(&key) {
            let resolved = self.resolve(&key);
            let lines =
                fs::read_source_lines(&resolved).map_err(|source| SourceError::Unavailable {
                    path: resolved.clone(),
                    source,
                })?;
            tracing::debug!(
                file = %resolved.display(),
                lines = lines.len(),
                "Source file loaded"
            );
            self.files.insert(key.clone(), lines);
        }

        Ok(self.files.get(&key).map(Vec::as_slice).unwrap_or_default())
    }

    /// The text of 1-based line `line` in `path`.
    pub fn line(&mut self, path: &str, line: usize) -> Result<&str, SourceError> {
        let resolved = self.resolve(&normalize_path(path));
        let lines = self.get_lines(path)?;
        match line.checked_sub(1).and_then(|idx| lines.get(idx)) {
            Some(text) => Ok(text.as_str()),
            None => Err(SourceError::LineOutOfRange {
                path: resolved,
                line,
                line_count: lines.len(),
            }),
        }
    }

    fn resolve(&self, normalized: &str) -> PathBuf {
        let path = Path::new(normalized);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
