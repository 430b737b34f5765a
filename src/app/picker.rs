// MQLSleuth - app/picker.rs
//
// File picker state machine: a fixed list of discovered sources, a cursor,
// and the viewport height the tree is shown in.
//
// The file tree is never stored. It is rebuilt from `(files, current_index)`
// whenever it is displayed, so `current_index` is the only place the
// selection lives.

use crate::core::model::BuildMode;
use crate::core::{tree, viewport};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::TreeError;
use std::path::{Path, PathBuf};

// =============================================================================
// Commands
// =============================================================================

/// Input accepted by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerCommand {
    Up,
    Down,
    /// Terminal resized to the given total height in rows.
    Resize(usize),
    Compile,
    Syntax,
    Quit,
}

impl PickerCommand {
    /// Map a key name to a command: arrows (or `k`/`j`) move, `enter`/`c`
    /// compiles, `s` checks syntax, `q`/`ctrl+c` quits.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "up" | "k" => Some(Self::Up),
            "down" | "j" => Some(Self::Down),
            "enter" | "c" => Some(Self::Compile),
            "s" => Some(Self::Syntax),
            "q" | "ctrl+c" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// How a picker session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerExit {
    /// Build the chosen file in the given mode.
    Build { mode: BuildMode, target: String },
    Quit,
}

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone)]
pub struct PickerState {
    /// Directory the file paths are relative to.
    root: PathBuf,
    files: Vec<String>,
    current_index: usize,
    viewport_height: usize,
}

impl PickerState {
    /// Start a picker over `files` with the first file selected.
    ///
    /// Fails with `NoFilesFound` when the scan came back empty.
    pub fn new(files: Vec<String>, viewport_height: usize) -> Result<Self, TreeError> {
        if files.is_empty() {
            return Err(TreeError::NoFilesFound {
                root: tree::DEFAULT_ROOT_NAME.to_string(),
            });
        }
        Ok(Self {
            root: PathBuf::from(tree::DEFAULT_ROOT_NAME),
            files,
            current_index: 0,
            viewport_height,
        })
    }

    /// Resolve preview reads against `root` instead of the working directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_file(&self) -> &str {
        &self.files[self.current_index]
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Move the cursor to `index`, clamped to the last file.
    pub fn select(&mut self, index: usize) {
        self.current_index = index.min(self.files.len() - 1);
    }

    /// Apply one command. Returns `Some` when the session is over.
    pub fn apply(&mut self, command: PickerCommand) -> Option<PickerExit> {
        match command {
            PickerCommand::Up => {
                self.current_index = self.current_index.saturating_sub(1);
            }
            PickerCommand::Down => {
                if self.current_index + 1 < self.files.len() {
                    self.current_index += 1;
                }
            }
            PickerCommand::Resize(terminal_height) => {
                self.viewport_height =
                    terminal_height.saturating_sub(constants::PICKER_CHROME_ROWS);
                tracing::debug!(
                    terminal_height,
                    viewport_height = self.viewport_height,
                    "Picker resized"
                );
            }
            PickerCommand::Compile => return Some(self.finish(BuildMode::Compile)),
            PickerCommand::Syntax => return Some(self.finish(BuildMode::Syntax)),
            PickerCommand::Quit => return Some(PickerExit::Quit),
        }
        None
    }

    fn finish(&self, mode: BuildMode) -> PickerExit {
        let target = self.current_file().to_string();
        tracing::info!(%mode, target = %target, "File picked");
        PickerExit::Build { mode, target }
    }

    /// The full tree with the current file selected.
    pub fn tree(&self, root_name: &str) -> Result<tree::RenderedTree, TreeError> {
        let node = tree::build_named(root_name, &self.files, self.current_index)?;
        Ok(tree::render(&node))
    }

    /// The part of the tree that fits the viewport, always including the
    /// current file.
    pub fn visible_tree(&self, root_name: &str) -> Result<Vec<String>, TreeError> {
        let rendered = self.tree(root_name)?;
        let depth = rendered.selected_line.unwrap_or(1);
        Ok(viewport::slice(&rendered.lines, depth, self.viewport_height).to_vec())
    }

    /// Up to `max_lines` lines from the head of the current file.
    ///
    /// An empty file previews as a single placeholder line; an unreadable
    /// one as its error message.
    pub fn preview(&self, max_lines: usize) -> Vec<String> {
        let path = self.current_path();
        match fs::read_first_lines(&path, max_lines) {
            Ok(lines) if lines.is_empty() => vec![constants::EMPTY_FILE_PREVIEW.to_string()],
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Preview unavailable");
                vec![format!("Cannot read '{}': {e}", path.display())]
            }
        }
    }

    /// Path of the current file on disk.
    pub fn current_path(&self) -> PathBuf {
        self.root.join(Path::new(self.current_file()))
    }
}
