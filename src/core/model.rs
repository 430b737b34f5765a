// MQLSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::fmt;

// =============================================================================
// Build mode
// =============================================================================

/// Which MetaEditor run produced the log. The two runs write the same
/// diagnostic lines but different summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Full compile (`/compile:`), summary line starts with `Result:`.
    #[default]
    Compile,
    /// Syntax check only (`/s`), summary line is an information line.
    Syntax,
}

impl BuildMode {
    pub fn label(&self) -> &'static str {
        match self {
            BuildMode::Compile => "compile",
            BuildMode::Syntax => "syntax",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Diagnostic kind
// =============================================================================

/// Kind of a compiler diagnostic.
///
/// `Unknown` marks log lines the parser could not classify; such records are
/// kept in the batch for ordering fidelity but never presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Information,
    Warning,
    Error,
    #[default]
    Unknown,
}

impl DiagnosticKind {
    /// Map the kind word of a positional diagnostic (`error`, `warning`, ...).
    /// Matching is case-insensitive; unrecognised words map to `Unknown`.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "error" => DiagnosticKind::Error,
            "warning" => DiagnosticKind::Warning,
            "information" => DiagnosticKind::Information,
            _ => DiagnosticKind::Unknown,
        }
    }

    /// Lowercase label, as the compiler spells it.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::Information => "information",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Error => "error",
            DiagnosticKind::Unknown => "unknown",
        }
    }

    pub fn is_presentable(&self) -> bool {
        !matches!(self, DiagnosticKind::Unknown)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Diagnostic record and batch (output of parsing)
// =============================================================================

/// One diagnostic extracted from a compiler log.
///
/// `information` records carry only `source_file` and `message`; their
/// `line`, `column` and `code` stay zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DiagnosticRecord {
    /// Source path exactly as the compiler printed it.
    pub script_name: String,

    pub kind: DiagnosticKind,

    pub message: String,

    /// `script_name` with backslash separators turned into forward slashes.
    pub source_file: String,

    /// 1-based line number.
    pub line: usize,

    /// 0-based character offset reported by the compiler.
    pub column: usize,

    /// Compiler diagnostic code, 0 when absent.
    pub code: u32,
}

/// All diagnostics from one compiler invocation plus the summary totals.
///
/// Produced once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticBatch {
    /// Records in log order.
    pub records: Vec<DiagnosticRecord>,
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Compiler-reported elapsed time, `"0"` when the log did not say.
    pub elapsed_time: String,
}

impl Default for DiagnosticBatch {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total_errors: 0,
            total_warnings: 0,
            elapsed_time: crate::util::constants::DEFAULT_ELAPSED_TIME.to_string(),
        }
    }
}

impl DiagnosticBatch {
    /// Records that will reach presentation (everything but `Unknown`).
    pub fn presentable(&self) -> impl Iterator<Item = &DiagnosticRecord> {
        self.records.iter().filter(|r| r.kind.is_presentable())
    }

    /// Number of records of the given kind.
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }
}

// =============================================================================
// Excerpt window
// =============================================================================

/// A bounded-width slice of one source line with a caret position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcerptWindow {
    /// At most `width` characters of the source line.
    pub text: String,

    /// 1-based caret column within `text`; never less than 1.
    pub caret_offset: usize,

    /// Number of characters removed from the start of the original line.
    pub leading_trim: usize,
}

// =============================================================================
// Display record (output of presentation)
// =============================================================================

/// A diagnostic assembled for a renderer: header, excerpt, caret, severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    /// `Information`, `Warning` or `Error`; renderers pick a colour from it.
    pub severity: DiagnosticKind,

    /// Header text. For positional diagnostics this embeds script name,
    /// column, kind and code; for information records it is the headline
    /// word of the message.
    pub header: String,

    /// Normalised source path.
    pub script: String,

    pub message: String,

    /// 1-based source line, `None` for information records.
    pub line: Option<usize>,

    /// Windowed source excerpt, `None` for information records and for
    /// diagnostics whose source could not be loaded.
    pub excerpt: Option<ExcerptWindow>,

    /// Why the excerpt is missing, when it should have been present.
    pub source_error: Option<String>,
}

/// The outcome of presenting a batch: display records plus pass-through totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub records: Vec<DisplayRecord>,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub elapsed_time: String,
}

// =============================================================================
// Path normalisation
// =============================================================================

/// Convert backslash separators to forward slashes so that records written
/// with either convention address the same file.
pub fn normalize_path(raw: &str) -> String {
    raw.replace('\\', "/")
}
