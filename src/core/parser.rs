// MQLSleuth - core/parser.rs
//
// Line-oriented parsing of MetaEditor compiler logs.
// Core layer: accepts already-decoded text, never touches the filesystem.
//
// Two grammars share one diagnostic line format and differ only in how the
// summary line is written:
//
//   compile:  Result: 2 errors, 1 warnings, 340 msec elapsed
//   syntax:    : information: result 0 errors, 0 warnings, 18 msec elapsed
//
// Diagnostic lines:
//
//   Foo.mq4(10,5) : error 123: type mismatch
//   C:\MQL4\Experts\Foo.mq4 : information: compiling 'Foo.mq4'
//
// Anything else is kept as an `Unknown` record. Log format drift between
// MetaEditor builds is expected, so an unexpected line must never abort
// parsing.

use crate::core::model::{
    normalize_path, BuildMode, DiagnosticBatch, DiagnosticKind, DiagnosticRecord,
};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

// =============================================================================
// Line classification
// =============================================================================

/// Summary totals read from a summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub errors: usize,
    pub warnings: usize,
    pub elapsed_time: String,
}

/// The classification of one non-blank log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// The run summary (error/warning totals, elapsed time).
    Summary(SummaryLine),

    /// `<path> : information: <message>`
    Information { source_file: String, message: String },

    /// `<path>(<line>,<char>) : <kind> <code>: <message>`
    Positional(DiagnosticRecord),

    /// A line matching neither grammar.
    Unrecognized,
}

/// Regex for the positional diagnostic grammar.
fn positional_pattern() -> &'static Regex {
    static POSITIONAL: OnceLock<Regex> = OnceLock::new();
    POSITIONAL.get_or_init(|| {
        // Tested in the unit tests below, so a typo shows up as a failing
        // test rather than a runtime panic.
        Regex::new(r"^(.*)\((\d+),(\d+)\) : (\w+) (\d+): (.*)$")
            .expect("positional_pattern: invalid regex")
    })
}

/// Classify a single non-blank log line.
pub fn classify_line(line: &str, mode: BuildMode) -> LogLine {
    let summary_prefix = match mode {
        BuildMode::Compile => constants::COMPILE_SUMMARY_PREFIX,
        BuildMode::Syntax => constants::SYNTAX_SUMMARY_PREFIX,
    };
    if line.starts_with(summary_prefix) {
        return LogLine::Summary(parse_summary(line));
    }

    if line.contains(constants::INFORMATION_MARKER) {
        // "information:" without the surrounding separator may still be a
        // positional diagnostic quoting the word in its message.
        if let Some((path, message)) = line.split_once(constants::INFORMATION_SEPARATOR) {
            return LogLine::Information {
                source_file: path.trim().to_string(),
                message: message.trim().to_string(),
            };
        }
    }

    match positional_pattern().captures(line) {
        Some(caps) => {
            let script_name = caps[1].to_string();
            // The digit groups cannot fail to parse except on overflow, which
            // only a corrupt log could produce.
            let (Ok(line_no), Ok(column), Ok(code)) = (
                caps[2].parse::<usize>(),
                caps[3].parse::<usize>(),
                caps[5].parse::<u32>(),
            ) else {
                return LogLine::Unrecognized;
            };
            LogLine::Positional(DiagnosticRecord {
                source_file: normalize_path(&script_name),
                script_name,
                kind: DiagnosticKind::from_token(&caps[4]),
                message: caps[6].to_string(),
                line: line_no,
                column,
                code,
            })
        }
        None => LogLine::Unrecognized,
    }
}

/// Parse a summary line into its three comma-separated fields.
///
/// Each count is the first integer found in its field (missing or
/// unparseable counts read as 0). The elapsed time is the first word of the
/// third field, or `"0"` when there is no third field.
fn parse_summary(line: &str) -> SummaryLine {
    let fields: Vec<&str> = line.split(',').collect();

    let first_number = |field: Option<&&str>| -> usize {
        field
            .and_then(|f| {
                f.split(|c: char| !c.is_ascii_digit())
                    .find(|tok| !tok.is_empty())
            })
            .and_then(|tok| tok.parse().ok())
            .unwrap_or(0)
    };

    let elapsed_time = fields
        .get(2)
        .and_then(|f| f.split_whitespace().next())
        .unwrap_or(constants::DEFAULT_ELAPSED_TIME)
        .to_string();

    SummaryLine {
        errors: first_number(fields.first()),
        warnings: first_number(fields.get(1)),
        elapsed_time,
    }
}

// =============================================================================
// Batch parsing
// =============================================================================

/// Parse a whole decoded compiler log into a diagnostic batch.
///
/// Blank lines are skipped, summary lines update the totals, every other
/// line becomes a record in log order. This never fails: an empty log gives
/// an empty batch with zero totals.
pub fn parse(raw_text: &str, mode: BuildMode) -> DiagnosticBatch {
    let mut batch = DiagnosticBatch::default();
    let mut unrecognized = 0usize;

    for (line_idx, line) in raw_text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match classify_line(line, mode) {
            LogLine::Summary(summary) => {
                batch.total_errors = summary.errors;
                batch.total_warnings = summary.warnings;
                batch.elapsed_time = summary.elapsed_time;
            }
            LogLine::Information {
                source_file,
                message,
            } => batch.records.push(DiagnosticRecord {
                source_file: normalize_path(&source_file),
                script_name: source_file,
                kind: DiagnosticKind::Information,
                message,
                ..DiagnosticRecord::default()
            }),
            LogLine::Positional(record) => batch.records.push(record),
            LogLine::Unrecognized => {
                unrecognized += 1;
                let preview: String = line
                    .chars()
                    .take(constants::DEBUG_MAX_LINE_PREVIEW)
                    .collect();
                tracing::debug!(
                    line_number = line_idx + 1,
                    line = %preview,
                    "Unrecognised log line"
                );
                batch.records.push(DiagnosticRecord {
                    kind: DiagnosticKind::Unknown,
                    message: line.to_string(),
                    ..DiagnosticRecord::default()
                });
            }
        }
    }

    tracing::debug!(
        %mode,
        records = batch.records.len(),
        unrecognized,
        total_errors = batch.total_errors,
        total_warnings = batch.total_warnings,
        "Log parsed"
    );

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPILE_LOG: &str = "\
C:\\MQL4\\Experts\\Foo.mq4 : information: compiling 'Foo.mq4'
Foo.mq4(10,5) : error 123: type mismatch
Foo.mq4(12,20) : error 256: undeclared identifier
Foo.mq4(191,20) : warning 43: possible loss of data due to type conversion

Result: 2 errors, 1 warnings, 340 msec elapsed
";

    #[test]
    fn test_compile_summary_and_single_error() {
        let log = "Result: 2 errors, 1 warnings, 340 msec elapsed\n\
                   Foo.mq4(10,5) : error 123: type mismatch\n";
        let batch = parse(log, BuildMode::Compile);

        assert_eq!(batch.total_errors, 2);
        assert_eq!(batch.total_warnings, 1);
        assert_eq!(batch.elapsed_time, "340");
        assert_eq!(batch.records.len(), 1);

        let rec = &batch.records[0];
        assert_eq!(rec.kind, DiagnosticKind::Error);
        assert_eq!(rec.source_file, "Foo.mq4");
        assert_eq!(rec.line, 10);
        assert_eq!(rec.column, 5);
        assert_eq!(rec.code, 123);
        assert_eq!(rec.message, "type mismatch");
    }

    #[test]
    fn test_consistent_log_totals_match_record_counts() {
        let batch = parse(COMPILE_LOG, BuildMode::Compile);
        assert_eq!(batch.total_errors, batch.count_of(DiagnosticKind::Error));
        assert_eq!(
            batch.total_warnings,
            batch.count_of(DiagnosticKind::Warning)
        );
    }

    #[test]
    fn test_records_preserve_log_order() {
        let batch = parse(COMPILE_LOG, BuildMode::Compile);
        let kinds: Vec<_> = batch.records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::Information,
                DiagnosticKind::Error,
                DiagnosticKind::Error,
                DiagnosticKind::Warning,
            ]
        );
        assert_eq!(batch.records[2].line, 12);
    }

    #[test]
    fn test_information_line_normalises_path() {
        let batch = parse(COMPILE_LOG, BuildMode::Compile);
        let info = &batch.records[0];
        assert_eq!(info.kind, DiagnosticKind::Information);
        assert_eq!(info.source_file, "C:/MQL4/Experts/Foo.mq4");
        assert_eq!(info.script_name, r"C:\MQL4\Experts\Foo.mq4");
        assert_eq!(info.message, "compiling 'Foo.mq4'");
        assert_eq!((info.line, info.column, info.code), (0, 0, 0));
    }

    #[test]
    fn test_syntax_mode_summary() {
        let log = "Foo.mq4 : information: checking 'Foo.mq4'\n \
                   : information: result 0 errors, 3 warnings, 18 msec elapsed\n";
        let batch = parse(log, BuildMode::Syntax);
        assert_eq!(batch.total_errors, 0);
        assert_eq!(batch.total_warnings, 3);
        assert_eq!(batch.elapsed_time, "18");
        assert_eq!(batch.records.len(), 1, "summary must not become a record");
    }

    #[test]
    fn test_syntax_summary_in_compile_mode_is_information() {
        let log = " : information: result 1 errors, 0 warnings, 18 msec elapsed\n";
        let batch = parse(log, BuildMode::Compile);
        assert_eq!(batch.total_errors, 0);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].kind, DiagnosticKind::Information);
    }

    #[test]
    fn test_compile_summary_in_syntax_mode_is_not_summary() {
        let log = "Result: 4 errors, 0 warnings, 5 msec elapsed\n";
        let batch = parse(log, BuildMode::Syntax);
        assert_eq!(batch.total_errors, 0);
        assert_eq!(batch.records[0].kind, DiagnosticKind::Unknown);
    }

    #[test]
    fn test_summary_without_elapsed_defaults_to_zero() {
        let batch = parse("Result: 3 errors, 2 warnings\n", BuildMode::Compile);
        assert_eq!(batch.total_errors, 3);
        assert_eq!(batch.total_warnings, 2);
        assert_eq!(batch.elapsed_time, "0");
    }

    #[test]
    fn test_summary_with_single_field() {
        let batch = parse("Result: 7 errors\n", BuildMode::Compile);
        assert_eq!(batch.total_errors, 7);
        assert_eq!(batch.total_warnings, 0);
        assert_eq!(batch.elapsed_time, "0");
    }

    #[test]
    fn test_empty_log_yields_empty_batch() {
        for log in ["", "\n\n", "   \n\t\n"] {
            let batch = parse(log, BuildMode::Compile);
            assert!(batch.records.is_empty());
            assert_eq!(batch.total_errors, 0);
            assert_eq!(batch.total_warnings, 0);
            assert_eq!(batch.elapsed_time, "0");
        }
    }

    #[test]
    fn test_garbled_lines_become_unknown_records() {
        let log = "garbage line\nFoo.mq4(x,5) : error 1: bad\n\u{fffd}\u{fffd}\n";
        let batch = parse(log, BuildMode::Compile);
        assert_eq!(batch.records.len(), 3);
        assert!(batch.records.iter().all(|r| r.kind == DiagnosticKind::Unknown));
        assert_eq!(batch.presentable().count(), 0);
        assert_eq!(batch.total_errors, 0);
    }

    #[test]
    fn test_information_marker_without_separator_is_unrecognized() {
        assert_eq!(
            classify_line("odd information:line", BuildMode::Compile),
            LogLine::Unrecognized
        );
    }

    #[test]
    fn test_positional_message_quoting_information_marker() {
        let log = "Foo.mq4(3,1) : error 149: 'information:' - unexpected token\n\
                   Result: 1 errors, 0 warnings, 5 msec elapsed\n";
        let batch = parse(log, BuildMode::Compile);
        assert_eq!(batch.records.len(), 1);
        let rec = &batch.records[0];
        assert_eq!(rec.kind, DiagnosticKind::Error);
        assert_eq!(rec.code, 149);
        assert_eq!(rec.message, "'information:' - unexpected token");
        assert_eq!(batch.presentable().count(), batch.total_errors);
    }

    #[test]
    fn test_positional_path_with_parentheses() {
        let line = r"C:\Program Files (x86)\MT4\MQL4\Foo.mq4(3,1) : warning 31: unused";
        match classify_line(line, BuildMode::Compile) {
            LogLine::Positional(rec) => {
                assert_eq!(rec.script_name, r"C:\Program Files (x86)\MT4\MQL4\Foo.mq4");
                assert_eq!(rec.source_file, "C:/Program Files (x86)/MT4/MQL4/Foo.mq4");
                assert_eq!(rec.line, 3);
                assert_eq!(rec.column, 1);
                assert_eq!(rec.kind, DiagnosticKind::Warning);
            }
            other => panic!("expected positional, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_word_maps_to_unknown() {
        match classify_line("Foo.mq4(1,1) : remark 9: hmm", BuildMode::Compile) {
            LogLine::Positional(rec) => assert_eq!(rec.kind, DiagnosticKind::Unknown),
            other => panic!("expected positional, got {other:?}"),
        }
    }

    #[test]
    fn test_crlf_log_lines() {
        let log = "Foo.mq4(10,5) : error 123: type mismatch\r\n\
                   Result: 1 errors, 0 warnings, 9 msec elapsed\r\n";
        let batch = parse(log, BuildMode::Compile);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].message, "type mismatch");
        assert_eq!(batch.elapsed_time, "9");
    }
}
