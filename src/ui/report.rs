// MQLSleuth - ui/report.rs
//
// Plain-text rendering of presented diagnostics, the run summary, and the
// picker tree. Pure string building: callers decide where the text goes.
//
// A positional diagnostic renders as:
//
//   [error]  Script: Foo.mq4 | Char: 9 | Type: error | Code: 256
//      12 │ int x = y;
//         │         │
//         │         ╰─➤ 'y' - undeclared identifier

use crate::app::outcome::BuildOutcome;
use crate::core::model::{DisplayRecord, Presentation};
use serde::Serialize;
use std::fmt::Write;

/// Width of the `{line:>5} │ ` gutter in characters.
const GUTTER_WIDTH: usize = 8;

/// Render one display record, trailing newline included.
pub fn render_record(record: &DisplayRecord) -> String {
    let mut out = String::new();

    let Some(line) = record.line else {
        // Information record: one log-style line.
        let _ = writeln!(out, "INFO {} Script={}", record.header, record.script);
        return out;
    };

    let _ = writeln!(out, "[{}]{}", record.severity, record.header.trim_end());

    match &record.excerpt {
        Some(excerpt) => {
            let pad = " ".repeat(excerpt.caret_offset.saturating_sub(1));
            let blank_gutter = format!("{:>w$}│ ", "", w = GUTTER_WIDTH - 2);
            let _ = writeln!(out, "{line:>5} │ {}", excerpt.text);
            let _ = writeln!(out, "{blank_gutter}{pad}│");
            let _ = writeln!(out, "{blank_gutter}{pad}╰─➤ {}", record.message);
        }
        None => {
            let _ = writeln!(out, "{line:>5} │ {}", record.message);
            if let Some(reason) = &record.source_error {
                let _ = writeln!(out, "{:>w$}│ ({reason})", "", w = GUTTER_WIDTH - 2);
            }
        }
    }
    out
}

/// Totals after the records: warnings and errors only when non-zero, the
/// elapsed time always.
pub fn render_summary(presentation: &Presentation) -> String {
    let mut out = String::new();
    if presentation.total_warnings > 0 {
        let _ = writeln!(out, "WARN Warnings Total={}", presentation.total_warnings);
    }
    if presentation.total_errors > 0 {
        let _ = writeln!(out, "ERRO Errors Total={}", presentation.total_errors);
    }
    let _ = writeln!(out, "INFO Elapsed Time ms={}", presentation.elapsed_time);
    out
}

/// Full report: every record separated by a blank line, then the summary,
/// then the banner.
pub fn render_report(presentation: &Presentation, outcome: &BuildOutcome) -> String {
    let mut out = String::new();
    for record in &presentation.records {
        out.push_str(&render_record(record));
        out.push('\n');
    }
    out.push_str(&render_summary(presentation));
    let _ = writeln!(out, "{}", outcome.banner);
    out
}

/// JSON shape of a report: the verdict plus the flattened presentation.
#[derive(Serialize)]
struct JsonReport<'a> {
    outcome: &'a BuildOutcome,
    #[serde(flatten)]
    presentation: &'a Presentation,
}

/// Pretty-printed JSON of the same report [`render_report`] prints as text.
pub fn render_json(
    presentation: &Presentation,
    outcome: &BuildOutcome,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        outcome,
        presentation,
    })
}

/// Tree lines joined for display, optionally followed by a preview block.
pub fn render_tree(lines: &[String], preview: Option<&[String]>) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    if let Some(preview) = preview {
        out.push('\n');
        for line in preview {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{BuildMode, DiagnosticBatch, DiagnosticKind, ExcerptWindow};

    fn error_record(excerpt: Option<ExcerptWindow>) -> DisplayRecord {
        DisplayRecord {
            severity: DiagnosticKind::Error,
            header: " Script: Foo.mq4 | Char: 8 | Type: error | Code: 256 ".to_string(),
            script: "Foo.mq4".to_string(),
            message: "'y' - undeclared identifier".to_string(),
            line: Some(12),
            excerpt,
            source_error: None,
        }
    }

    #[test]
    fn test_caret_lines_up_with_excerpt_column() {
        let record = error_record(Some(ExcerptWindow {
            text: "int x = y;".to_string(),
            caret_offset: 9,
            leading_trim: 0,
        }));
        let text = render_record(&record);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "[error] Script: Foo.mq4 | Char: 8 | Type: error | Code: 256"
        );
        assert_eq!(lines[1], "   12 │ int x = y;");
        assert_eq!(lines[2], "      │         │");
        assert_eq!(lines[3], "      │         ╰─➤ 'y' - undeclared identifier");

        // The caret sits under the 9th excerpt character.
        let caret_col = lines[2].chars().count() - 1;
        let y_col = lines[1].chars().position(|c| c == 'y').unwrap();
        assert_eq!(caret_col, y_col);
    }

    #[test]
    fn test_header_only_when_source_missing() {
        let mut record = error_record(None);
        record.source_error = Some("Cannot read source 'Foo.mq4'".to_string());
        let text = render_record(&record);
        assert!(text.contains("'y' - undeclared identifier"));
        assert!(text.contains("(Cannot read source 'Foo.mq4')"));
        assert!(!text.contains("╰─➤"));
    }

    #[test]
    fn test_information_record() {
        let record = DisplayRecord {
            severity: DiagnosticKind::Information,
            header: "Compiling".to_string(),
            script: "MQL4/Experts/Foo.mq4".to_string(),
            message: "compiling 'Foo.mq4'".to_string(),
            line: None,
            excerpt: None,
            source_error: None,
        };
        assert_eq!(
            render_record(&record),
            "INFO Compiling Script=MQL4/Experts/Foo.mq4\n"
        );
    }

    #[test]
    fn test_summary_omits_zero_totals() {
        let presentation = Presentation {
            records: Vec::new(),
            total_errors: 0,
            total_warnings: 2,
            elapsed_time: "18".to_string(),
        };
        assert_eq!(
            render_summary(&presentation),
            "WARN Warnings Total=2\nINFO Elapsed Time ms=18\n"
        );
    }

    #[test]
    fn test_report_ends_with_banner() {
        let presentation = Presentation {
            records: vec![error_record(None)],
            total_errors: 1,
            total_warnings: 0,
            elapsed_time: "5".to_string(),
        };
        let batch = DiagnosticBatch {
            total_errors: 1,
            ..Default::default()
        };
        let outcome = BuildOutcome::evaluate(BuildMode::Compile, 0, &batch);
        let text = render_report(&presentation, &outcome);
        assert!(text.contains("ERRO Errors Total=1"));
        assert!(text.ends_with("Failed to compile\n"));
    }

    #[test]
    fn test_json_report_has_verdict_and_totals() {
        let presentation = Presentation {
            records: vec![error_record(None)],
            total_errors: 1,
            total_warnings: 0,
            elapsed_time: "5".to_string(),
        };
        let batch = DiagnosticBatch {
            total_errors: 1,
            ..Default::default()
        };
        let outcome = BuildOutcome::evaluate(BuildMode::Syntax, 0, &batch);

        let text = render_json(&presentation, &outcome).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outcome"]["success"], false);
        assert_eq!(value["outcome"]["banner"], "Syntax check failed");
        assert_eq!(value["total_errors"], 1);
        assert_eq!(value["records"][0]["line"], 12);
    }

    #[test]
    fn test_tree_with_preview() {
        let lines = vec!["MQL4".to_string(), "╰── Foo.mq4".to_string()];
        let preview = vec!["#Empty file".to_string()];
        assert_eq!(
            render_tree(&lines, Some(&preview)),
            "MQL4\n╰── Foo.mq4\n\n  #Empty file\n"
        );
    }
}
