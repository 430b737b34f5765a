// MQLSleuth - app/present.rs
//
// Diagnostic presentation: turns a parsed batch into display records by
// correlating each positional diagnostic with its source line.
//
//   - Information records become header-only records.
//   - Positional records get a header and a windowed excerpt with caret.
//   - `Unknown` records are skipped.
//   - A source that cannot be loaded degrades only the affected record.

use crate::app::source_cache::SourceCache;
use crate::core::excerpt;
use crate::core::model::{
    normalize_path, DiagnosticBatch, DiagnosticKind, DiagnosticRecord, DisplayRecord, Presentation,
};

/// Present every presentable record of `batch`, in log order.
///
/// `width` is the Excerpt Windower width. Totals and elapsed time pass
/// through unchanged.
pub fn present(batch: &DiagnosticBatch, cache: &mut SourceCache, width: usize) -> Presentation {
    let records: Vec<DisplayRecord> = batch
        .presentable()
        .map(|record| present_record(record, cache, width))
        .collect();

    let degraded = records.iter().filter(|r| r.source_error.is_some()).count();
    tracing::debug!(
        records = records.len(),
        degraded,
        cached_files = cache.len(),
        "Presentation complete"
    );

    Presentation {
        records,
        total_errors: batch.total_errors,
        total_warnings: batch.total_warnings,
        elapsed_time: batch.elapsed_time.clone(),
    }
}

/// Present a single record. Callers filter out `Unknown` records first.
pub fn present_record(
    record: &DiagnosticRecord,
    cache: &mut SourceCache,
    width: usize,
) -> DisplayRecord {
    match record.kind {
        DiagnosticKind::Information => present_information(record),
        _ => present_positional(record, cache, width),
    }
}

fn present_information(record: &DiagnosticRecord) -> DisplayRecord {
    DisplayRecord {
        severity: DiagnosticKind::Information,
        header: information_headline(&record.message),
        script: normalize_path(&record.source_file),
        message: record.message.clone(),
        line: None,
        excerpt: None,
        source_error: None,
    }
}

fn present_positional(
    record: &DiagnosticRecord,
    cache: &mut SourceCache,
    width: usize,
) -> DisplayRecord {
    let script = normalize_path(&record.script_name);

    let (excerpt, source_error) = match cache.line(&script, record.line) {
        Ok(text) => (Some(excerpt::window(text, record.column, width)), None),
        Err(e) => {
            tracing::warn!(
                script = %script,
                line = record.line,
                error = %e,
                "Source unavailable; showing header only"
            );
            (None, Some(e.to_string()))
        }
    };

    DisplayRecord {
        severity: record.kind,
        header: positional_header(record),
        script,
        message: record.message.clone(),
        line: Some(record.line),
        excerpt,
        source_error,
    }
}

/// Header of a positional diagnostic, spaces included:
/// ` Script: Experts/Foo.mq4 | Char: 15 | Type: error | Code: 256 `.
pub fn positional_header(record: &DiagnosticRecord) -> String {
    format!(
        " Script: {} | Char: {} | Type: {} | Code: {} ",
        record.script_name, record.column, record.kind, record.code
    )
}

/// The first word of an information message in title case, e.g.
/// `compiling 'Foo.mq4'` -> `Compiling`.
pub fn information_headline(message: &str) -> String {
    let word = message.split(' ').next().unwrap_or_default();
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::BuildMode;
    use crate::core::parser;

    fn positional(script: &str, line: usize, column: usize) -> DiagnosticRecord {
        DiagnosticRecord {
            script_name: script.to_string(),
            kind: DiagnosticKind::Error,
            message: "'x' - undeclared identifier".to_string(),
            source_file: normalize_path(script),
            line,
            column,
            code: 256,
        }
    }

    #[test]
    fn test_information_headline() {
        assert_eq!(information_headline("compiling 'Foo.mq4'"), "Compiling");
        assert_eq!(information_headline("INCLUDING file"), "Including");
        assert_eq!(information_headline(""), "");
    }

    #[test]
    fn test_positional_header_uses_raw_script_name() {
        let record = positional(r"Experts\Foo.mq4", 12, 15);
        assert_eq!(
            positional_header(&record),
            r" Script: Experts\Foo.mq4 | Char: 15 | Type: error | Code: 256 "
        );
    }

    #[test]
    fn test_positional_record_gets_excerpt() {
        let mut cache = SourceCache::new();
        cache.insert("Experts/Foo.mq4", "int a;\n   x = 1;\n");
        let display = present_record(&positional(r"Experts\Foo.mq4", 2, 3), &mut cache, 69);

        assert_eq!(display.severity, DiagnosticKind::Error);
        assert_eq!(display.script, "Experts/Foo.mq4");
        assert_eq!(display.line, Some(2));
        assert!(display.source_error.is_none());
        let excerpt = display.excerpt.expect("excerpt present");
        assert_eq!(excerpt.text, " x = 1;");
        assert_eq!(excerpt.leading_trim, 2);
        assert_eq!(excerpt.caret_offset, 2);
    }

    #[test]
    fn test_missing_source_degrades_single_record() {
        let mut cache = SourceCache::new();
        cache.insert("Good.mq4", "int a;\n");
        let batch = DiagnosticBatch {
            records: vec![
                positional("Missing/Nowhere.mq4", 1, 0),
                positional("Good.mq4", 1, 4),
            ],
            total_errors: 2,
            ..Default::default()
        };

        let presentation = present(&batch, &mut cache, 69);
        assert_eq!(presentation.records.len(), 2);
        assert!(presentation.records[0].excerpt.is_none());
        assert!(presentation.records[0].source_error.is_some());
        assert!(presentation.records[1].excerpt.is_some());
        assert_eq!(presentation.total_errors, 2);
    }

    #[test]
    fn test_line_past_end_degrades() {
        let mut cache = SourceCache::new();
        cache.insert("Short.mq4", "only line");
        let display = present_record(&positional("Short.mq4", 5, 0), &mut cache, 69);
        assert!(display.excerpt.is_none());
        assert!(display
            .source_error
            .as_deref()
            .is_some_and(|e| e.contains("line 5")));
    }

    #[test]
    fn test_unknown_records_are_not_presented() {
        let text = "garbage line\r\ninformation: nothing\r\nResult: 0 errors, 0 warnings, 5 msec elapsed\r\n";
        let batch = parser::parse(text, BuildMode::Compile);
        let presentation = present(&batch, &mut SourceCache::new(), 69);
        assert!(presentation.records.is_empty());
        assert_eq!(presentation.elapsed_time, "5");
    }

    #[test]
    fn test_information_records_are_header_only() {
        let text = "MQL4\\Experts\\Foo.mq4 : information: compiling 'Foo.mq4'\n";
        let batch = parser::parse(text, BuildMode::Compile);
        let presentation = present(&batch, &mut SourceCache::new(), 69);
        let info = &presentation.records[0];
        assert_eq!(info.header, "Compiling");
        assert_eq!(info.script, "MQL4/Experts/Foo.mq4");
        assert_eq!(info.line, None);
        assert!(info.excerpt.is_none());
    }
}
