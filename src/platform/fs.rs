// MQLSleuth - platform/fs.rs
//
// Filesystem helpers shared by the source cache, the picker preview and the
// CLI log reader. Invalid UTF-8 is replaced rather than rejected: MQL
// sources are often ANSI-encoded and a lossy excerpt beats no excerpt.

use std::io;
use std::path::Path;

/// Read the first N lines of a file.
///
/// Returns up to `max_lines` lines from the start of the file, with invalid
/// UTF-8 replaced.
pub fn read_first_lines(path: &Path, max_lines: usize) -> io::Result<Vec<String>> {
    use std::io::BufRead;
    let file = std::fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut lines = Vec::with_capacity(max_lines.min(1_024));
    let mut buf = Vec::new();
    while lines.len() < max_lines {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines.push(strip_line_ending(&String::from_utf8_lossy(&buf)).to_string());
    }
    Ok(lines)
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a source file and split it into lines.
///
/// Splits on `\n` so that a trailing newline yields a final empty line,
/// keeping line N of the editor at index N-1. A trailing `\r` is removed
/// from every line.
pub fn read_source_lines(path: &Path) -> io::Result<Vec<String>> {
    let content = read_file_lossy(path)?;
    Ok(split_source_lines(&content))
}

/// Split already-loaded source text the same way [`read_source_lines`] does.
pub fn split_source_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
