// MQLSleuth - core/excerpt.rs
//
// Bounded-width source excerpts around a diagnostic column.
//
// Source lines are frequently far wider than the display, so the line is
// cut into fixed-width chunks and the chunk containing the column is shown.
// Near the end of the line the window is pulled left so it stays full width.
// All positions are in characters, not bytes.

use crate::core::model::ExcerptWindow;

/// Compute the excerpt of `line` around `column` (0-based compiler offset).
///
/// 1. Leading spaces are trimmed down to a single column of padding.
/// 2. A trimmed line of at most `width` characters is shown whole.
/// 3. Otherwise the `width`-sized chunk selected by `column / width` is
///    shown, shifted left when it would run past the end of the line.
/// 4. The caret is 1-based within the excerpt and clamped to
///    `1..=max(text_len, 1)`.
///
/// The chunk index is taken from the untrimmed column while the chunk itself
/// is cut from the trimmed line. This mirrors how MetaEditor output has
/// always been windowed; for columns inside the trimmed indentation the
/// caret is clamped to the first character.
pub fn window(line: &str, column: usize, width: usize) -> ExcerptWindow {
    let width = width.max(1);
    let chars: Vec<char> = line.chars().collect();

    let leading_spaces = chars.iter().take_while(|&&c| c == ' ').count();
    let leading_trim = leading_spaces.saturating_sub(1);
    let trimmed = &chars[leading_trim..];

    let mut chunk_start = 0usize;
    let text: String = if trimmed.len() <= width {
        trimmed.iter().collect()
    } else {
        let chunk_index = column / width;
        chunk_start = chunk_index.saturating_mul(width);
        let mut chunk_end = chunk_start.saturating_add(width).min(trimmed.len());

        if chunk_end.saturating_sub(chunk_start) < width {
            chunk_start = trimmed.len().saturating_sub(width);
            chunk_end = (chunk_start + width).min(trimmed.len());
        }

        trimmed[chunk_start..chunk_end].iter().collect()
    };

    let text_len = text.chars().count();
    let raw_caret = column as i128 - leading_trim as i128 - chunk_start as i128 + 1;
    let caret_offset = usize::try_from(raw_caret.max(1))
        .unwrap_or(usize::MAX)
        .min(text_len.max(1));

    ExcerptWindow {
        text,
        caret_offset,
        leading_trim,
    }
}
