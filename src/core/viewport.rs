// MQLSleuth - core/viewport.rs
//
// Fixed-height scrolling window over the rendered file tree that keeps the
// selected line visible.

use std::ops::Range;

/// Line range of `total_lines` to display in a viewport of
/// `viewport_height` rows, given the 1-based line number of the selection.
///
/// - Everything fits: the full range.
/// - Selection within the top half of the viewport: pinned to the top so the
///   root stays visible.
/// - Otherwise the window starts at the selection and is pulled back when it
///   would run short at the bottom.
///
/// The result always has `min(total_lines, viewport_height)` lines, and for
/// `1 <= selected_leaf_depth <= total_lines` it contains the selected line.
pub fn visible_range(
    total_lines: usize,
    selected_leaf_depth: usize,
    viewport_height: usize,
) -> Range<usize> {
    if total_lines <= viewport_height {
        return 0..total_lines;
    }
    if viewport_height == 0 {
        return 0..0;
    }

    let mut start = selected_leaf_depth.saturating_sub(1);
    if start < viewport_height / 2 {
        start = 0;
    }

    let end = start.saturating_add(viewport_height).min(total_lines);
    if end.saturating_sub(start) < viewport_height {
        start = end.saturating_sub(viewport_height);
    }

    start..end
}

/// The visible slice of `full_tree_lines`. See [`visible_range`].
pub fn slice<S>(full_tree_lines: &[S], selected_leaf_depth: usize, viewport_height: usize) -> &[S] {
    let range = visible_range(full_tree_lines.len(), selected_leaf_depth, viewport_height);
    &full_tree_lines[range]
}
