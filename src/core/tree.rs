// MQLSleuth - core/tree.rs
//
// Hierarchical file tree built from the picker's flat file list, and its
// plain-text rendering.
//
// The tree is rebuilt from `(paths, selected_index)` on every selection
// change rather than mutated in place, so building is a pure function.

use crate::core::model::normalize_path;
use crate::util::error::TreeError;
use std::collections::BTreeMap;

/// Root name used by [`build`] when the caller has no scan root to name.
pub const DEFAULT_ROOT_NAME: &str = ".";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "╰── ";
const INDENT: &str = "│   ";
const LAST_INDENT: &str = "    ";

// =============================================================================
// FileNode
// =============================================================================

/// A directory or file in the picker tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileNode {
    /// Path segment (the scan root's display name for the root node).
    pub name: String,

    /// Children keyed by segment name. `BTreeMap` iterates in lexicographic
    /// order, which is the display order.
    pub children: BTreeMap<String, FileNode>,

    /// True for at most one leaf in the tree.
    pub selected: bool,
}

impl FileNode {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Split a scanned path into tree segments. Either separator is accepted;
/// empty and `.` segments are dropped.
fn segments(path: &str) -> Vec<String> {
    normalize_path(path)
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Building
// =============================================================================

/// Build the tree for `paths` with `paths[selected_index]` marked selected,
/// under a root named [`DEFAULT_ROOT_NAME`].
pub fn build<S: AsRef<str>>(paths: &[S], selected_index: usize) -> Result<FileNode, TreeError> {
    build_named(DEFAULT_ROOT_NAME, paths, selected_index)
}

/// Build the tree for `paths` under a root called `root_name`.
///
/// Fails with `NoFilesFound` when `paths` is empty and with
/// `SelectionOutOfRange` when `selected_index` does not address a path.
pub fn build_named<S: AsRef<str>>(
    root_name: &str,
    paths: &[S],
    selected_index: usize,
) -> Result<FileNode, TreeError> {
    if paths.is_empty() {
        return Err(TreeError::NoFilesFound {
            root: root_name.to_string(),
        });
    }
    if selected_index >= paths.len() {
        return Err(TreeError::SelectionOutOfRange {
            index: selected_index,
            len: paths.len(),
        });
    }

    let mut root = FileNode::named(root_name);

    for path in paths {
        let mut node = &mut root;
        for segment in segments(path.as_ref()) {
            node = node
                .children
                .entry(segment.clone())
                .or_insert_with(|| FileNode::named(&segment));
        }
    }

    let selected = segments(paths[selected_index].as_ref());
    if !selected.is_empty() {
        mark_selected(&mut root, &selected);
    }

    tracing::trace!(
        root = root_name,
        files = paths.len(),
        selected_index,
        "File tree built"
    );

    Ok(root)
}

fn mark_selected(node: &mut FileNode, segments: &[String]) {
    match segments.split_first() {
        // A path that is also a directory of another path is not a leaf.
        None => node.selected = node.is_leaf(),
        Some((head, rest)) => {
            if let Some(child) = node.children.get_mut(head) {
                mark_selected(child, rest);
            }
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Text lines of a rendered tree plus where the selection landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    pub lines: Vec<String>,

    /// 1-based line number of the selected leaf: the number of rendered
    /// lines up to and including the selection.
    pub selected_line: Option<usize>,
}

/// Render with rounded connectors, children in sorted order:
///
/// ```text
/// MQL4
/// ├── Experts
/// │   ╰── Foo.mq4
/// ╰── Scripts
///     ╰── Bar.mq4
/// ```
pub fn render(root: &FileNode) -> RenderedTree {
    let mut rendered = RenderedTree {
        lines: vec![root.name.clone()],
        selected_line: root.selected.then_some(1),
    };
    render_children(root, "", &mut rendered);
    rendered
}

fn render_children(node: &FileNode, prefix: &str, out: &mut RenderedTree) {
    let total = node.children.len();
    for (i, child) in node.children.values().enumerate() {
        let is_last = i + 1 == total;
        let (connector, indent) = if is_last {
            (LAST_BRANCH, LAST_INDENT)
        } else {
            (BRANCH, INDENT)
        };

        out.lines.push(format!("{prefix}{connector}{}", child.name));
        if child.selected {
            out.selected_line = Some(out.lines.len());
        }

        render_children(child, &format!("{prefix}{indent}"), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl FileNode {
        /// Number of leaves below (and including) this node.
        fn leaf_count(&self) -> usize {
            if self.is_leaf() {
                1
            } else {
                self.children.values().map(FileNode::leaf_count).sum()
            }
        }

        /// Segments from (excluding) this node down to the selected leaf.
        fn selected_path(&self) -> Option<Vec<&str>> {
            if self.selected {
                return Some(Vec::new());
            }
            self.children.values().find_map(|child| {
                child.selected_path().map(|mut rest| {
                    rest.insert(0, child.name.as_str());
                    rest
                })
            })
        }
    }

    fn sample_paths() -> Vec<&'static str> {
        vec![
            "Scripts/Bar.mq4",
            "Experts/Foo.mq4",
            "Experts/Advisors/Grid.mq4",
            "Indicators\\Trend.mq4",
        ]
    }

    #[test]
    fn test_empty_paths_fail_with_no_files_found() {
        let paths: Vec<String> = Vec::new();
        assert!(matches!(
            build(&paths, 0),
            Err(TreeError::NoFilesFound { .. })
        ));
    }

    #[test]
    fn test_selection_out_of_range() {
        assert_eq!(
            build(&["a.mq4"], 1),
            Err(TreeError::SelectionOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_shared_directories_are_reused() {
        let root = build(&sample_paths(), 0).unwrap();
        assert_eq!(root.children.len(), 3);
        let experts = &root.children["Experts"];
        assert_eq!(experts.children.len(), 2);
        assert!(experts.children.contains_key("Advisors"));
        assert_eq!(root.leaf_count(), 4);
    }

    #[test]
    fn test_exactly_one_leaf_selected() {
        for idx in 0..sample_paths().len() {
            let root = build(&sample_paths(), idx).unwrap();
            let path = root.selected_path().expect("a leaf is selected");
            assert_eq!(path.join("/"), normalize_path(sample_paths()[idx]));
        }
    }

    #[test]
    fn test_backslash_paths_split_into_segments() {
        let root = build(&sample_paths(), 3).unwrap();
        assert!(root.children["Indicators"].children["Trend.mq4"].selected);
    }

    #[test]
    fn test_render_sorted_with_rounded_connectors() {
        let root = build_named("MQL4", &sample_paths(), 1).unwrap();
        let rendered = render(&root);
        assert_eq!(
            rendered.lines,
            vec![
                "MQL4",
                "├── Experts",
                "│   ├── Advisors",
                "│   │   ╰── Grid.mq4",
                "│   ╰── Foo.mq4",
                "├── Indicators",
                "│   ╰── Trend.mq4",
                "╰── Scripts",
                "    ╰── Bar.mq4",
            ]
        );
        // Experts/Foo.mq4 is the fifth line.
        assert_eq!(rendered.selected_line, Some(5));
    }

    #[test]
    fn test_render_is_independent_of_input_order() {
        let mut reversed = sample_paths();
        reversed.reverse();
        let a = render(&build(&sample_paths(), 0).unwrap()).lines;
        let b = render(&build(&reversed, 0).unwrap()).lines;
        assert_eq!(a, b);
    }

    #[test]
    fn test_dot_prefixed_paths() {
        let root = build(&["./Foo.mq4", "./Sub/Bar.mq4"], 0).unwrap();
        assert!(root.children["Foo.mq4"].selected);
        assert!(!root.children.contains_key("."));
    }
}
