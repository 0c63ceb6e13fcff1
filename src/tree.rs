//! Path-trie tree building for hierarchy rendering.
//!
//! Callers hand over flat `a/b/c` paths; the builder deduplicates shared
//! prefixes into a single node tree that renders fully expanded with
//! box-drawing guide lines.

use crate::console::Widget;
use crate::markup;
use crate::settings;
use crate::theme::{Theme, ThemeToken};
use std::collections::HashMap;

/// One leaf-or-intermediate item to place in a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Slash-delimited segments; empty segments are discarded.
    pub path: String,
    /// Shown only on the node for this entry's exact full path.
    pub decoration: Option<String>,
}

impl PathEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            decoration: None,
        }
    }

    pub fn decorated(path: impl Into<String>, decoration: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            decoration: Some(decoration.into()),
        }
    }
}

/// One rendered tree node. Immutable once the build pass completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Escaped segment text plus optional decoration.
    pub label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Total node count including this node.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::node_count)
            .sum::<usize>()
    }
}

// Build-pass arena node; flattened so the prefix map can hold plain indices
// instead of fighting the borrow checker over nested `&mut` nodes.
struct ArenaNode {
    label: String,
    children: Vec<usize>,
}

/// Build a deduplicated tree from ordered path entries.
///
/// Invariant: the set of prefixes mapped to nodes equals the set of distinct
/// non-empty path prefixes seen so far, full paths included. First occurrence
/// of a prefix wins; later entries attach children under the existing node.
/// Children keep the order their owning entries were processed in.
pub fn build_tree(root_label: &str, entries: &[PathEntry]) -> TreeNode {
    let mut arena = vec![ArenaNode {
        label: markup::escape(root_label),
        children: Vec::new(),
    }];
    let mut by_prefix: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let segments: Vec<&str> = entry
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        if segments.is_empty() {
            // Paths like "", "/", "///" contribute no node.
            continue;
        }

        let mut prefix = String::new();
        let mut parent = 0usize;
        let last_index = segments.len() - 1;

        for (index, segment) in segments.iter().enumerate() {
            if prefix.is_empty() {
                prefix.push_str(segment);
            } else {
                prefix.push('/');
                prefix.push_str(segment);
            }

            if let Some(&existing) = by_prefix.get(&prefix) {
                parent = existing;
                continue;
            }

            let mut label = markup::escape(segment);
            if index == last_index {
                if let Some(decoration) = entry.decoration.as_deref() {
                    label.push(' ');
                    label.push_str(decoration);
                }
            }

            let node = arena.len();
            arena.push(ArenaNode {
                label,
                children: Vec::new(),
            });
            arena[parent].children.push(node);
            by_prefix.insert(prefix.clone(), node);
            parent = node;
        }
    }

    freeze(&arena, 0)
}

fn freeze(arena: &[ArenaNode], index: usize) -> TreeNode {
    let node = &arena[index];
    TreeNode {
        label: node.label.clone(),
        children: node
            .children
            .iter()
            .map(|&child| freeze(arena, child))
            .collect(),
    }
}

impl Widget for TreeNode {
    fn markup_lines(&self, _width: usize, theme: &Theme) -> Vec<String> {
        let mut lines = vec![format!("[bold]{}[/]", self.label)];
        push_children(self, "", theme, &mut lines);
        lines
    }
}

fn push_children(node: &TreeNode, prefix: &str, theme: &Theme, lines: &mut Vec<String>) {
    let guide_words = theme.style_words(ThemeToken::TreeGuide);
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let last = index + 1 == count;
        let branch = if last {
            settings::TREE_BRANCH_LAST
        } else {
            settings::TREE_BRANCH
        };
        lines.push(format!(
            "[{guide_words}]{prefix}{branch}[/]{}",
            child.label
        ));

        let continuation = if last {
            settings::TREE_GUIDE_BLANK
        } else {
            settings::TREE_GUIDE
        };
        let child_prefix = format!("{prefix}{continuation}");
        push_children(child, &child_prefix, theme, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::plain;

    fn labels(node: &TreeNode) -> Vec<&str> {
        node.children().iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn shared_prefixes_create_one_node() {
        // "a" must exist exactly once even when referenced by two deeper
        // entries and again as its own entry.
        let entries = [
            PathEntry::new("a/b"),
            PathEntry::new("a/c"),
            PathEntry::new("a"),
        ];
        let tree = build_tree("root", &entries);

        assert_eq!(tree.children().len(), 1);
        let a = &tree.children()[0];
        assert_eq!(a.label, "a");
        assert_eq!(labels(a), vec!["b", "c"]);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn node_count_matches_distinct_prefixes() {
        let entries = [
            PathEntry::new("x/y/z"),
            PathEntry::new("x/y"),
            PathEntry::new("x/w"),
            PathEntry::new("v"),
        ];
        let tree = build_tree("root", &entries);
        // Distinct prefixes: x, x/y, x/y/z, x/w, v.
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn children_keep_entry_processing_order() {
        let entries = [
            PathEntry::new("zebra"),
            PathEntry::new("apple"),
            PathEntry::new("mango"),
        ];
        let tree = build_tree("root", &entries);
        assert_eq!(labels(&tree), vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn decoration_lands_only_on_final_segment() {
        let entries = [PathEntry::decorated("src/lib.rs", "✔")];
        let tree = build_tree("root", &entries);
        let src = &tree.children()[0];
        assert_eq!(src.label, "src");
        assert_eq!(src.children()[0].label, "lib.rs ✔");
    }

    #[test]
    fn earlier_decoration_survives_later_descendants() {
        let entries = [
            PathEntry::decorated("a", "★"),
            PathEntry::new("a/b"),
        ];
        let tree = build_tree("root", &entries);
        let a = &tree.children()[0];
        assert_eq!(a.label, "a ★");
        assert_eq!(labels(a), vec!["b"]);
    }

    #[test]
    fn intermediate_nodes_never_gain_decorations() {
        // The decoration belongs to the full path, not to ancestors created
        // along the way.
        let entries = [PathEntry::decorated("a/b/c", "!")];
        let tree = build_tree("root", &entries);
        let a = &tree.children()[0];
        let b = &a.children()[0];
        assert_eq!(a.label, "a");
        assert_eq!(b.label, "b");
        assert_eq!(b.children()[0].label, "c !");
    }

    #[test]
    fn empty_and_slash_only_paths_contribute_nothing() {
        let entries = [
            PathEntry::new(""),
            PathEntry::new("/"),
            PathEntry::new("///"),
            PathEntry::new("real"),
        ];
        let tree = build_tree("root", &entries);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(labels(&tree), vec!["real"]);
    }

    #[test]
    fn leading_and_doubled_slashes_collapse() {
        let entries = [PathEntry::new("/a//b/")];
        let tree = build_tree("root", &entries);
        let a = &tree.children()[0];
        assert_eq!(a.label, "a");
        assert_eq!(labels(a), vec!["b"]);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let entries = [
            PathEntry::new("a/b"),
            PathEntry::decorated("a/c", "•"),
            PathEntry::new("d"),
        ];
        let first = build_tree("root", &entries);
        let second = build_tree("root", &entries);
        assert_eq!(first, second);
    }

    #[test]
    fn labels_are_markup_escaped() {
        let entries = [PathEntry::new("[red]/x")];
        let tree = build_tree("[root]", &entries);
        assert_eq!(plain(&tree.label), "[root]");
        assert_eq!(plain(&tree.children()[0].label), "[red]");
    }

    #[test]
    fn renders_with_guide_lines_fully_expanded() {
        let entries = [
            PathEntry::new("a/b"),
            PathEntry::new("a/c"),
            PathEntry::new("d"),
        ];
        let tree = build_tree("root", &entries);
        let lines = tree.markup_lines(80, &Theme::default());
        let plain_lines: Vec<String> = lines.iter().map(|l| plain(l)).collect();

        assert_eq!(plain_lines[0], "root");
        assert_eq!(plain_lines[1], "├── a");
        assert_eq!(plain_lines[2], "│   ├── b");
        assert_eq!(plain_lines[3], "│   └── c");
        assert_eq!(plain_lines[4], "└── d");
    }
}
