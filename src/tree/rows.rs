use super::builder::{DirectoryNode, TreeNode};
use super::expanded::ExpandedPaths;

/// What a visible row stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Directory { expanded: bool },
    File,
    /// Placeholder under an expanded directory that has no children.
    EmptyDirectory,
}

/// A flattened, visible line of the tree for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: String,
    pub name: String,
    pub kind: RowKind,
    /// 0 for the root row.
    pub depth: usize,
    pub is_last_sibling: bool,
}

/// Rows visible when only directories in `expanded` show their children.
pub fn visible_rows(root: &DirectoryNode, expanded: &ExpandedPaths) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_directory(root, expanded, 0, true, &mut rows);
    rows
}

fn push_directory(
    dir: &DirectoryNode,
    expanded: &ExpandedPaths,
    depth: usize,
    is_last: bool,
    rows: &mut Vec<TreeRow>,
) {
    let is_expanded = expanded.is_expanded(&dir.id);
    rows.push(TreeRow {
        id: dir.id.clone(),
        name: dir.name.clone(),
        kind: RowKind::Directory {
            expanded: is_expanded,
        },
        depth,
        is_last_sibling: is_last,
    });

    if !is_expanded {
        return;
    }

    if dir.children.is_empty() {
        rows.push(TreeRow {
            id: format!("{}/", dir.id),
            name: "This folder is empty".to_string(),
            kind: RowKind::EmptyDirectory,
            depth: depth + 1,
            is_last_sibling: true,
        });
        return;
    }

    let last = dir.children.len() - 1;
    for (i, child) in dir.children.iter().enumerate() {
        match child {
            TreeNode::Directory(sub) => push_directory(sub, expanded, depth + 1, i == last, rows),
            TreeNode::File(file) => rows.push(TreeRow {
                id: file.id.clone(),
                name: file.name.clone(),
                kind: RowKind::File,
                depth: depth + 1,
                is_last_sibling: i == last,
            }),
        }
    }
}
