use serde::Serialize;

use crate::error::{AppError, Result};
use crate::version::{Entry, EntryKind};

/// A file leaf in the version tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
}

/// A directory in the version tree with its immediate children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryNode {
    pub id: String,
    pub name: String,
    pub children: Vec<TreeNode>,
}

/// A node in the version tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    File(FileNode),
    Directory(DirectoryNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.name,
            TreeNode::Directory(dir) => &dir.name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }
}

#[cfg(test)]
impl TreeNode {
    pub fn id(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.id,
            TreeNode::Directory(dir) => &dir.id,
        }
    }
}

impl DirectoryNode {
    fn empty(id: String, name: String) -> Self {
        Self {
            id,
            name,
            children: Vec::new(),
        }
    }

    /// Walk down from this directory through `segments`, matching child
    /// directory names at each step.
    fn find_descendant_mut(&mut self, segments: &[&str]) -> Option<&mut DirectoryNode> {
        let mut node = self;
        for segment in segments {
            node = node.children.iter_mut().find_map(|child| match child {
                TreeNode::Directory(dir) if dir.name == *segment => Some(dir),
                _ => None,
            })?;
        }
        Some(node)
    }

    /// Sort children (directories first, then case-sensitive by name) at every level.
    fn sort_recursive(&mut self) {
        self.children.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.name().cmp(b.name()))
        });
        for child in self.children.iter_mut() {
            if let TreeNode::Directory(dir) = child {
                dir.sort_recursive();
            }
        }
    }
}

/// Id of the synthetic root node for a version with the given name.
pub fn root_path(name: &str) -> String {
    format!("root-{}", name)
}

/// Build a sorted tree from a flat entry list.
///
/// Entries are placed depth by depth so that every directory exists before
/// its children attach to it. An entry whose parent directory cannot be found
/// yields `AppError::MalformedEntry` instead of being dropped.
pub fn build_file_tree(root_id: &str, root_name: &str, entries: &[Entry]) -> Result<DirectoryNode> {
    let mut root = DirectoryNode::empty(root_id.to_string(), root_name.to_string());

    let max_depth = entries.iter().map(|entry| entry.depth).max().unwrap_or(0);
    let mut levels: Vec<Vec<&Entry>> = vec![Vec::new(); max_depth + 1];
    for entry in entries {
        levels[entry.depth].push(entry);
    }

    for level in levels {
        for entry in level {
            let segments = entry.parent_segments();
            let parent = root.find_descendant_mut(&segments).ok_or_else(|| {
                AppError::MalformedEntry {
                    path: entry.path.clone(),
                    parent: segments.join("/"),
                }
            })?;

            let node = match entry.kind {
                EntryKind::File => TreeNode::File(FileNode {
                    id: entry.path.clone(),
                    name: entry.filename.clone(),
                }),
                EntryKind::Directory => TreeNode::Directory(DirectoryNode::empty(
                    entry.path.clone(),
                    entry.filename.clone(),
                )),
            };
            parent.children.push(node);
        }
    }

    root.sort_recursive();
    Ok(root)
}
