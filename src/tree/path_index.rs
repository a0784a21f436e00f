use super::builder::{DirectoryNode, TreeNode};

/// Depth-first, left-to-right list of file ids. Directories are walked but
/// not emitted, so the list follows the tree's sibling ordering exactly.
pub fn path_list(root: &DirectoryNode) -> Vec<String> {
    let mut paths = Vec::new();
    collect_files(root, &mut paths);
    paths
}

fn collect_files(dir: &DirectoryNode, paths: &mut Vec<String>) {
    for child in &dir.children {
        match child {
            TreeNode::File(file) => paths.push(file.id.clone()),
            TreeNode::Directory(sub) => collect_files(sub, paths),
        }
    }
}

/// Ids of every directory in the tree, root included.
pub fn directory_ids(root: &DirectoryNode) -> Vec<String> {
    let mut ids = vec![root.id.clone()];
    collect_directories(root, &mut ids);
    ids
}

fn collect_directories(dir: &DirectoryNode, ids: &mut Vec<String>) {
    for child in &dir.children {
        if let TreeNode::Directory(sub) = child {
            ids.push(sub.id.clone());
            collect_directories(sub, ids);
        }
    }
}

/// Ancestor directory ids of `path`, nearest to the root first, excluding the root itself.
pub fn ancestor_ids(path: &str) -> Vec<String> {
    let mut ids = Vec::new();
    let mut end = 0;
    while let Some(offset) = path[end..].find('/') {
        end += offset;
        ids.push(path[..end].to_string());
        end += 1;
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::build_file_tree;
    use crate::version::Entry;

    fn sample_tree() -> DirectoryNode {
        build_file_tree(
            "root-addon",
            "addon",
            &[
                Entry::file("manifest.json"),
                Entry::directory("lib"),
                Entry::directory("assets"),
                Entry::file("lib/b.js"),
                Entry::directory("lib/vendor"),
                Entry::file("lib/a.js"),
                Entry::file("lib/vendor/z.js"),
                Entry::directory("empty"),
            ],
        )
        .expect("valid entries")
    }

    #[test]
    fn path_list_follows_sorted_tree() {
        assert_eq!(
            path_list(&sample_tree()),
            vec!["lib/vendor/z.js", "lib/a.js", "lib/b.js", "manifest.json"]
        );
    }

    #[test]
    fn path_list_contains_only_files() {
        let tree = sample_tree();
        let paths = path_list(&tree);
        // 4 file entries, 4 directory entries
        assert_eq!(paths.len(), 4);
        for dir in directory_ids(&tree) {
            assert!(!paths.contains(&dir));
        }
    }

    #[test]
    fn path_list_of_empty_tree() {
        let tree = build_file_tree("root-x", "x", &[]).unwrap();
        assert!(path_list(&tree).is_empty());
    }

    #[test]
    fn directory_ids_include_root_and_nested() {
        assert_eq!(
            directory_ids(&sample_tree()),
            vec!["root-addon", "assets", "empty", "lib", "lib/vendor"]
        );
    }

    #[test]
    fn ancestor_ids_of_nested_path() {
        assert_eq!(ancestor_ids("lib/vendor/z.js"), vec!["lib", "lib/vendor"]);
        assert!(ancestor_ids("manifest.json").is_empty());
    }
}
