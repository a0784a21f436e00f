//! Version tree: construction from flat entries, the derived file path list,
//! expansion state, relative navigation and the visible-row projection.

pub mod builder;
pub mod expanded;
pub mod navigation;
pub mod path_index;
pub mod rows;

pub use builder::{build_file_tree, root_path, DirectoryNode};
pub use expanded::ExpandedPaths;
pub use navigation::{
    diff_sequence, message_sequence, relative_item, relative_item_from_path, HunkAnchor, MessageRef,
    RelativePosition,
};
pub use path_index::{ancestor_ids, directory_ids, path_list};
pub use rows::{visible_rows, RowKind, TreeRow};
