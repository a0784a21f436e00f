//! Relative (previous/next) navigation over ordered sequences, and the
//! derivation of the diff-hunk and linter-message sequences it walks.

use std::collections::{BTreeMap, HashMap};

use crate::version::LinterMessage;

/// Direction of a relative move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePosition {
    Previous,
    Next,
}

impl RelativePosition {
    pub fn label(&self) -> &'static str {
        match self {
            RelativePosition::Previous => "previous",
            RelativePosition::Next => "next",
        }
    }
}

/// The element adjacent to `current` in `sequence`, or `None` at either end.
///
/// With no current element (or one that is no longer in the sequence),
/// `Next` yields the first element and `Previous` the last. Never wraps.
pub fn relative_item<'a, T: PartialEq>(
    sequence: &'a [T],
    current: Option<&T>,
    position: RelativePosition,
) -> Option<&'a T> {
    let index = current.and_then(|current| sequence.iter().position(|item| item == current));

    match (index, position) {
        (None, RelativePosition::Next) => sequence.first(),
        (None, RelativePosition::Previous) => sequence.last(),
        (Some(i), RelativePosition::Next) => sequence.get(i + 1),
        (Some(i), RelativePosition::Previous) => i.checked_sub(1).and_then(|i| sequence.get(i)),
    }
}

/// A position that belongs to one file of the path list.
pub trait FilePosition {
    fn path(&self) -> &str;
}

/// Like [`relative_item`], but when there is no current element the search
/// starts at `current_path`: `Next` yields the first element in or after that
/// file, `Previous` the last element in or before it (both in `path_list`
/// order). Without a known current path this is plain `relative_item`.
pub fn relative_item_from_path<'a, T: PartialEq + FilePosition>(
    sequence: &'a [T],
    current: Option<&T>,
    current_path: Option<&str>,
    path_list: &[String],
    position: RelativePosition,
) -> Option<&'a T> {
    let current = current.filter(|current| sequence.contains(*current));
    if current.is_some() {
        return relative_item(sequence, current, position);
    }

    let file_index = |path: &str| path_list.iter().position(|p| p == path);
    let Some(start) = current_path.and_then(&file_index) else {
        return relative_item(sequence, None, position);
    };

    match position {
        RelativePosition::Next => sequence
            .iter()
            .find(|item| file_index(item.path()).is_some_and(|i| i >= start)),
        RelativePosition::Previous => sequence
            .iter()
            .rev()
            .find(|item| file_index(item.path()).is_some_and(|i| i <= start)),
    }
}

/// A diff hunk, addressed by its file and anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkAnchor {
    pub path: String,
    pub anchor: String,
}

/// A linter message, addressed by its file and uid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub path: String,
    pub uid: String,
}

impl FilePosition for HunkAnchor {
    fn path(&self) -> &str {
        &self.path
    }
}

impl FilePosition for MessageRef {
    fn path(&self) -> &str {
        &self.path
    }
}

/// Hunks of every file in `path_list` order, each file's hunks in file order.
pub fn diff_sequence(
    path_list: &[String],
    diff: &BTreeMap<String, Vec<String>>,
) -> Vec<HunkAnchor> {
    path_list
        .iter()
        .filter_map(|path| diff.get(path).map(|anchors| (path, anchors)))
        .flat_map(|(path, anchors)| {
            anchors.iter().map(move |anchor| HunkAnchor {
                path: path.clone(),
                anchor: anchor.clone(),
            })
        })
        .collect()
}

/// Messages attached to files in `path_list`, ordered by file, then line
/// (messages without a line first), then input order.
pub fn message_sequence(path_list: &[String], messages: &[LinterMessage]) -> Vec<MessageRef> {
    let order: HashMap<&str, usize> = path_list
        .iter()
        .enumerate()
        .map(|(i, path)| (path.as_str(), i))
        .collect();

    let mut keyed: Vec<(usize, Option<u32>, usize, &LinterMessage)> = messages
        .iter()
        .enumerate()
        .filter_map(|(input_index, msg)| {
            let file = msg.file.as_deref()?;
            let file_index = *order.get(file)?;
            Some((file_index, msg.line, input_index, msg))
        })
        .collect();
    keyed.sort_by_key(|(file_index, line, input_index, _)| (*file_index, *line, *input_index));

    keyed
        .into_iter()
        .filter_map(|(_, _, _, msg)| {
            msg.file.as_ref().map(|path| MessageRef {
                path: path.clone(),
                uid: msg.uid.clone(),
            })
        })
        .collect()
}
