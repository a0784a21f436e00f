use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ratatui::layout::Rect;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::tree::{
    ancestor_ids, build_file_tree, diff_sequence, directory_ids, message_sequence, path_list,
    relative_item, relative_item_from_path, root_path, visible_rows, DirectoryNode,
    ExpandedPaths, HunkAnchor, MessageRef, RelativePosition, RowKind, TreeRow,
};
use crate::version::{LinterMessage, Version};

/// A version whose tree and derived sequences have been fully built.
#[derive(Debug, Clone)]
pub struct LoadedVersion {
    pub id: u64,
    pub name: String,
    pub tree: DirectoryNode,
    pub path_list: Vec<String>,
    pub directory_ids: Vec<String>,
    /// `None` when no diff was loaded.
    pub hunks: Option<Vec<HunkAnchor>>,
    /// `None` when no linter data was loaded.
    pub messages: Option<Vec<MessageRef>>,
    message_details: HashMap<String, LinterMessage>,
}

impl LoadedVersion {
    /// Build the tree and every derived sequence. Nothing is returned unless
    /// the whole tree was built.
    pub fn build(version: Version) -> Result<Self> {
        let tree = build_file_tree(&root_path(&version.name), &version.name, &version.entries)?;
        let path_list = path_list(&tree);
        let directory_ids = directory_ids(&tree);
        let hunks = version
            .diff
            .as_ref()
            .map(|diff| diff_sequence(&path_list, diff));
        let messages = version
            .messages
            .as_ref()
            .map(|messages| message_sequence(&path_list, messages));
        let message_details = version
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|msg| (msg.uid.clone(), msg))
            .collect();

        Ok(Self {
            id: version.id,
            name: version.name,
            tree,
            path_list,
            directory_ids,
            hunks,
            messages,
            message_details,
        })
    }

    /// Hunks of one file, in navigation order.
    pub fn hunks_for(&self, path: &str) -> Vec<&HunkAnchor> {
        self.hunks
            .iter()
            .flatten()
            .filter(|hunk| hunk.path == path)
            .collect()
    }

    /// Linter messages of one file, in navigation order.
    pub fn messages_for(&self, path: &str) -> Vec<&LinterMessage> {
        self.messages
            .iter()
            .flatten()
            .filter(|msg| msg.path == path)
            .filter_map(|msg| self.message_details.get(&msg.uid))
            .collect()
    }
}

/// Current position within the loaded version.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: Option<String>,
    pub hunk: Option<HunkAnchor>,
    pub message: Option<MessageRef>,
}

/// Main application state.
pub struct App {
    pub version: Option<LoadedVersion>,
    pub expanded: ExpandedPaths,
    pub selection: Selection,
    /// Visible rows of the tree panel.
    pub rows: Vec<TreeRow>,
    /// Index into `rows` of the row cursor.
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Inner area of the tree panel from the last draw, for mouse hits.
    pub tree_area: Rect,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,
    pub status_is_error: bool,
    /// File the loaded version was read from, for reloads.
    pub source: Option<PathBuf>,
    start_expanded: bool,
    reveal_current: bool,
}

impl App {
    /// Create an App with no version loaded.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            version: None,
            expanded: ExpandedPaths::new(),
            selection: Selection::default(),
            rows: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            tree_area: Rect::default(),
            should_quit: false,
            status_message: None,
            status_is_error: false,
            source: None,
            start_expanded: config.start_expanded(),
            reveal_current: config.reveal_current(),
        }
    }

    /// Replace the loaded version with `version`.
    ///
    /// Reloading the same version id keeps the expansion set and whatever part
    /// of the selection still exists; a different id starts over. On error the
    /// previously loaded version is left untouched.
    pub fn load_version(&mut self, version: Version) -> Result<()> {
        let loaded = LoadedVersion::build(version)?;
        let same_version = self.version.as_ref().map(|v| v.id) == Some(loaded.id);

        if same_version {
            self.retain_selection(&loaded);
        } else {
            self.selection = Selection::default();
            self.expanded = if self.start_expanded {
                ExpandedPaths::new().expand_all(loaded.directory_ids.iter().cloned())
            } else {
                ExpandedPaths::new().toggle(&loaded.tree.id)
            };
            self.cursor = 0;
            self.scroll_offset = 0;
        }

        info!(
            version = loaded.id,
            files = loaded.path_list.len(),
            directories = loaded.directory_ids.len(),
            "loaded version {}",
            loaded.name
        );
        self.version = Some(loaded);
        self.refresh_rows();
        Ok(())
    }

    fn retain_selection(&mut self, loaded: &LoadedVersion) {
        let path_gone = self
            .selection
            .path
            .as_ref()
            .is_some_and(|path| !loaded.path_list.contains(path));
        if path_gone {
            self.selection = Selection::default();
            return;
        }
        let hunk_gone = self.selection.hunk.as_ref().is_some_and(|hunk| {
            !loaded
                .hunks
                .as_ref()
                .is_some_and(|hunks| hunks.contains(hunk))
        });
        if hunk_gone {
            self.selection.hunk = None;
        }
        let message_gone = self.selection.message.as_ref().is_some_and(|msg| {
            !loaded
                .messages
                .as_ref()
                .is_some_and(|messages| messages.contains(msg))
        });
        if message_gone {
            self.selection.message = None;
        }
    }

    /// Read a version file and load it.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        let version = Version::load(path)?;
        self.load_version(version)?;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Re-read the version file the current version came from.
    pub fn reload(&mut self) {
        let Some(source) = self.source.clone() else {
            self.set_status_message("Nothing to reload".to_string());
            return;
        };
        match self.load_from_file(&source) {
            Ok(()) => self.set_status_message(format!("Reloaded {}", source.display())),
            Err(e) => {
                error!("reload of {} failed: {}", source.display(), e);
                self.set_error_message(format!("Reload failed: {}", e));
            }
        }
    }

    fn loaded(&self) -> Result<&LoadedVersion> {
        self.version.as_ref().ok_or(AppError::NoVersionLoaded)
    }

    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }

    pub fn has_diff(&self) -> bool {
        self.version.as_ref().is_some_and(|v| v.hunks.is_some())
    }

    pub fn has_messages(&self) -> bool {
        self.version.as_ref().is_some_and(|v| v.messages.is_some())
    }

    // ── Expansion ───────────────────────────────────────────────────────────

    pub fn is_node_expanded(&self, id: &str) -> Result<bool> {
        self.loaded()?;
        Ok(self.expanded.is_expanded(id))
    }

    pub fn toggle_expanded(&mut self, id: &str) -> Result<()> {
        self.loaded()?;
        self.expanded = std::mem::take(&mut self.expanded).toggle(id);
        self.refresh_rows();
        Ok(())
    }

    pub fn expand_all(&mut self) -> Result<()> {
        let ids = self.loaded()?.directory_ids.clone();
        self.expanded = std::mem::take(&mut self.expanded).expand_all(ids);
        self.refresh_rows();
        Ok(())
    }

    pub fn collapse_all(&mut self) -> Result<()> {
        self.loaded()?;
        self.expanded = std::mem::take(&mut self.expanded).collapse_all();
        self.refresh_rows();
        Ok(())
    }

    // ── Relative navigation ─────────────────────────────────────────────────

    /// Move to the previous/next file. Returns whether the selection moved.
    pub fn go_to_relative_file(&mut self, position: RelativePosition) -> Result<bool> {
        let version = self.loaded()?;
        let target =
            relative_item(&version.path_list, self.selection.path.as_ref(), position).cloned();
        match target {
            Some(path) => {
                self.selection.hunk = None;
                self.selection.message = None;
                self.focus_file(path);
                Ok(true)
            }
            None => {
                self.at_boundary(format!("No {} file", position.label()));
                Ok(false)
            }
        }
    }

    /// Move to the previous/next diff hunk, across files. With no hunk
    /// selected the search starts at the current file. A missing diff is a
    /// warning and a no-op.
    pub fn go_to_relative_diff(&mut self, position: RelativePosition) -> Result<bool> {
        let version = self.loaded()?;
        let Some(hunks) = version.hunks.as_ref() else {
            self.missing_data(format!(
                "Cannot navigate to {} change without diff loaded",
                position.label()
            ));
            return Ok(false);
        };
        let target = relative_item_from_path(
            hunks,
            self.selection.hunk.as_ref(),
            self.selection.path.as_deref(),
            &version.path_list,
            position,
        )
        .cloned();
        match target {
            Some(hunk) => {
                self.focus_file(hunk.path.clone());
                self.selection.hunk = Some(hunk);
                Ok(true)
            }
            None => {
                self.at_boundary(format!("No {} change", position.label()));
                Ok(false)
            }
        }
    }

    /// Move to the previous/next linter message, across files, starting at
    /// the current file when no message is selected. Missing linter data is
    /// a warning and a no-op.
    pub fn go_to_relative_message(&mut self, position: RelativePosition) -> Result<bool> {
        let version = self.loaded()?;
        let Some(messages) = version.messages.as_ref() else {
            self.missing_data(format!(
                "Cannot navigate to {} message without linter messages loaded",
                position.label()
            ));
            return Ok(false);
        };
        let target = relative_item_from_path(
            messages,
            self.selection.message.as_ref(),
            self.selection.path.as_deref(),
            &version.path_list,
            position,
        )
        .cloned();
        match target {
            Some(message) => {
                self.focus_file(message.path.clone());
                self.selection.message = Some(message);
                Ok(true)
            }
            None => {
                self.at_boundary(format!("No {} message", position.label()));
                Ok(false)
            }
        }
    }

    fn focus_file(&mut self, path: String) {
        if self.reveal_current {
            if let Some(version) = &self.version {
                let ids = std::iter::once(version.tree.id.clone()).chain(ancestor_ids(&path));
                self.expanded = std::mem::take(&mut self.expanded).expand(ids);
            }
        }
        self.selection.path = Some(path.clone());
        self.refresh_rows();
        self.move_cursor_to(&path);
    }

    fn at_boundary(&mut self, message: String) {
        debug!("{}", message);
        self.set_status_message(message);
    }

    fn missing_data(&mut self, message: String) {
        warn!("{}", message);
        self.set_status_message(message);
    }

    // ── Row cursor ──────────────────────────────────────────────────────────

    /// Recompute visible rows, keeping the cursor on the same row id when possible.
    fn refresh_rows(&mut self) {
        let cursor_id = self.rows.get(self.cursor).map(|row| row.id.clone());
        self.rows = match &self.version {
            Some(version) => visible_rows(&version.tree, &self.expanded),
            None => Vec::new(),
        };
        if let Some(id) = cursor_id {
            self.move_cursor_to(&id);
        }
        if !self.rows.is_empty() && self.cursor >= self.rows.len() {
            self.cursor = self.rows.len() - 1;
        }
        debug!(
            rows = self.rows.len(),
            expanded = self.expanded.len(),
            "refreshed visible rows"
        );
    }

    fn move_cursor_to(&mut self, id: &str) {
        if let Some(index) = self.rows.iter().position(|row| row.id == id) {
            self.cursor = index;
        }
    }

    pub fn cursor_down(&mut self) {
        if !self.rows.is_empty() && self.cursor < self.rows.len() - 1 {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggle the directory under the cursor, or select the file under it.
    pub fn activate_cursor(&mut self) -> Result<()> {
        let Some(row) = self.rows.get(self.cursor).cloned() else {
            return Ok(());
        };
        match row.kind {
            RowKind::Directory { .. } => self.toggle_expanded(&row.id),
            RowKind::File => {
                self.selection = Selection::default();
                self.focus_file(row.id);
                Ok(())
            }
            RowKind::EmptyDirectory => Ok(()),
        }
    }

    /// Row index under a terminal cell, if that cell shows a tree row.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.tree_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let index = self.scroll_offset + (row - area.y) as usize;
        (index < self.rows.len()).then_some(index)
    }

    /// Update the scroll offset to ensure the cursor row is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor - visible_height + 1;
        }
    }

    // ── Status line ─────────────────────────────────────────────────────────

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
        self.status_is_error = false;
    }

    /// Set a status message shown in the error style.
    pub fn set_error_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
        self.status_is_error = true;
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::config::TreeConfig;
    use crate::version::Entry;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::file("manifest.json"),
            Entry::directory("lib"),
            Entry::directory("lib/vendor"),
            Entry::file("lib/b.js"),
            Entry::file("lib/a.js"),
            Entry::file("lib/vendor/z.js"),
        ]
    }

    fn version(id: u64) -> Version {
        Version {
            id,
            name: "addon".into(),
            entries: entries(),
            diff: None,
            messages: None,
        }
    }

    fn message(uid: &str, file: &str, line: u32) -> LinterMessage {
        LinterMessage {
            uid: uid.into(),
            file: Some(file.into()),
            line: Some(line),
            message: format!("problem {}", uid),
            severity: "error".into(),
        }
    }

    fn version_with_data() -> Version {
        let mut diff = BTreeMap::new();
        diff.insert("lib/a.js".to_string(), vec!["D1".to_string(), "D2".to_string()]);
        diff.insert("manifest.json".to_string(), vec!["D3".to_string()]);
        Version {
            diff: Some(diff),
            messages: Some(vec![
                message("m2", "manifest.json", 1),
                message("m1", "lib/vendor/z.js", 4),
            ]),
            ..version(1)
        }
    }

    fn setup_app(version: Version) -> App {
        let mut app = App::new(&AppConfig::default());
        app.load_version(version).expect("valid version");
        app
    }

    fn row_ids(app: &App) -> Vec<&str> {
        app.rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn new_app_has_no_version() {
        let app = App::new(&AppConfig::default());
        assert!(!app.has_version());
        assert!(app.rows.is_empty());
    }

    #[test]
    fn operations_without_version_fail_loudly() {
        let mut app = App::new(&AppConfig::default());
        assert!(matches!(
            app.is_node_expanded("lib"),
            Err(AppError::NoVersionLoaded)
        ));
        assert!(matches!(
            app.toggle_expanded("lib"),
            Err(AppError::NoVersionLoaded)
        ));
        assert!(matches!(app.expand_all(), Err(AppError::NoVersionLoaded)));
        assert!(matches!(app.collapse_all(), Err(AppError::NoVersionLoaded)));
        assert!(matches!(
            app.go_to_relative_file(RelativePosition::Next),
            Err(AppError::NoVersionLoaded)
        ));
        assert!(matches!(
            app.go_to_relative_diff(RelativePosition::Next),
            Err(AppError::NoVersionLoaded)
        ));
        assert!(matches!(
            app.go_to_relative_message(RelativePosition::Next),
            Err(AppError::NoVersionLoaded)
        ));
    }

    #[test]
    fn load_expands_only_root() {
        let app = setup_app(version(1));
        assert!(app.is_node_expanded("root-addon").unwrap());
        assert!(!app.is_node_expanded("lib").unwrap());
        assert_eq!(row_ids(&app), vec!["root-addon", "lib", "manifest.json"]);
    }

    #[test]
    fn load_with_start_expanded_expands_everything() {
        let config = AppConfig {
            tree: TreeConfig {
                start_expanded: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut app = App::new(&config);
        app.load_version(version(1)).unwrap();
        assert!(app.is_node_expanded("lib/vendor").unwrap());
        assert_eq!(app.rows.len(), 7);
    }

    #[test]
    fn malformed_version_keeps_previous_one() {
        let mut app = setup_app(version(1));
        let broken = Version {
            id: 2,
            entries: vec![Entry::file("missing/a.js")],
            ..version(2)
        };
        let result = app.load_version(broken);
        assert!(matches!(result, Err(AppError::MalformedEntry { .. })));
        assert_eq!(app.version.as_ref().map(|v| v.id), Some(1));
    }

    #[test]
    fn loaded_version_path_list() {
        let app = setup_app(version(1));
        let version = app.version.as_ref().unwrap();
        assert_eq!(
            version.path_list,
            vec!["lib/vendor/z.js", "lib/a.js", "lib/b.js", "manifest.json"]
        );
    }

    #[test]
    fn expand_all_and_collapse_all() {
        let mut app = setup_app(version(1));
        app.expand_all().unwrap();
        let ids = app.version.as_ref().unwrap().directory_ids.clone();
        for id in &ids {
            assert!(app.is_node_expanded(id).unwrap());
        }
        app.collapse_all().unwrap();
        for id in &ids {
            assert!(!app.is_node_expanded(id).unwrap());
        }
        assert_eq!(row_ids(&app), vec!["root-addon"]);
    }

    #[test]
    fn toggle_expanded_flips_directory() {
        let mut app = setup_app(version(1));
        app.toggle_expanded("lib").unwrap();
        assert!(app.is_node_expanded("lib").unwrap());
        assert!(row_ids(&app).contains(&"lib/a.js"));
        app.toggle_expanded("lib").unwrap();
        assert!(!app.is_node_expanded("lib").unwrap());
    }

    #[test]
    fn next_file_without_selection_is_first() {
        let mut app = setup_app(version(1));
        assert!(app.go_to_relative_file(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.path.as_deref(), Some("lib/vendor/z.js"));
    }

    #[test]
    fn previous_file_without_selection_is_last() {
        let mut app = setup_app(version(1));
        assert!(app.go_to_relative_file(RelativePosition::Previous).unwrap());
        assert_eq!(app.selection.path.as_deref(), Some("manifest.json"));
    }

    #[test]
    fn file_navigation_steps_and_stops_at_end() {
        let mut app = setup_app(version(1));
        app.selection.path = Some("lib/b.js".into());
        assert!(app.go_to_relative_file(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.path.as_deref(), Some("manifest.json"));

        assert!(!app.go_to_relative_file(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.path.as_deref(), Some("manifest.json"));
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "No next file");
    }

    #[test]
    fn file_navigation_reveals_and_moves_cursor() {
        let mut app = setup_app(version(1));
        app.go_to_relative_file(RelativePosition::Next).unwrap();
        assert!(app.is_node_expanded("lib").unwrap());
        assert!(app.is_node_expanded("lib/vendor").unwrap());
        assert_eq!(app.rows[app.cursor].id, "lib/vendor/z.js");
    }

    #[test]
    fn file_navigation_clears_hunk_and_message() {
        let mut app = setup_app(version_with_data());
        app.go_to_relative_diff(RelativePosition::Next).unwrap();
        assert!(app.selection.hunk.is_some());
        app.go_to_relative_file(RelativePosition::Next).unwrap();
        assert!(app.selection.hunk.is_none());
        assert_eq!(app.selection.path.as_deref(), Some("lib/b.js"));
    }

    #[test]
    fn diff_navigation_without_diff_is_noop() {
        let mut app = setup_app(version(1));
        assert!(!app.go_to_relative_diff(RelativePosition::Next).unwrap());
        assert!(app.selection.path.is_none());
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Cannot navigate to next change without diff loaded");
    }

    #[test]
    fn diff_navigation_crosses_files_without_wrapping() {
        let mut app = setup_app(version_with_data());
        let mut visited = Vec::new();
        while app.go_to_relative_diff(RelativePosition::Next).unwrap() {
            let hunk = app.selection.hunk.clone().unwrap();
            assert_eq!(app.selection.path.as_ref(), Some(&hunk.path));
            visited.push(hunk.anchor);
        }
        assert_eq!(visited, vec!["D1", "D2", "D3"]);
        // Still on the last hunk after hitting the end.
        assert_eq!(app.selection.hunk.as_ref().unwrap().anchor, "D3");

        assert!(app.go_to_relative_diff(RelativePosition::Previous).unwrap());
        assert_eq!(app.selection.hunk.as_ref().unwrap().anchor, "D2");
    }

    #[test]
    fn message_navigation_follows_path_list() {
        let mut app = setup_app(version_with_data());
        assert!(app.go_to_relative_message(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.message.as_ref().unwrap().uid, "m1");
        assert_eq!(app.selection.path.as_deref(), Some("lib/vendor/z.js"));
        assert!(app.go_to_relative_message(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.message.as_ref().unwrap().uid, "m2");
        assert!(!app.go_to_relative_message(RelativePosition::Next).unwrap());
    }

    #[test]
    fn diff_navigation_starts_from_current_file() {
        let mut app = setup_app(version_with_data());
        app.go_to_relative_file(RelativePosition::Previous).unwrap();
        assert_eq!(app.selection.path.as_deref(), Some("manifest.json"));

        assert!(app.go_to_relative_diff(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.hunk.as_ref().unwrap().anchor, "D3");
        assert_eq!(app.selection.path.as_deref(), Some("manifest.json"));
    }

    #[test]
    fn diff_navigation_from_file_without_hunks() {
        let mut app = setup_app(version_with_data());
        app.selection.path = Some("lib/b.js".into());
        assert!(app.go_to_relative_diff(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.hunk.as_ref().unwrap().anchor, "D3");

        app.go_to_relative_file(RelativePosition::Previous).unwrap();
        assert_eq!(app.selection.path.as_deref(), Some("lib/b.js"));
        assert!(app.go_to_relative_diff(RelativePosition::Previous).unwrap());
        assert_eq!(app.selection.hunk.as_ref().unwrap().anchor, "D2");
    }

    #[test]
    fn message_navigation_starts_from_current_file() {
        let mut app = setup_app(version_with_data());
        app.selection.path = Some("lib/a.js".into());
        assert!(app.go_to_relative_message(RelativePosition::Next).unwrap());
        assert_eq!(app.selection.message.as_ref().unwrap().uid, "m2");

        app.selection = Selection {
            path: Some("lib/b.js".into()),
            ..Selection::default()
        };
        assert!(app.go_to_relative_message(RelativePosition::Previous).unwrap());
        assert_eq!(app.selection.message.as_ref().unwrap().uid, "m1");
        assert_eq!(app.selection.path.as_deref(), Some("lib/vendor/z.js"));
    }

    #[test]
    fn message_navigation_without_messages_is_noop() {
        let mut app = setup_app(version(1));
        assert!(!app.go_to_relative_message(RelativePosition::Previous).unwrap());
        assert!(app.selection.message.is_none());
    }

    #[test]
    fn details_for_current_file() {
        let app = setup_app(version_with_data());
        let version = app.version.as_ref().unwrap();
        let anchors: Vec<&str> = version
            .hunks_for("lib/a.js")
            .iter()
            .map(|h| h.anchor.as_str())
            .collect();
        assert_eq!(anchors, vec!["D1", "D2"]);
        let messages = version.messages_for("manifest.json");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "problem m2");
    }

    #[test]
    fn reload_same_version_keeps_expansion_and_selection() {
        let mut app = setup_app(version(1));
        app.toggle_expanded("lib").unwrap();
        app.selection.path = Some("lib/a.js".into());
        app.load_version(version(1)).unwrap();
        assert!(app.is_node_expanded("lib").unwrap());
        assert_eq!(app.selection.path.as_deref(), Some("lib/a.js"));
    }

    #[test]
    fn reload_drops_selection_that_no_longer_exists() {
        let mut app = setup_app(version(1));
        app.selection.path = Some("lib/a.js".into());
        let shrunk = Version {
            entries: vec![Entry::file("manifest.json")],
            ..version(1)
        };
        app.load_version(shrunk).unwrap();
        assert!(app.selection.path.is_none());
    }

    #[test]
    fn loading_other_version_resets_expansion() {
        let mut app = setup_app(version(1));
        app.expand_all().unwrap();
        app.selection.path = Some("lib/a.js".into());
        app.load_version(version(2)).unwrap();
        assert!(!app.is_node_expanded("lib").unwrap());
        assert!(app.selection.path.is_none());
    }

    #[test]
    fn cursor_moves_within_rows() {
        let mut app = setup_app(version(1));
        app.cursor_up();
        assert_eq!(app.cursor, 0);
        app.cursor_down();
        app.cursor_down();
        app.cursor_down();
        assert_eq!(app.cursor, app.rows.len() - 1);
    }

    #[test]
    fn activate_cursor_toggles_directory_and_selects_file() {
        let mut app = setup_app(version(1));
        app.cursor_down(); // lib
        app.activate_cursor().unwrap();
        assert!(app.is_node_expanded("lib").unwrap());
        assert_eq!(app.rows[app.cursor].id, "lib");

        app.cursor = app.rows.iter().position(|r| r.id == "lib/b.js").unwrap();
        app.activate_cursor().unwrap();
        assert_eq!(app.selection.path.as_deref(), Some("lib/b.js"));
    }

    #[test]
    fn load_from_file_remembers_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("version.json");
        std::fs::write(
            &path,
            r#"{"id": 3, "name": "addon", "entries": [
                {"path": "a.js", "depth": 0, "filename": "a.js", "kind": "file"}
            ]}"#,
        )
        .expect("write");

        let mut app = App::new(&AppConfig::default());
        app.load_from_file(&path).unwrap();
        assert_eq!(app.source.as_deref(), Some(path.as_path()));
        app.reload();
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.starts_with("Reloaded"));
    }

    #[test]
    fn reload_failure_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("version.json");
        std::fs::write(&path, r#"{"id": 3, "name": "addon", "entries": []}"#).expect("write");
        let mut app = App::new(&AppConfig::default());
        app.load_from_file(&path).unwrap();

        std::fs::write(&path, "not json").expect("write");
        app.reload();
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.starts_with("Reload failed"));
        assert!(app.status_is_error);
        assert!(app.has_version());
    }

    #[test]
    fn update_scroll_follows_cursor() {
        let mut app = setup_app(version(1));
        app.expand_all().unwrap();
        app.cursor = 5;
        app.update_scroll(3);
        assert_eq!(app.scroll_offset, 3);
        app.cursor = 1;
        app.update_scroll(3);
        assert_eq!(app.scroll_offset, 1);
    }

    #[test]
    fn clear_expired_status_removes_old() {
        let mut app = App::new(&AppConfig::default());
        app.status_message = Some((
            "old".to_string(),
            Instant::now() - std::time::Duration::from_secs(5),
        ));
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = App::new(&AppConfig::default());
        app.quit();
        assert!(app.should_quit);
    }
}
