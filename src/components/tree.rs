use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::theme::ThemeColors;
use crate::tree::{RowKind, TreeRow};

/// Tree widget that renders the visible rows with box-drawing characters.
pub struct TreeWidget<'a> {
    rows: &'a [TreeRow],
    cursor: usize,
    scroll_offset: usize,
    current_path: Option<&'a str>,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(rows: &'a [TreeRow], theme: &'a ThemeColors, use_icons: bool) -> Self {
        Self {
            rows,
            cursor: 0,
            scroll_offset: 0,
            current_path: None,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn cursor(mut self, cursor: usize, scroll_offset: usize) -> Self {
        self.cursor = cursor;
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn current_path(mut self, path: Option<&'a str>) -> Self {
        self.current_path = path;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Indentation prefix for a row. Each ancestor level draws a continuation
    /// line unless that ancestor was the last of its siblings.
    fn build_prefix(row: &TreeRow, rows: &[TreeRow], row_index: usize) -> String {
        if row.depth == 0 {
            return String::new();
        }

        let mut prefix = String::new();
        for d in 1..row.depth {
            let ancestor_is_last = rows[..row_index]
                .iter()
                .rev()
                .take_while(|r| r.depth >= d)
                .find(|r| r.depth == d)
                .is_some_and(|r| r.is_last_sibling);
            prefix.push_str(if ancestor_is_last { "   " } else { "│  " });
        }
        prefix.push_str(if row.is_last_sibling { "└──" } else { "├──" });
        prefix
    }

    fn indicator(&self, row: &TreeRow) -> &'static str {
        match (&row.kind, self.use_icons) {
            (RowKind::Directory { expanded: true }, true) => "\u{f07c} ",
            (RowKind::Directory { expanded: false }, true) => "\u{f07b} ",
            (RowKind::File, true) => Self::file_icon_by_ext(&row.name),
            (RowKind::Directory { expanded: true }, false) => "[-] ",
            (RowKind::Directory { expanded: false }, false) => "[+] ",
            (RowKind::File, false) => "    ",
            (RowKind::EmptyDirectory, _) => "",
        }
    }

    /// Nerd Font icon for the file types a package usually ships.
    fn file_icon_by_ext(name: &str) -> &'static str {
        let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
        match ext.as_str() {
            "js" | "jsx" | "mjs" => "\u{e74e} ",
            "ts" | "tsx" => "\u{e628} ",
            "json" => "\u{e60b} ",
            "html" | "htm" => "\u{e736} ",
            "css" | "scss" => "\u{e749} ",
            "md" | "txt" => "\u{f48a} ",
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "ico" | "webp" => "\u{f1c5} ",
            "wasm" => "\u{e6a1} ",
            _ => "\u{f15b} ",
        }
    }

    fn row_style(&self, row: &TreeRow, index: usize) -> Style {
        let base = match row.kind {
            RowKind::Directory { .. } => Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD),
            RowKind::File => Style::default().fg(self.theme.tree_file_fg),
            RowKind::EmptyDirectory => Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::ITALIC),
        };

        if self.current_path == Some(row.id.as_str()) {
            base.bg(self.theme.tree_current_bg)
                .fg(self.theme.tree_current_fg)
                .add_modifier(Modifier::BOLD)
        } else if index == self.cursor {
            base.bg(self.theme.tree_cursor_bg)
        } else {
            base
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        let visible_height = inner_area.height as usize;
        if self.rows.is_empty() || visible_height == 0 {
            return;
        }

        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);

        for (line_index, (index, row)) in visible.enumerate() {
            let y = inner_area.y + line_index as u16;
            let marker = if index == self.cursor { ">" } else { " " };
            let content = format!(
                "{}{}{}{}",
                marker,
                Self::build_prefix(row, self.rows, index),
                self.indicator(row),
                row.name
            );
            let line = Line::from(Span::styled(content, self.row_style(row, index)));
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}
