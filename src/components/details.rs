use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::{LoadedVersion, Selection};
use crate::theme::ThemeColors;

/// Details of the current file: its diff hunks and linter messages, with the
/// current hunk and message marked.
pub struct DetailsWidget<'a> {
    version: Option<&'a LoadedVersion>,
    selection: &'a Selection,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> DetailsWidget<'a> {
    pub fn new(
        version: Option<&'a LoadedVersion>,
        selection: &'a Selection,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            version,
            selection,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn placeholder(&self, text: &'static str) -> Vec<Line<'a>> {
        vec![Line::from(Span::styled(
            text,
            Style::default().fg(self.theme.dim_fg),
        ))]
    }

    fn heading(&self, text: String) -> Line<'a> {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn item(&self, text: String, is_current: bool) -> Line<'a> {
        let style = if is_current {
            Style::default()
                .fg(self.theme.tree_current_fg)
                .bg(self.theme.tree_current_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.tree_file_fg)
        };
        let marker = if is_current { "▶ " } else { "  " };
        Line::from(Span::styled(format!("{}{}", marker, text), style))
    }

    fn build_lines(&self) -> Vec<Line<'a>> {
        let Some(version) = self.version else {
            return self.placeholder("Loading...");
        };
        let Some(path) = self.selection.path.as_deref() else {
            return self.placeholder("No file selected (press j)");
        };

        let mut lines = vec![
            Line::from(Span::styled(
                path.to_string(),
                Style::default()
                    .fg(self.theme.info_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        match &version.hunks {
            None => lines.push(self.heading("Changes: no diff loaded".to_string())),
            Some(_) => {
                let hunks = version.hunks_for(path);
                lines.push(self.heading(format!("Changes ({})", hunks.len())));
                for hunk in hunks {
                    let is_current = self.selection.hunk.as_ref() == Some(hunk);
                    lines.push(self.item(hunk.anchor.clone(), is_current));
                }
            }
        }
        lines.push(Line::from(""));

        match &version.messages {
            None => lines.push(self.heading("Messages: none loaded".to_string())),
            Some(_) => {
                let messages = version.messages_for(path);
                lines.push(self.heading(format!("Messages ({})", messages.len())));
                for msg in messages {
                    let is_current = self
                        .selection
                        .message
                        .as_ref()
                        .is_some_and(|current| current.uid == msg.uid);
                    let location = msg
                        .line
                        .map(|line| format!("L{} ", line))
                        .unwrap_or_default();
                    lines.push(self.item(
                        format!("{}[{}] {}", location, msg.severity, msg.message),
                        is_current,
                    ));
                }
            }
        }

        lines
    }
}

impl<'a> Widget for DetailsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        for (i, line) in self
            .build_lines()
            .iter()
            .take(inner.height as usize)
            .enumerate()
        {
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}
