use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::theme::ThemeColors;

/// Data a shortcut depends on being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requires {
    Nothing,
    Diff,
    Messages,
}

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
    requires: Requires,
}

const SHORTCUTS: &[KeyEntry] = &[
    KeyEntry {
        key: "k",
        description: "Up file",
        requires: Requires::Nothing,
    },
    KeyEntry {
        key: "j",
        description: "Down file",
        requires: Requires::Nothing,
    },
    KeyEntry {
        key: "p",
        description: "Previous change",
        requires: Requires::Diff,
    },
    KeyEntry {
        key: "n",
        description: "Next change",
        requires: Requires::Diff,
    },
    KeyEntry {
        key: "a",
        description: "Previous message",
        requires: Requires::Messages,
    },
    KeyEntry {
        key: "z",
        description: "Next message",
        requires: Requires::Messages,
    },
    KeyEntry {
        key: "o",
        description: "Open all folders",
        requires: Requires::Nothing,
    },
    KeyEntry {
        key: "c",
        description: "Close all folders",
        requires: Requires::Nothing,
    },
    KeyEntry {
        key: "Enter",
        description: "Toggle folder / open file",
        requires: Requires::Nothing,
    },
];

/// Panel listing the navigation shortcuts. Shortcuts whose data is not
/// loaded are dimmed.
pub struct ShortcutsPanel<'a> {
    theme: &'a ThemeColors,
    has_diff: bool,
    has_messages: bool,
}

impl<'a> ShortcutsPanel<'a> {
    pub fn new(theme: &'a ThemeColors, has_diff: bool, has_messages: bool) -> Self {
        Self {
            theme,
            has_diff,
            has_messages,
        }
    }

    fn is_enabled(&self, entry: &KeyEntry) -> bool {
        match entry.requires {
            Requires::Nothing => true,
            Requires::Diff => self.has_diff,
            Requires::Messages => self.has_messages,
        }
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        SHORTCUTS
            .iter()
            .map(|entry| {
                let (key_style, desc_style) = if self.is_enabled(entry) {
                    (
                        Style::default()
                            .fg(self.theme.warning_fg)
                            .add_modifier(Modifier::BOLD),
                        Style::default().fg(self.theme.tree_file_fg),
                    )
                } else {
                    let dim = Style::default()
                        .fg(self.theme.dim_fg)
                        .add_modifier(Modifier::DIM);
                    (dim, dim)
                };
                Line::from(vec![
                    Span::styled(format!(" {:<7}", entry.key), key_style),
                    Span::styled(entry.description, desc_style),
                ])
            })
            .collect()
    }

    /// Rows needed to show every shortcut inside the border.
    pub fn height() -> u16 {
        SHORTCUTS.len() as u16 + 2
    }
}

impl<'a> Widget for ShortcutsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Shortcuts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_fg));
        let inner = block.inner(area);
        block.render(area, buf);

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    #[test]
    fn every_routed_key_is_listed() {
        for key in ["k", "j", "p", "n", "a", "z", "o", "c"] {
            assert!(SHORTCUTS.iter().any(|e| e.key == key), "missing {}", key);
        }
    }

    #[test]
    fn diff_keys_dimmed_without_diff() {
        let theme = theme::dark_theme();
        let panel = ShortcutsPanel::new(&theme, false, true);
        let lines = panel.build_lines();
        let next_change = SHORTCUTS.iter().position(|e| e.key == "n").unwrap();
        assert_eq!(lines[next_change].spans[0].style.fg, Some(theme.dim_fg));
        let next_message = SHORTCUTS.iter().position(|e| e.key == "z").unwrap();
        assert_eq!(lines[next_message].spans[0].style.fg, Some(theme.warning_fg));
    }

    #[test]
    fn renders_inside_border() {
        let theme = theme::dark_theme();
        let area = Rect::new(0, 0, 40, ShortcutsPanel::height());
        let mut buf = Buffer::empty(area);
        ShortcutsPanel::new(&theme, true, true).render(area, &mut buf);
        let first: String = (0..40)
            .map(|x| buf.cell((x, 1)).unwrap().symbol().to_string())
            .collect();
        assert!(first.contains("Up file"));
    }
}
