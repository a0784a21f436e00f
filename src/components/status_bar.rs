use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// One-line status bar: version and current file, or a transient message.
pub struct StatusBarWidget<'a> {
    version_label: &'a str,
    position: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(version_label: &'a str, position: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            version_label,
            position,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

/// Truncate to at most `width` characters.
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;
        let bar_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);

        if let Some(msg) = self.status_message {
            let display = format!("{:<width$}", fit(msg, width), width = width);
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_bg)
            } else {
                bar_style.fg(self.theme.warning_fg)
            };
            buf.set_line(area.x, area.y, &Line::from(Span::styled(display, style)), area.width);
            return;
        }

        let hints = " q:quit  F5:reload ";
        let label = format!(" {} ", self.version_label);
        let remaining = width
            .saturating_sub(hints.chars().count())
            .saturating_sub(label.chars().count());
        let position = fit(self.position, remaining);
        let pad = remaining.saturating_sub(position.chars().count());

        let line = Line::from(vec![
            Span::styled(
                fit(&label, width),
                bar_style
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(position, bar_style.fg(self.theme.info_fg)),
            Span::styled(" ".repeat(pad), bar_style),
            Span::styled(hints, bar_style.fg(self.theme.dim_fg)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
