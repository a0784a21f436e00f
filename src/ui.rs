use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::details::DetailsWidget;
use crate::components::shortcuts::ShortcutsPanel;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;
use crate::theme::ThemeColors;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame, theme: &ThemeColors, use_icons: bool) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer[0]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(ShortcutsPanel::height()),
        ])
        .split(main[1]);

    // account for border
    app.update_scroll(main[0].height.saturating_sub(2) as usize);

    let title = match &app.version {
        Some(version) => format!(" {} ", version.name),
        None => " Loading ".to_string(),
    };
    let tree_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused_fg))
        .style(Style::default().fg(theme.tree_fg));
    app.tree_area = tree_block.inner(main[0]);
    let tree = TreeWidget::new(&app.rows, theme, use_icons)
        .cursor(app.cursor, app.scroll_offset)
        .current_path(app.selection.path.as_deref())
        .block(tree_block);
    frame.render_widget(tree, main[0]);

    let details_block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));
    let details =
        DetailsWidget::new(app.version.as_ref(), &app.selection, theme).block(details_block);
    frame.render_widget(details, side[0]);

    frame.render_widget(
        ShortcutsPanel::new(theme, app.has_diff(), app.has_messages()),
        side[1],
    );

    let version_label = app
        .version
        .as_ref()
        .map(|v| format!("{} #{}", v.name, v.id))
        .unwrap_or_default();
    let position = app.selection.path.clone().unwrap_or_default();
    let mut status = StatusBarWidget::new(&version_label, &position, theme);
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg, app.status_is_error);
    }
    frame.render_widget(status, outer[1]);
}
