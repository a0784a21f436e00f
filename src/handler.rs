use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::{error, warn};

use crate::app::App;
use crate::error::Result;
use crate::tree::RelativePosition;

/// What a navigation shortcut asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    RelativeFile(RelativePosition),
    ExpandAll,
    CollapseAll,
    RelativeDiff(RelativePosition),
    RelativeMessage(RelativePosition),
}

/// Map a key press to a navigation intent. Only plain presses count: any
/// held modifier (Shift, Ctrl, Alt, Meta...) yields `None`.
pub fn route_key(key: &KeyEvent) -> Option<Intent> {
    if !key.modifiers.is_empty() {
        return None;
    }
    let intent = match key.code {
        KeyCode::Char('k') => Intent::RelativeFile(RelativePosition::Previous),
        KeyCode::Char('j') => Intent::RelativeFile(RelativePosition::Next),
        // 'e' kept alongside 'o' for reviewers used to the older tool.
        KeyCode::Char('o') | KeyCode::Char('e') => Intent::ExpandAll,
        KeyCode::Char('c') => Intent::CollapseAll,
        KeyCode::Char('n') => Intent::RelativeDiff(RelativePosition::Next),
        KeyCode::Char('p') => Intent::RelativeDiff(RelativePosition::Previous),
        KeyCode::Char('z') => Intent::RelativeMessage(RelativePosition::Next),
        KeyCode::Char('a') => Intent::RelativeMessage(RelativePosition::Previous),
        _ => return None,
    };
    Some(intent)
}

/// Carry out an intent against the loaded version.
pub fn apply_intent(app: &mut App, intent: Intent) -> Result<()> {
    match intent {
        Intent::RelativeFile(position) => app.go_to_relative_file(position).map(|_| ()),
        Intent::ExpandAll => app.expand_all(),
        Intent::CollapseAll => app.collapse_all(),
        Intent::RelativeDiff(position) => app.go_to_relative_diff(position).map(|_| ()),
        Intent::RelativeMessage(position) => app.go_to_relative_message(position).map(|_| ()),
    }
}

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => return app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return app.quit(),
        KeyCode::F(5) => return app.reload(),
        KeyCode::Up => return app.cursor_up(),
        KeyCode::Down => return app.cursor_down(),
        _ => {}
    }

    if !app.has_version() {
        warn!("Ignoring keyboard events while no path list is loaded");
        return;
    }

    let result = if key.code == KeyCode::Enter {
        app.activate_cursor()
    } else {
        match route_key(&key) {
            Some(intent) => apply_intent(app, intent),
            None => Ok(()),
        }
    };

    if let Err(e) = result {
        error!("key {:?} failed: {}", key.code, e);
        app.set_error_message(e.to_string());
    }
}

/// Handle a mouse event: the wheel moves the row cursor, a left click on a
/// tree row moves the cursor there and activates it.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.cursor_up(),
        MouseEventKind::ScrollDown => app.cursor_down(),
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(index) = app.row_at(mouse.column, mouse.row) else {
                return;
            };
            app.cursor = index;
            if let Err(e) = app.activate_cursor() {
                error!("click on row {} failed: {}", index, e);
                app.set_error_message(e.to_string());
            }
        }
        _ => {}
    }
}
