use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{AppError, Result};

/// Terminal wrapper owning raw mode and the alternate screen for the
/// lifetime of the browser.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    mouse_enabled: bool,
}

impl Tui {
    /// Enter the alternate screen in raw mode, optionally capturing the mouse.
    pub fn new(enable_mouse: bool) -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()
            .map_err(|e| AppError::Terminal(format!("failed to enter raw mode: {}", e)))?;
        execute!(stdout, EnterAlternateScreen)?;
        if enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            mouse_enabled: enable_mouse,
        })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        if self.mouse_enabled {
            execute!(self.terminal.backend_mut(), DisableMouseCapture)?;
        }
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

/// Install a panic hook that restores the terminal before printing panic info.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
