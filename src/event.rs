use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::error::Result;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// A mouse event, only delivered when mouse capture is enabled.
    Mouse(MouseEvent),
    /// A periodic tick for rendering and status expiry.
    Tick,
    /// Terminal resize event; the next draw picks up the new size.
    Resize,
}

/// Async event handler that polls crossterm events and forwards them via a channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new EventHandler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                        Ok(CrosstermEvent::Mouse(mouse)) => Event::Mouse(mouse),
                        Ok(CrosstermEvent::Resize(_, _)) => Event::Resize,
                        _ => continue,
                    }
                } else {
                    Event::Tick
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event (blocks until available).
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| crate::error::AppError::Terminal("Event channel closed".into()))
    }
}
