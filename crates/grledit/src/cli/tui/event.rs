//! Terminal event source for the editor loop.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Bracketed paste, delivered as one insertion
    Paste(String),
    /// Nothing happened within the tick interval
    Tick,
    Resize(u16, u16),
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Next event, or `Tick` after `tick_rate` of silence.
    pub async fn next(&self) -> Event {
        let tick_rate = self.tick_rate;

        // crossterm polling blocks; keep it off the async workers
        tokio::task::spawn_blocking(move || {
            if !event::poll(tick_rate).unwrap_or(false) {
                return Event::Tick;
            }
            match event::read() {
                Ok(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => Event::Key(key),
                Ok(CrosstermEvent::Paste(text)) => Event::Paste(text),
                Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                _ => Event::Tick,
            }
        })
        .await
        .unwrap_or(Event::Tick)
    }
}
