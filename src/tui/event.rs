//! Event handling for TUI.
//!
//! Polls the terminal on the UI thread: the wait between refresh cycles is a
//! bounded `poll`, so keys are handled as soon as they arrive.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Poll timeout: time to check the refresh deadline.
    Tick,
    /// Keyboard input (key presses only).
    Key(KeyEvent),
    /// Terminal resized or otherwise needs a redraw.
    Redraw,
}

pub struct EventHandler;

impl EventHandler {
    /// Waits up to `timeout` for a terminal event.
    pub fn next(&self, timeout: Duration) -> io::Result<Event> {
        if !event::poll(timeout)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            _ => Event::Redraw,
        })
    }
}
