//! Keystroke input handling using crossterm
//!
//! Features:
//! - Blocking wait for one of a set of keys, timestamped on arrival
//! - Discarding key presses queued before a stimulus appears
//! - Ctrl+C treated as the quit key (raw mode swallows SIGINT)

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result as IoResult;
use std::time::{Duration, Instant};

/// Handles user input from terminal
pub struct InputHandler {
    /// Granularity of the drain loop (zero = only what is already queued)
    drain_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        InputHandler {
            drain_timeout: Duration::ZERO,
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Block until a key press arrives (release/repeat events skipped)
    pub fn read_key(&self) -> IoResult<(KeyEvent, Instant)> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                let at = Instant::now();
                if key_event.kind == KeyEventKind::Press {
                    return Ok((key_event, at));
                }
            }
        }
    }

    /// Drop every event already queued
    pub fn clear_pending(&self) -> IoResult<()> {
        while event::poll(self.drain_timeout)? {
            event::read()?;
        }
        Ok(())
    }

    /// Block until one of `keys` (or Ctrl+C) is pressed.
    ///
    /// Ctrl+C is reported as `quit`.
    pub fn wait_for(&self, keys: &[char], quit: char) -> IoResult<(char, Instant)> {
        loop {
            let (key, at) = self.read_key()?;
            if Self::is_exit(&key) {
                return Ok((quit, at));
            }
            if let Some(c) = Self::key_to_char(&key) {
                let c = c.to_ascii_lowercase();
                if keys.contains(&c) {
                    return Ok((c, at));
                }
            }
        }
    }

    /// Check if key event is Ctrl+C
    pub fn is_exit(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL))
    }

    /// Check if key is Escape
    pub fn is_cancel(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Esc)
    }

    /// Convert key event to character
    pub fn key_to_char(key: &KeyEvent) -> Option<char> {
        match key.code {
            // space arrives as KeyCode::Char(' ')
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    Some(c)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Check if key is backspace
    pub fn is_backspace(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Backspace)
    }

    /// Check if key is enter/return
    pub fn is_enter(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_classification() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);

        assert!(InputHandler::is_exit(&ctrl_c));
        assert!(!InputHandler::is_exit(&plain_c));
        assert_eq!(InputHandler::key_to_char(&ctrl_c), None);
        assert_eq!(InputHandler::key_to_char(&space), Some(' '));
        assert!(InputHandler::is_cancel(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(InputHandler::is_enter(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
