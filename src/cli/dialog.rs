//! Startup dialog collecting participant ID and name
//!
//! Runs before the experiment screen opens. Esc (or Ctrl+C) on any field
//! cancels the whole run.

use super::input::InputHandler;
use crate::datalog::ParticipantInfo;
use crate::error::ExperimentResult;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, terminal};
use std::io::{stdout, Write};

/// Keeps raw mode on for the lifetime of the guard
struct RawMode;

impl RawMode {
    fn enable() -> ExperimentResult<Self> {
        InputHandler::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = InputHandler::disable_raw_mode();
    }
}

/// Outcome of editing one field
#[derive(Debug, PartialEq)]
enum FieldInput {
    Submitted(String),
    Cancelled,
}

pub struct StartupDialog {
    title: String,
    input: InputHandler,
}

impl StartupDialog {
    pub fn new(title: impl Into<String>) -> Self {
        StartupDialog {
            title: title.into(),
            input: InputHandler::new(),
        }
    }

    /// Ask for ID (pre-filled) and name. `None` when cancelled.
    pub fn ask(&self, default_id: &str) -> ExperimentResult<Option<ParticipantInfo>> {
        let _raw = RawMode::enable()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print(&self.title),
            ResetColor,
            Print("\r\n"),
            SetForegroundColor(Color::DarkGrey),
            Print("Enter to confirm  |  Esc to cancel\r\n\r\n"),
            ResetColor
        )?;

        let id = match self.read_field("ID: ", default_id)? {
            FieldInput::Submitted(id) => id,
            FieldInput::Cancelled => return Ok(None),
        };
        let name = match self.read_field("Name: ", "")? {
            FieldInput::Submitted(name) => name,
            FieldInput::Cancelled => return Ok(None),
        };

        Ok(Some(ParticipantInfo::new(id, name)))
    }

    fn read_field(&self, label: &str, default: &str) -> ExperimentResult<FieldInput> {
        let mut out = stdout();
        let mut value = default.to_string();
        execute!(out, Print(label), Print(&value))?;

        loop {
            let (key, _) = self.input.read_key()?;

            if InputHandler::is_cancel(&key) || InputHandler::is_exit(&key) {
                execute!(out, Print("\r\n"))?;
                return Ok(FieldInput::Cancelled);
            }

            if InputHandler::is_enter(&key) {
                execute!(out, Print("\r\n"))?;
                return Ok(FieldInput::Submitted(value));
            }

            if InputHandler::is_backspace(&key) {
                if value.pop().is_some() {
                    execute!(
                        out,
                        cursor::MoveToColumn(0),
                        terminal::Clear(terminal::ClearType::CurrentLine),
                        Print(label),
                        Print(&value)
                    )?;
                }
                continue;
            }

            if let Some(c) = InputHandler::key_to_char(&key) {
                value.push(c);
                execute!(out, Print(c))?;
            }
            out.flush()?;
        }
    }
}
