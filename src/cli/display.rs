//! Terminal presenter
//!
//! Features:
//! - Alternate-screen canvas, cleared before every screen
//! - Fixation cross, colored face stimulus with distractor word beneath
//! - Centered multi-line instruction text (CJK aware)
//! - Session clock for onset and key press timestamps

use super::input::InputHandler;
use crate::error::{ExperimentError, ExperimentResult};
use crate::experiment::condition::{stimulus_key, Color, Condition, Emotion};
use crate::experiment::instructions;
use crate::experiment::presenter::{KeyPress, Presenter};
use crossterm::style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, queue};
use rustc_hash::FxHashMap;
use std::io::{stdout, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Rows of the colored stimulus block
const STIMULUS_HEIGHT: u16 = 5;
const STIMULUS_WIDTH: usize = 15;

/// How a stimulus is drawn in the terminal
#[derive(Clone, Debug, PartialEq)]
pub struct StimulusGlyph {
    pub face: &'static str,
    pub fill: style::Color,
}

/// Stimuli keyed by `{emotion}_{color}`
pub struct StimulusBank {
    glyphs: FxHashMap<String, StimulusGlyph>,
}

impl StimulusBank {
    /// Every emotion in every color
    pub fn standard() -> Self {
        let mut glyphs = FxHashMap::default();
        for emotion in Emotion::ALL {
            for color in Color::ALL {
                glyphs.insert(
                    stimulus_key(emotion, color),
                    StimulusGlyph {
                        face: face(emotion),
                        fill: fill(color),
                    },
                );
            }
        }
        StimulusBank { glyphs }
    }

    pub fn get(&self, key: &str) -> ExperimentResult<&StimulusGlyph> {
        self.glyphs
            .get(key)
            .ok_or_else(|| ExperimentError::MissingStimulus(key.to_string()))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }
}

fn face(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Neutral => "( -_- )",
        Emotion::Happy => "( ^o^ )",
        Emotion::Relieved => "( ^_^ )",
        Emotion::Sad => "( T_T )",
        Emotion::Angry => "( >_< )",
        Emotion::Contempt => "( ¬_¬ )",
    }
}

fn fill(color: Color) -> style::Color {
    match color {
        Color::Red => style::Color::Rgb { r: 220, g: 30, b: 30 },
        Color::Green => style::Color::Rgb { r: 30, g: 170, b: 50 },
        Color::Blue => style::Color::Rgb { r: 40, g: 80, b: 220 },
        Color::Orange => style::Color::Rgb { r: 255, g: 150, b: 0 },
    }
}

/// Terminal columns taken by `text`; CJK and full-width forms take two
pub fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| match c as u32 {
            0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 => 2,
            _ => 1,
        })
        .sum()
}

/// Left column that centers `width` columns in `total`
pub fn center_col(total: u16, width: usize) -> u16 {
    (total as usize).saturating_sub(width) as u16 / 2
}

/// Full-screen terminal presenter
pub struct TerminalPresenter {
    out: Stdout,
    input: InputHandler,
    stimuli: StimulusBank,
    clock: Instant,
    quit_key: char,
    active: bool,
}

impl TerminalPresenter {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn open(quit_key: char) -> ExperimentResult<Self> {
        InputHandler::enable_raw_mode()?;
        let mut out = stdout();
        queue!(out, EnterAlternateScreen, cursor::Hide)?;
        out.flush()?;

        Ok(TerminalPresenter {
            out,
            input: InputHandler::new(),
            stimuli: StimulusBank::standard(),
            clock: Instant::now(),
            quit_key,
            active: true,
        })
    }

    fn clear(&mut self) -> ExperimentResult<()> {
        queue!(
            self.out,
            ResetColor,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Queue `text` centered on `row`
    fn centered(&mut self, row: u16, text: &str) -> ExperimentResult<()> {
        let (cols, _) = terminal::size()?;
        queue!(
            self.out,
            cursor::MoveTo(center_col(cols, display_width(text)), row),
            Print(text)
        )?;
        Ok(())
    }

    fn seconds_at(&self, at: Instant) -> f64 {
        at.saturating_duration_since(self.clock).as_secs_f64()
    }

    /// Restore the terminal; safe to call more than once
    pub fn shutdown(&mut self) -> ExperimentResult<()> {
        if self.active {
            self.active = false;
            queue!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen)?;
            self.out.flush()?;
            InputHandler::disable_raw_mode()?;
        }
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    fn show_instruction(&mut self, text: &str) -> ExperimentResult<()> {
        self.clear()?;
        let (_, rows) = terminal::size()?;
        let lines: Vec<&str> = text.lines().collect();
        let top = center_col(rows, lines.len());
        for (i, line) in lines.iter().enumerate() {
            self.centered(top + i as u16, line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn show_fixation(&mut self) -> ExperimentResult<()> {
        self.clear()?;
        let (_, rows) = terminal::size()?;
        queue!(self.out, SetAttribute(Attribute::Bold))?;
        self.centered(rows / 2, "+")?;
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        Ok(())
    }

    fn show_stimulus(&mut self, condition: &Condition) -> ExperimentResult<()> {
        let glyph = self.stimuli.get(&condition.stimulus_key())?.clone();

        self.clear()?;
        let (_, rows) = terminal::size()?;
        let top = (rows / 2).saturating_sub(STIMULUS_HEIGHT / 2 + 1);

        queue!(
            self.out,
            SetBackgroundColor(glyph.fill),
            SetForegroundColor(style::Color::Black)
        )?;
        for i in 0..STIMULUS_HEIGHT {
            let line = if i == STIMULUS_HEIGHT / 2 {
                format!("{:^width$}", glyph.face, width = STIMULUS_WIDTH)
            } else {
                " ".repeat(STIMULUS_WIDTH)
            };
            self.centered(top + i, &line)?;
        }
        queue!(self.out, ResetColor, SetAttribute(Attribute::Bold))?;

        self.centered(top + STIMULUS_HEIGHT + 2, condition.distractor.word())?;
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        Ok(())
    }

    fn show_feedback(&mut self, correct: bool) -> ExperimentResult<()> {
        self.clear()?;
        let (_, rows) = terminal::size()?;
        let (text, color) = if correct {
            (instructions::CORRECT_FEEDBACK, style::Color::Green)
        } else {
            (instructions::WRONG_FEEDBACK, style::Color::Red)
        };
        queue!(self.out, SetForegroundColor(color))?;
        self.centered(rows / 2, text)?;
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn wait(&mut self, duration: Duration) -> ExperimentResult<()> {
        thread::sleep(duration);
        Ok(())
    }

    fn await_key(&mut self, keys: &[char]) -> ExperimentResult<KeyPress> {
        self.input.clear_pending()?;
        let (key, at) = self.input.wait_for(keys, self.quit_key)?;
        if key == self.quit_key && !keys.contains(&key) {
            return Err(ExperimentError::Aborted);
        }
        Ok(KeyPress {
            key,
            time: self.seconds_at(at),
        })
    }

    fn await_any_key(&mut self) -> ExperimentResult<()> {
        self.input.clear_pending()?;
        self.input.read_key()?;
        Ok(())
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
