//! Presentation backend seam
//!
//! Trial logic only needs to draw a handful of screens, sleep, and wait
//! for one of a set of keys with a timestamp. Everything else belongs to
//! the backend.

use super::condition::Condition;
use crate::error::ExperimentResult;
use std::time::Duration;

/// A key press and the clock reading (seconds) at which it arrived
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyPress {
    pub key: char,
    pub time: f64,
}

pub trait Presenter {
    /// Seconds since the session clock was reset
    fn now(&self) -> f64;

    fn show_instruction(&mut self, text: &str) -> ExperimentResult<()>;

    fn show_fixation(&mut self) -> ExperimentResult<()>;

    /// Draw the `{emotion}_{color}` stimulus with its distractor word
    fn show_stimulus(&mut self, condition: &Condition) -> ExperimentResult<()>;

    fn show_feedback(&mut self, correct: bool) -> ExperimentResult<()>;

    fn wait(&mut self, duration: Duration) -> ExperimentResult<()>;

    /// Block until one of `keys` is pressed. Presses queued before the
    /// call are discarded.
    fn await_key(&mut self, keys: &[char]) -> ExperimentResult<KeyPress>;

    fn await_any_key(&mut self) -> ExperimentResult<()>;
}
