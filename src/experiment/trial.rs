//! Single trial: fixation, ITI, stimulus, timed response

use super::condition::{Condition, Congruence};
use super::keymap::ReactionKeys;
use super::presenter::Presenter;
use crate::error::{ExperimentError, ExperimentResult};
use rand::Rng;
use std::time::Duration;

/// Inter-trial interval bounds in seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItiRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl ItiRange {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = if self.max_secs > self.min_secs {
            rng.gen_range(self.min_secs..=self.max_secs)
        } else {
            self.min_secs
        };
        Duration::from_secs_f64(secs)
    }
}

/// Completed trial, as written to the data log
#[derive(Clone, Debug, PartialEq)]
pub struct TrialRecord {
    pub condition: Condition,
    pub congruence: Congruence,
    pub key: char,
    pub correct: bool,
    /// Stimulus onset, seconds on the session clock
    pub appear_time: f64,
    pub press_time: f64,
    /// Reaction time, `press_time - appear_time`
    pub rt: f64,
}

/// Present one condition and block until a reaction key is pressed.
///
/// The quit key returns `ExperimentError::Aborted`.
pub fn run_trial<P: Presenter + ?Sized>(
    presenter: &mut P,
    keys: &ReactionKeys,
    condition: &Condition,
    iti: Duration,
) -> ExperimentResult<TrialRecord> {
    presenter.show_fixation()?;
    presenter.wait(iti)?;
    presenter.show_stimulus(condition)?;

    let appear_time = presenter.now();
    let press = presenter.await_key(&keys.qualifying())?;

    if press.key == keys.quit_key() {
        tracing::warn!(stimulus = %condition.stimulus_key(), "quit key pressed");
        return Err(ExperimentError::Aborted);
    }

    let press_time = press.time;
    if press_time < appear_time {
        tracing::warn!(
            stimulus = %condition.stimulus_key(),
            appear_time,
            press_time,
            "key press timestamped before stimulus onset"
        );
    }
    debug_assert!(
        press_time >= appear_time,
        "key press at {press_time} before stimulus onset at {appear_time}"
    );

    Ok(TrialRecord {
        condition: *condition,
        congruence: condition.congruence(),
        key: press.key,
        correct: keys.is_correct(condition.color, press.key),
        appear_time,
        press_time,
        rt: press_time - appear_time,
    })
}
