//! Session context: everything one run of the experiment owns
//!
//! The presenter, key mapping, data log and RNG travel together so the
//! practice and trial loops never reach for globals.

use super::condition::{shuffled_conditions, Color};
use super::instructions;
use super::keymap::ReactionKeys;
use super::presenter::Presenter;
use super::summary::SessionSummary;
use crate::config::ExperimentConfig;
use crate::datalog::DataLog;
use crate::error::ExperimentResult;
use rand::rngs::StdRng;
use std::io::Write;

pub struct Session<P: Presenter, W: Write> {
    pub(super) presenter: P,
    pub(super) keys: ReactionKeys,
    pub(super) log: DataLog<W>,
    pub(super) config: ExperimentConfig,
    pub(super) rng: StdRng,
    pub(super) summary: SessionSummary,
}

impl<P: Presenter, W: Write> Session<P, W> {
    pub fn new(
        presenter: P,
        keys: ReactionKeys,
        log: DataLog<W>,
        config: ExperimentConfig,
        rng: StdRng,
    ) -> Self {
        Session {
            presenter,
            keys,
            log,
            config,
            rng,
            summary: SessionSummary::new(),
        }
    }

    /// Instructions, practice, main run with remedial passes, end screen
    pub fn run(&mut self) -> ExperimentResult<()> {
        tracing::info!(
            red = %self.keys.key_for(Color::Red),
            green = %self.keys.key_for(Color::Green),
            blue = %self.keys.key_for(Color::Blue),
            orange = %self.keys.key_for(Color::Orange),
            "reaction keys assigned"
        );

        let conditions = shuffled_conditions(self.config.congruent_repeats, &mut self.rng);

        let text = instructions::general(&self.keys);
        self.instruct(&text)?;

        let practice = self.run_practice(&conditions)?;
        self.summary.record_practice(practice.attempts, practice.accuracy);

        self.run_main(&conditions)?;

        self.presenter.show_instruction(instructions::END)?;
        self.presenter.await_any_key()?;
        Ok(())
    }

    /// Show a screen and wait for space
    pub(super) fn instruct(&mut self, text: &str) -> ExperimentResult<()> {
        self.presenter.show_instruction(text)?;
        self.presenter.await_key(&[' '])?;
        Ok(())
    }

    #[cfg(test)]
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn rows_logged(&self) -> usize {
        self.log.rows()
    }

    /// Flush the data log and release the presenter
    pub fn close(self) -> ExperimentResult<(W, SessionSummary)> {
        let writer = self.log.close()?;
        tracing::info!("data log closed");
        Ok((writer, self.summary))
    }
}
