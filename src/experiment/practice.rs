//! Practice block with accuracy gate
//!
//! Each attempt samples a fresh subset without replacement and shows
//! feedback after every trial. Attempts repeat until accuracy reaches the
//! threshold; there is no cap on attempts.

use super::condition::Condition;
use super::instructions;
use super::presenter::Presenter;
use super::session::Session;
use super::trial::run_trial;
use crate::error::ExperimentResult;
use rand::seq::SliceRandom;
use std::io::Write;
use std::time::Duration;

/// Result of the accepted practice attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PracticeOutcome {
    pub attempts: u32,
    pub accuracy: f64,
}

/// Fraction of practice trials answered correctly
pub fn practice_accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64
}

pub fn passes_threshold(accuracy: f64, threshold: f64) -> bool {
    accuracy >= threshold
}

impl<P: Presenter, W: Write> Session<P, W> {
    pub fn run_practice(&mut self, conditions: &[Condition]) -> ExperimentResult<PracticeOutcome> {
        let total = self.config.practice_trials.min(conditions.len());
        let feedback = Duration::from_secs_f64(self.config.feedback_secs);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let text = instructions::practice(&self.keys, self.config.practice_threshold);
            self.instruct(&text)?;

            let sample: Vec<Condition> = conditions
                .choose_multiple(&mut self.rng, total)
                .copied()
                .collect();

            let mut correct = 0;
            for condition in &sample {
                let iti = self.config.iti().sample(&mut self.rng);
                let record = run_trial(&mut self.presenter, &self.keys, condition, iti)?;
                tracing::debug!(
                    stimulus = %condition.stimulus_key(),
                    distractor = %condition.distractor,
                    correct = record.correct,
                    rt = record.rt,
                    "practice trial"
                );
                if record.correct {
                    correct += 1;
                }

                self.presenter.show_feedback(record.correct)?;
                self.presenter.wait(feedback)?;
            }

            let accuracy = practice_accuracy(correct, total);
            tracing::info!(attempt = attempts, correct, total, accuracy, "practice attempt finished");

            if passes_threshold(accuracy, self.config.practice_threshold) {
                return Ok(PracticeOutcome { attempts, accuracy });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExperimentConfig;
    use crate::datalog::DataLog;
    use crate::experiment::condition::{generate_conditions, Color, Emotion};
    use crate::experiment::keymap::ReactionKeys;
    use crate::experiment::presenter::testing::{Response, ScriptedPresenter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn keys() -> ReactionKeys {
        ReactionKeys::fixed(['f', 'j', 'd', 'k'], 'q')
    }

    fn session(presenter: ScriptedPresenter) -> Session<ScriptedPresenter, Vec<u8>> {
        Session::new(
            presenter,
            keys(),
            DataLog::new(Vec::new()).unwrap(),
            ExperimentConfig::default(),
            StdRng::seed_from_u64(5),
        )
    }

    #[test]
    fn test_threshold_boundary() {
        let below = practice_accuracy(31, 40);
        assert!((below - 0.775).abs() < 1e-12);
        assert!(!passes_threshold(below, 0.8));

        let exact = practice_accuracy(32, 40);
        assert!(passes_threshold(exact, 0.8));
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(practice_accuracy(0, 0), 0.0);
    }

    #[test]
    fn test_passes_first_attempt() {
        let mut session = session(ScriptedPresenter::always_correct(keys()));
        let conditions = generate_conditions(3);

        let outcome = session.run_practice(&conditions).unwrap();

        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.accuracy, 1.0);
        assert_eq!(session.presenter().feedback.len(), 40);
        assert_eq!(session.presenter().instructions.len(), 1);
        // practice never reaches the data log
        assert_eq!(session.rows_logged(), 0);
    }

    #[test]
    fn test_restarts_until_threshold() {
        // first 10 practice trials wrong (30/40 = 0.75), everything after correct
        let mut trials = 0;
        let presenter = ScriptedPresenter::new(keys(), move |_, _| {
            trials += 1;
            if trials <= 10 {
                Response::Wrong
            } else {
                Response::Correct
            }
        });
        let mut session = session(presenter);
        let conditions = generate_conditions(3);

        let outcome = session.run_practice(&conditions).unwrap();

        assert_eq!(outcome.attempts, 2);
        assert_eq!(session.presenter().feedback.len(), 80);
        assert_eq!(session.presenter().feedback.iter().filter(|&&c| !c).count(), 10);
        assert_eq!(session.presenter().instructions.len(), 2);
    }

    #[test]
    fn test_exactly_threshold_exits() {
        // 8 wrong of 40 is exactly 0.8
        let mut trials = 0;
        let presenter = ScriptedPresenter::new(keys(), move |_, _| {
            trials += 1;
            if trials <= 8 {
                Response::Wrong
            } else {
                Response::Correct
            }
        });
        let mut session = session(presenter);

        let outcome = session.run_practice(&generate_conditions(3)).unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!((outcome.accuracy - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_quit_during_practice() {
        let presenter = ScriptedPresenter::new(keys(), |c, _| {
            if c.emotion == Emotion::Angry && c.color == Color::Red {
                Response::Quit
            } else {
                Response::Correct
            }
        });
        let mut session = session(presenter);
        let conditions = vec![
            Condition::new(Emotion::Happy, Color::Blue, Color::Blue),
            Condition::new(Emotion::Angry, Color::Red, Color::Green),
        ];
        session.config.practice_trials = 2;

        let err = session.run_practice(&conditions).unwrap_err();
        assert!(err.is_abort());
    }
}
