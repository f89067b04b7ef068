//! Main run and remedial passes
//!
//! Every trial of the main run is logged; conditions answered incorrectly
//! are collected and re-administered, reshuffled, until a pass comes back
//! clean. Each pass returns the next remedial set instead of mutating
//! shared state.

use super::condition::Condition;
use super::instructions;
use super::presenter::Presenter;
use super::session::Session;
use super::trial::run_trial;
use crate::error::ExperimentResult;
use rand::seq::SliceRandom;
use std::io::Write;

impl<P: Presenter, W: Write> Session<P, W> {
    /// Run `batch` in order, log every record, and return the conditions
    /// answered incorrectly. `pass` 0 is the main run.
    pub fn run_batch(&mut self, batch: &[Condition], pass: u32) -> ExperimentResult<Vec<Condition>> {
        let mut incorrect = Vec::new();

        for condition in batch {
            let iti = self.config.iti().sample(&mut self.rng);
            let record = run_trial(&mut self.presenter, &self.keys, condition, iti)?;

            self.log.append(&record)?;
            self.summary.record(&record, pass);
            tracing::debug!(
                pass,
                stimulus = %condition.stimulus_key(),
                distractor = %condition.distractor,
                key = %record.key,
                correct = record.correct,
                rt = record.rt,
                "trial logged"
            );

            if !record.correct {
                incorrect.push(*condition);
            }
        }

        Ok(incorrect)
    }

    /// Main run followed by remedial passes until none are incorrect
    pub fn run_main(&mut self, conditions: &[Condition]) -> ExperimentResult<()> {
        self.instruct(instructions::EXPERIMENT)?;

        let mut remedial = self.run_batch(conditions, 0)?;
        tracing::info!(
            trials = conditions.len(),
            incorrect = remedial.len(),
            "main run finished"
        );

        if remedial.is_empty() {
            return Ok(());
        }
        self.instruct(instructions::REMEDIAL)?;

        let mut pass = 0;
        while !remedial.is_empty() {
            pass += 1;
            remedial.shuffle(&mut self.rng);
            tracing::info!(pass, trials = remedial.len(), "remedial pass");
            remedial = self.run_batch(&remedial, pass)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExperimentConfig;
    use crate::datalog::{DataLog, HEADER};
    use crate::experiment::condition::{generate_conditions, Color, Condition, Emotion};
    use crate::experiment::keymap::ReactionKeys;
    use crate::experiment::presenter::testing::{Response, ScriptedPresenter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rustc_hash::FxHashMap;

    fn keys() -> ReactionKeys {
        ReactionKeys::fixed(['f', 'j', 'd', 'k'], 'q')
    }

    fn session(presenter: ScriptedPresenter) -> Session<ScriptedPresenter, Vec<u8>> {
        Session::new(
            presenter,
            keys(),
            DataLog::new(Vec::new()).unwrap(),
            ExperimentConfig::default(),
            StdRng::seed_from_u64(9),
        )
    }

    fn logged_rows(session: Session<ScriptedPresenter, Vec<u8>>) -> Vec<String> {
        let (writer, _) = session.close().unwrap();
        let text = String::from_utf8(writer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER));
        lines.map(str::to_string).collect()
    }

    #[test]
    fn test_no_errors_no_remedial() {
        let mut session = session(ScriptedPresenter::always_correct(keys()));
        let conditions = generate_conditions(3);

        session.run_main(&conditions).unwrap();
        let passes = session.summary().remedial_passes;

        assert_eq!(passes, 0);
        assert_eq!(session.presenter().instructions.len(), 1);
        assert_eq!(logged_rows(session).len(), 144);
    }

    #[test]
    fn test_single_remedial_pass() {
        // sad faces wrong the first time they are seen
        let presenter = ScriptedPresenter::new(keys(), |c, attempt| {
            if c.emotion == Emotion::Sad && attempt == 0 {
                Response::Wrong
            } else {
                Response::Correct
            }
        });
        let mut session = session(presenter);
        let conditions = generate_conditions(3);

        session.run_main(&conditions).unwrap();
        let passes = session.summary().remedial_passes;

        // congruent copies share an attempt count, so only the first copy
        // of each sad condition is wrong: 4 colors x 4 distractors
        assert_eq!(passes, 1);
        assert_eq!(session.summary().remedial_trials, 16);
        assert_eq!(session.presenter().instructions.len(), 2);
        assert_eq!(logged_rows(session).len(), 144 + 16);
    }

    #[test]
    fn test_repeated_errors_need_more_passes() {
        let target = Condition::new(Emotion::Angry, Color::Red, Color::Blue);
        let presenter = ScriptedPresenter::new(keys(), move |c, attempt| {
            if *c == target && attempt < 3 {
                Response::Wrong
            } else {
                Response::Correct
            }
        });
        let mut session = session(presenter);

        session.run_main(&generate_conditions(3)).unwrap();
        let passes = session.summary().remedial_passes;

        assert_eq!(passes, 3);
        let rows = logged_rows(session);
        assert_eq!(rows.len(), 144 + 3);
        let target_rows: Vec<&String> = rows
            .iter()
            .filter(|r| r.starts_with("angry,red,blue,"))
            .collect();
        assert_eq!(target_rows.len(), 4);
        assert!(target_rows[3].contains(",True,"));
    }

    #[test]
    fn test_correct_conditions_never_readmitted() {
        let mut errors_left: FxHashMap<Condition, usize> = FxHashMap::default();
        errors_left.insert(Condition::new(Emotion::Happy, Color::Green, Color::Orange), 2);
        errors_left.insert(Condition::new(Emotion::Neutral, Color::Blue, Color::Red), 1);

        let presenter = ScriptedPresenter::new(keys(), move |c, _| {
            match errors_left.get_mut(c) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    Response::Wrong
                }
                _ => Response::Correct,
            }
        });
        let mut session = session(presenter);

        let first = vec![
            Condition::new(Emotion::Happy, Color::Green, Color::Orange),
            Condition::new(Emotion::Neutral, Color::Blue, Color::Red),
            Condition::new(Emotion::Sad, Color::Orange, Color::Orange),
        ];
        let remedial = session.run_batch(&first, 0).unwrap();
        assert_eq!(remedial.len(), 2);

        let remedial = session.run_batch(&remedial, 1).unwrap();
        assert_eq!(
            remedial,
            vec![Condition::new(Emotion::Happy, Color::Green, Color::Orange)]
        );

        let remedial = session.run_batch(&remedial, 2).unwrap();
        assert!(remedial.is_empty());
        assert_eq!(session.rows_logged(), 3 + 2 + 1);
    }

    #[test]
    fn test_reaction_times_consistent() {
        let mut session = session(ScriptedPresenter::always_correct(keys()));
        session.run_main(&generate_conditions(3)).unwrap();

        for row in logged_rows(session) {
            let fields: Vec<&str> = row.split(',').collect();
            assert_eq!(fields.len(), 9);
            let appear: f64 = fields[6].parse().unwrap();
            let press: f64 = fields[7].parse().unwrap();
            let rt: f64 = fields[8].parse().unwrap();
            assert!(rt >= 0.0);
            assert!((rt - (press - appear)).abs() < 1e-9);
        }
    }
}
