//! Running statistics for the end-of-session report
//!
//! Features:
//! - Main-pass accuracy
//! - Mean reaction time per congruence (correct main-pass trials only)
//! - Stroop interference (incongruent minus congruent mean rt)
//! - Remedial pass and practice attempt counts

use super::condition::Congruence;
use super::trial::TrialRecord;

#[derive(Clone, Copy, Debug, Default)]
struct RtAccumulator {
    sum: f64,
    count: u32,
}

impl RtAccumulator {
    fn add(&mut self, rt: f64) {
        self.sum += rt;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionSummary {
    /// Trials in the first full pass
    pub main_trials: u32,
    pub main_correct: u32,
    /// Trials re-administered across all remedial passes
    pub remedial_trials: u32,
    pub remedial_passes: u32,
    pub practice_attempts: u32,
    pub practice_accuracy: f64,
    congruent_rt: RtAccumulator,
    incongruent_rt: RtAccumulator,
}

impl SessionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a logged trial. `pass` 0 is the main run.
    pub fn record(&mut self, record: &TrialRecord, pass: u32) {
        if pass > 0 {
            self.remedial_trials += 1;
            self.remedial_passes = self.remedial_passes.max(pass);
            return;
        }

        self.main_trials += 1;
        if record.correct {
            self.main_correct += 1;
            match record.congruence {
                Congruence::Congruent => self.congruent_rt.add(record.rt),
                Congruence::Incongruent => self.incongruent_rt.add(record.rt),
            }
        }
    }

    pub fn record_practice(&mut self, attempts: u32, accuracy: f64) {
        self.practice_attempts = attempts;
        self.practice_accuracy = accuracy;
    }

    pub fn main_accuracy(&self) -> f32 {
        if self.main_trials == 0 {
            1.0
        } else {
            self.main_correct as f32 / self.main_trials as f32
        }
    }

    pub fn mean_rt(&self, congruence: Congruence) -> Option<f64> {
        match congruence {
            Congruence::Congruent => self.congruent_rt.mean(),
            Congruence::Incongruent => self.incongruent_rt.mean(),
        }
    }

    /// Incongruent minus congruent mean rt, seconds
    pub fn interference(&self) -> Option<f64> {
        Some(self.mean_rt(Congruence::Incongruent)? - self.mean_rt(Congruence::Congruent)?)
    }
}
