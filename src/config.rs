//! Experiment parameters
//!
//! Loaded from an optional JSON file; every field falls back to the
//! standard design when absent.

use crate::error::{ExperimentError, ExperimentResult};
use crate::experiment::condition::{generate_conditions, DEFAULT_CONGRUENT_REPEATS};
use crate::experiment::trial::ItiRange;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Longest ITI or feedback interval accepted, seconds
pub const MAX_INTERVAL_SECS: f64 = 60.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Trials sampled per practice attempt
    pub practice_trials: usize,
    /// Practice accuracy needed to start the main run
    pub practice_threshold: f64,
    pub iti_min_secs: f64,
    pub iti_max_secs: f64,
    /// How long correct/incorrect feedback stays up during practice
    pub feedback_secs: f64,
    pub congruent_repeats: usize,
    pub reaction_keys: [char; 4],
    pub quit_key: char,
    /// Directory the data file is written to
    pub output_dir: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            practice_trials: 40,
            practice_threshold: 0.8,
            iti_min_secs: 0.5,
            iti_max_secs: 2.0,
            feedback_secs: 1.0,
            congruent_repeats: DEFAULT_CONGRUENT_REPEATS,
            reaction_keys: ['f', 'j', 'd', 'k'],
            quit_key: 'q',
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExperimentConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> ExperimentResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ExperimentResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn iti(&self) -> ItiRange {
        ItiRange {
            min_secs: self.iti_min_secs,
            max_secs: self.iti_max_secs,
        }
    }

    pub fn validate(&self) -> ExperimentResult<()> {
        let mut keys: Vec<char> = self
            .reaction_keys
            .iter()
            .map(|k| k.to_ascii_lowercase())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        if keys.len() != self.reaction_keys.len() {
            return Err(ExperimentError::config("reaction keys must be distinct"));
        }
        if keys.contains(&self.quit_key.to_ascii_lowercase()) {
            return Err(ExperimentError::config(format!(
                "quit key '{}' is also a reaction key",
                self.quit_key
            )));
        }

        if !(self.iti_min_secs > 0.0
            && self.iti_min_secs <= self.iti_max_secs
            && self.iti_max_secs <= MAX_INTERVAL_SECS)
        {
            return Err(ExperimentError::config(format!(
                "invalid ITI range {}..{} (max {}s)",
                self.iti_min_secs, self.iti_max_secs, MAX_INTERVAL_SECS
            )));
        }
        if !(0.0..=1.0).contains(&self.practice_threshold) {
            return Err(ExperimentError::config(format!(
                "practice threshold {} outside [0, 1]",
                self.practice_threshold
            )));
        }
        if !(0.0..=MAX_INTERVAL_SECS).contains(&self.feedback_secs) {
            return Err(ExperimentError::config(format!(
                "feedback duration {} outside [0, {}]",
                self.feedback_secs, MAX_INTERVAL_SECS
            )));
        }
        if self.congruent_repeats == 0 {
            return Err(ExperimentError::config("congruent repeats must be at least 1"));
        }

        let available = generate_conditions(self.congruent_repeats).len();
        if self.practice_trials == 0 || self.practice_trials > available {
            return Err(ExperimentError::config(format!(
                "practice trials must be between 1 and {} (got {})",
                available, self.practice_trials
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExperimentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.practice_trials, 40);
        assert_eq!(config.practice_threshold, 0.8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ExperimentConfig::from_json(r#"{"practice_trials": 20, "quit_key": "x"}"#).unwrap();
        assert_eq!(config.practice_trials, 20);
        assert_eq!(config.quit_key, 'x');
        assert_eq!(config.reaction_keys, ['f', 'j', 'd', 'k']);
        assert_eq!(config.iti_max_secs, 2.0);
    }

    #[test]
    fn test_bad_json() {
        let result = ExperimentConfig::from_json("{ practice_trials: }");
        assert!(matches!(result, Err(ExperimentError::ConfigParse(_))));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let config = ExperimentConfig {
            reaction_keys: ['f', 'f', 'd', 'k'],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_quit_among_reaction_keys() {
        let config = ExperimentConfig {
            quit_key: 'K',
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let inverted = ExperimentConfig {
            iti_min_secs: 2.0,
            iti_max_secs: 1.0,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let too_many = ExperimentConfig {
            practice_trials: 145,
            ..Default::default()
        };
        assert!(too_many.validate().is_err());

        let threshold = ExperimentConfig {
            practice_threshold: 1.5,
            ..Default::default()
        };
        assert!(threshold.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_intervals() {
        let iti = ExperimentConfig::from_json(r#"{"iti_max_secs": 1e20}"#).unwrap();
        assert!(matches!(iti.validate(), Err(ExperimentError::Config(_))));

        let feedback = ExperimentConfig::from_json(r#"{"feedback_secs": 1e20}"#).unwrap();
        assert!(matches!(feedback.validate(), Err(ExperimentError::Config(_))));

        let nan = ExperimentConfig {
            feedback_secs: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let infinite = ExperimentConfig {
            iti_max_secs: f64::INFINITY,
            ..Default::default()
        };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_interval_cap_accepted() {
        let config = ExperimentConfig {
            iti_min_secs: MAX_INTERVAL_SECS,
            iti_max_secs: MAX_INTERVAL_SECS,
            feedback_secs: MAX_INTERVAL_SECS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(config.iti().sample(&mut rng).as_secs_f64(), MAX_INTERVAL_SECS);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"feedback_secs": 0.5, "output_dir": "data"}"#).unwrap();

        let config = ExperimentConfig::load(&path).unwrap();
        assert_eq!(config.feedback_secs, 0.5);
        assert_eq!(config.output_dir, PathBuf::from("data"));
    }
}
