//! Stimulus conditions: emotion × target color × distractor color
//!
//! Congruent conditions (target color names the same color as the
//! distractor word) are repeated so that each (emotion, color) pair gets
//! as many congruent as incongruent trials.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Congruent repeats used by the standard design
pub const DEFAULT_CONGRUENT_REPEATS: usize = 3;

/// Facial expression shown by the stimulus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Neutral,
    Happy,
    Relieved,
    Sad,
    Angry,
    Contempt,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Relieved,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Contempt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Relieved => "relieved",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Contempt => "contempt",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stimulus and distractor color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Orange,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Orange];

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Orange => "orange",
        }
    }

    /// Color word shown as the distractor text
    pub fn word(self) -> &'static str {
        match self {
            Color::Red => "红色",
            Color::Green => "绿色",
            Color::Blue => "蓝色",
            Color::Orange => "橙色",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether target and distractor name the same color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Congruence {
    Congruent,
    Incongruent,
}

impl Congruence {
    pub fn as_str(self) -> &'static str {
        match self {
            Congruence::Congruent => "congruent",
            Congruence::Incongruent => "incongruent",
        }
    }
}

/// One cell of the design
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Condition {
    pub emotion: Emotion,
    pub color: Color,
    pub distractor: Color,
}

impl Condition {
    pub fn new(emotion: Emotion, color: Color, distractor: Color) -> Self {
        Condition {
            emotion,
            color,
            distractor,
        }
    }

    pub fn congruence(&self) -> Congruence {
        if self.color == self.distractor {
            Congruence::Congruent
        } else {
            Congruence::Incongruent
        }
    }

    /// Lookup key of the stimulus asset, `{emotion}_{color}`
    pub fn stimulus_key(&self) -> String {
        stimulus_key(self.emotion, self.color)
    }
}

pub fn stimulus_key(emotion: Emotion, color: Color) -> String {
    format!("{}_{}", emotion.name(), color.name())
}

/// Build the full condition list in design order (unshuffled)
pub fn generate_conditions(congruent_repeats: usize) -> Vec<Condition> {
    let per_pair = Color::ALL.len() - 1 + congruent_repeats;
    let mut conditions = Vec::with_capacity(Emotion::ALL.len() * Color::ALL.len() * per_pair);

    for emotion in Emotion::ALL {
        for color in Color::ALL {
            for distractor in Color::ALL {
                let repeats = if color == distractor {
                    congruent_repeats
                } else {
                    1
                };
                for _ in 0..repeats {
                    conditions.push(Condition::new(emotion, color, distractor));
                }
            }
        }
    }

    conditions
}

/// Build the condition list and shuffle it once
pub fn shuffled_conditions<R: Rng + ?Sized>(congruent_repeats: usize, rng: &mut R) -> Vec<Condition> {
    let mut conditions = generate_conditions(congruent_repeats);
    conditions.shuffle(rng);
    conditions
}
