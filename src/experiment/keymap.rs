//! Color-to-key mapping, counterbalanced per participant

use super::condition::Color;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

/// Reaction keys bound to colors for one run, plus the quit key
#[derive(Clone, Debug)]
pub struct ReactionKeys {
    color_keys: FxHashMap<Color, char>,
    quit_key: char,
}

impl ReactionKeys {
    /// Shuffle `keys` and bind them to `Color::ALL` in order
    pub fn counterbalanced<R: Rng + ?Sized>(keys: [char; 4], quit_key: char, rng: &mut R) -> Self {
        let mut keys = keys;
        keys.shuffle(rng);
        Self::fixed(keys, quit_key)
    }

    /// Bind `keys[i]` to `Color::ALL[i]`
    pub fn fixed(keys: [char; 4], quit_key: char) -> Self {
        let color_keys = Color::ALL
            .iter()
            .copied()
            .zip(keys.iter().map(|k| k.to_ascii_lowercase()))
            .collect();
        ReactionKeys {
            color_keys,
            quit_key: quit_key.to_ascii_lowercase(),
        }
    }

    pub fn key_for(&self, color: Color) -> char {
        // every color is bound at construction
        self.color_keys[&color]
    }

    #[cfg(test)]
    pub fn color_for(&self, key: char) -> Option<Color> {
        Color::ALL
            .iter()
            .copied()
            .find(|color| self.color_keys[color] == key)
    }

    pub fn quit_key(&self) -> char {
        self.quit_key
    }

    pub fn is_correct(&self, color: Color, key: char) -> bool {
        self.key_for(color) == key
    }

    /// Keys accepted while a stimulus is on screen
    pub fn qualifying(&self) -> Vec<char> {
        let mut keys: Vec<char> = Color::ALL.iter().map(|&c| self.key_for(c)).collect();
        keys.push(self.quit_key);
        keys
    }
}
