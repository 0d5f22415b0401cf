use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::guess::{Guess, LetterState};

/// Best classification seen for each letter across the whole session,
/// as shown on the on-screen keyboard.
///
/// Merging is upgrade-only: a letter marked correct is never downgraded
/// by a later guess that uses it in the wrong place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyboardState {
    letters: HashMap<char, LetterState>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, guess: &Guess) {
        for (letter, state) in guess.iter() {
            let best = self.letters.entry(*letter).or_insert(*state);

            if *state > *best {
                *best = *state;
            }
        }
    }

    pub fn get(&self, letter: char) -> Option<LetterState> {
        self.letters.get(&letter.to_ascii_uppercase()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}
