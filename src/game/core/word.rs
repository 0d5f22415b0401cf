use std::{collections::HashMap, ops::Index, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::game::WORD_LENGTH;

use super::guess::{Guess, LetterState, PartialGuess};

/// A five-letter answer word, stored uppercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    letters: Vec<char>,
    letter_counts: HashMap<char, usize>,
}

impl Word {
    /// Evaluates a guess against this word.
    ///
    /// Two passes: exact positions first, each consuming one occurrence
    /// of its letter, then remaining positions are marked present while
    /// unconsumed occurrences are left. A letter guessed more often
    /// than it occurs in the answer is marked absent once the
    /// occurrences run out.
    pub fn guess(&self, partial: PartialGuess) -> Guess {
        let mut guess = Guess::new(partial);

        let mut letter_counts = self.letter_counts.clone();

        for (index, (letter, state)) in guess.iter_mut().enumerate() {
            if self[index] == *letter {
                *state = LetterState::Correct;
                let count = letter_counts.get_mut(letter).expect("word has letter");
                *count = count.saturating_sub(1);
            }
        }

        for (letter, state) in guess.iter_mut() {
            if *state != LetterState::Correct
                && letter_counts.get(letter).is_some_and(|count| *count > 0)
            {
                trace!("{}: present", letter);

                *state = LetterState::Present;
                *letter_counts.get_mut(letter).expect("word has letter") -= 1;
            }
        }

        guess
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWordError {
    #[error("word `{0}` must have {} letters but has {}", WORD_LENGTH, .0.chars().count())]
    WrongLength(String),

    #[error("word `{0}` contains a non-letter character")]
    NotAlphabetic(String),
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != WORD_LENGTH {
            return Err(ParseWordError::WrongLength(s.to_owned()));
        }

        if !s.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(ParseWordError::NotAlphabetic(s.to_owned()));
        }

        let letters = s.to_ascii_uppercase().chars().collect::<Vec<char>>();

        let mut letter_counts: HashMap<char, usize> = HashMap::new();
        for letter in letters.iter() {
            *letter_counts.entry(*letter).or_insert(0) += 1;
        }

        Ok(Self {
            letters,
            letter_counts,
        })
    }
}

impl TryFrom<String> for Word {
    type Error = ParseWordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Word> for String {
    fn from(value: Word) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters.iter().collect::<String>())
    }
}

impl Index<usize> for Word {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}
