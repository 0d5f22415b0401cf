use std::{fs, path::Path, str::FromStr};

use chrono::{Datelike, NaiveDate};
use rand::prelude::SliceRandom;
use serde::Deserialize;
use tracing::debug;

use super::core::{ParseWordError, Word};

/// Whether a submission must be a vocabulary word, or only the right
/// shape. The answer pool is the same either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessPolicy {
    /// Any five-letter guess is accepted; the list is only the answer pool.
    #[default]
    AnswersOnly,
    /// Guesses must themselves be vocabulary words.
    Dictionary,
}

#[derive(Debug, thiserror::Error)]
pub enum WordsListError {
    #[error("failed to read words file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    BadWord(#[from] ParseWordError),

    #[error("words list is empty")]
    Empty,
}

/// The fixed vocabulary: answer pool and guess-validity set in one.
#[derive(Debug, Clone)]
pub struct WordsList {
    answers: Vec<Word>,
}

static BUILT_IN: &str = include_str!("../../words/answers.txt");

impl WordsList {
    /// The list compiled into the binary.
    pub fn built_in() -> Self {
        Self::parse(BUILT_IN).expect("built-in words list should be valid")
    }

    /// Loads a replacement list from disk, one word per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordsListError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    fn parse(text: &str) -> Result<Self, WordsListError> {
        let answers = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Word::from_str)
            .collect::<Result<Vec<Word>, ParseWordError>>()?;

        if answers.is_empty() {
            return Err(WordsListError::Empty);
        }

        Ok(Self { answers })
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// The answer for a given calendar date: day-of-year ordinal modulo
    /// the list length. Stable across restarts, no randomness.
    pub fn daily_word(&self, date: NaiveDate) -> &Word {
        let index = date.ordinal() as usize % self.answers.len();

        debug!(%date, index, "selected daily word");

        &self.answers[index]
    }

    /// A practice answer. Not deterministic.
    pub fn random_answer(&self) -> Word {
        self.answers
            .choose(&mut rand::thread_rng())
            .expect("list should not be empty")
            .clone()
    }

    /// Case-insensitive membership test. Anything that is not exactly
    /// five letters fails.
    pub fn valid_guess(&self, guess: &str) -> bool {
        Word::from_str(guess).is_ok_and(|word| self.answers.contains(&word))
    }
}
