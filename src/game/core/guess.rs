use std::{borrow::Cow, fmt, ops::Not};

use serde::{Deserialize, Serialize};
use tinyvec::TinyVec;

use crate::game::{
    words_list::{GuessPolicy, WordsList},
    MAX_ATTEMPTS, WORD_LENGTH,
};

use super::AsEmoji;

/// A submitted guess: one character per position, each with its
/// classification against the answer.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Guess {
    letters: [(char, LetterState); WORD_LENGTH],
}

impl Guess {
    pub(super) fn new(partial: PartialGuess) -> Self {
        let letters = partial.letters.map(|ch| (ch, LetterState::Absent));

        Self { letters }
    }

    pub fn is_correct(&self) -> bool {
        self.letters
            .iter()
            .all(|(_, state)| *state == LetterState::Correct)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(char, LetterState)> + '_ {
        self.letters.iter()
    }

    pub(super) fn iter_mut(&mut self) -> impl Iterator<Item = &mut (char, LetterState)> + '_ {
        self.letters.iter_mut()
    }
}

impl AsEmoji for Guess {
    fn as_emoji(&self) -> Cow<str> {
        self.letters
            .iter()
            .map(|(_, state)| *state)
            .collect::<Vec<LetterState>>()
            .as_emoji()
            .into_owned()
            .into()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, state) in self.letters.iter() {
            write!(f, "{state}")?;
        }

        Ok(())
    }
}

impl PartialEq<&str> for Guess {
    fn eq(&self, other: &&str) -> bool {
        &self.to_string() == other
    }
}

/// Per-position verdict for a guessed letter. The derived ordering is
/// the keyboard upgrade order: `Absent < Present < Correct`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize,
)]
pub enum LetterState {
    #[default]
    Absent,
    Present,
    Correct,
}

impl AsEmoji for LetterState {
    fn as_emoji(&self) -> Cow<str> {
        match self {
            Self::Correct => "🟩", // green square
            Self::Present => "🟧", // orange square
            Self::Absent => "⬛",  // black square
        }
        .into()
    }
}

impl fmt::Display for LetterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Correct => "O",
            Self::Present => "o",
            Self::Absent => ".",
        })
    }
}

/// A guess that has passed input validation but has not been evaluated
/// against the answer yet. Letters are stored uppercase.
#[derive(Copy, Clone, Debug, Hash)]
pub struct PartialGuess {
    letters: [char; WORD_LENGTH],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartialGuessError {
    #[error("guess has {0} letters, should have exactly {}", WORD_LENGTH)]
    WrongLength(usize),

    #[error("none of the valid words have symbols")]
    HasSymbols,

    #[error("'{0}' is not in the list of valid words")]
    NotInList(String),
}

pub trait ToPartialGuess {
    fn to_partial_guess(
        &self,
        words: &WordsList,
        policy: GuessPolicy,
    ) -> Result<PartialGuess, PartialGuessError>;
}

impl ToPartialGuess for &str {
    fn to_partial_guess(
        &self,
        words: &WordsList,
        policy: GuessPolicy,
    ) -> Result<PartialGuess, PartialGuessError> {
        let arr: [char; WORD_LENGTH] = self
            .chars()
            .map(|ch| ch.to_ascii_uppercase())
            .collect::<Vec<char>>()
            .try_into()
            .map_err(|_| PartialGuessError::WrongLength(self.chars().count()))?;

        for ch in arr {
            if ch.is_ascii_alphabetic().not() {
                return Err(PartialGuessError::HasSymbols);
            }
        }

        if policy == GuessPolicy::Dictionary && words.valid_guess(self).not() {
            return Err(PartialGuessError::NotInList(self.to_string()));
        }

        Ok(PartialGuess { letters: arr })
    }
}

/// The submitted rows of one session, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Guesses {
    vec: TinyVec<[Guess; MAX_ATTEMPTS]>,
}

impl Guesses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, guess: Guess) {
        self.vec.push(guess);
    }

    pub fn count(&self) -> usize {
        self.vec.len()
    }

    pub fn last(&self) -> Option<&Guess> {
        self.vec.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Guess> + '_ {
        self.vec.iter()
    }
}

impl AsEmoji for Guesses {
    fn as_emoji(&self) -> Cow<str> {
        self.iter()
            .map(|g| g.as_emoji())
            .collect::<Vec<_>>()
            .join("\n")
            .into()
    }
}
