use std::borrow::Cow;

mod word;
pub use word::{ParseWordError, Word};

pub mod guess;
pub use guess::{Guess, Guesses, LetterState, PartialGuess, PartialGuessError, ToPartialGuess};

mod keyboard;
pub use keyboard::KeyboardState;

/// Rendering of game state as the shareable emoji tiles.
pub trait AsEmoji {
    fn as_emoji(&self) -> Cow<str>;
}

impl AsEmoji for Vec<LetterState> {
    fn as_emoji(&self) -> Cow<str> {
        self.iter()
            .map(|l| l.as_emoji())
            .collect::<Vec<_>>()
            .join("")
            .into()
    }
}
