use thiserror::Error;

use super::core::PartialGuessError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("today's game is already finished")]
    SessionOver,

    #[error(transparent)]
    Guess(#[from] PartialGuessError),
}
