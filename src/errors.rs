use thiserror::Error as ThisError;

/// Everything the play loop can fail with. Validation problems with a
/// guess are not in here; those are reported to the player and retried.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("error from mongodb: {0}")]
    MongoDb(#[from] mongodb::error::Error),

    #[error(transparent)]
    SessionCache(#[from] crate::store::session_cache::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
