use std::{fs, io::ErrorKind, path::PathBuf};

use chrono::NaiveDate;
use tracing::{debug, instrument, trace};

use crate::{
    game::{SessionSnapshot, Word},
    player::UserId,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access session cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode session snapshot: {0}")]
    Serde(#[from] serde_json::Error),
}

/// On-disk cache of each player's latest session snapshot, one JSON
/// file per user.
///
/// A snapshot only matches for the same date and answer, so entries
/// for past days go stale on their own; nothing ever evicts them.
#[derive(Debug, Clone)]
pub struct SessionCache {
    dir: PathBuf,
}

impl SessionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, user: &UserId) -> PathBuf {
        self.dir.join(format!("{user}.json"))
    }

    /// The stored snapshot for today's puzzle, if the player already
    /// has one.
    #[instrument(skip_all, fields(%user, %date))]
    pub fn restore(
        &self,
        user: &UserId,
        date: NaiveDate,
        answer: &Word,
    ) -> Result<Option<SessionSnapshot>, Error> {
        let text = match fs::read_to_string(self.path_for(user)) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                trace!("no cached session");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let snapshot: SessionSnapshot = serde_json::from_str(&text)?;

        if snapshot.date != date || &snapshot.answer != answer {
            trace!("cached session is stale");
            return Ok(None);
        }

        debug!("restored cached session");

        Ok(Some(snapshot))
    }

    #[instrument(skip_all, fields(%user))]
    pub fn store(&self, user: &UserId, snapshot: &SessionSnapshot) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.path_for(user),
            serde_json::to_string(snapshot)?,
        )?;

        Ok(())
    }
}
