use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Opaque identifier handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const GUEST_NAME: &str = "Faithful Player";

/// Who is playing. Guests play normally but nothing is persisted for
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Player {
    Guest,
    User { id: UserId, username: String },
}

impl Player {
    pub fn user(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::User {
            id: UserId::new(id),
            username: username.into(),
        }
    }

    /// Reads the signed-in identity from the environment, the only
    /// identity source the command line front end has.
    pub fn from_env() -> Self {
        match std::env::var("BIBLEWORDLE_USER_ID") {
            Ok(id) if !id.is_empty() => {
                let username = std::env::var("BIBLEWORDLE_USERNAME")
                    .ok()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| GUEST_NAME.to_owned());

                Self::user(id, username)
            }
            _ => {
                info!("no user id in environment, playing as guest");
                Self::Guest
            }
        }
    }

    pub fn id(&self) -> Option<&UserId> {
        match self {
            Self::Guest => None,
            Self::User { id, .. } => Some(id),
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Guest => GUEST_NAME,
            Self::User { username, .. } => username,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }
}
