//! Persistence collaborators. Remote state lives in MongoDB keyed by
//! user id; the day's session snapshot is cached locally on disk.
//!
//! Failures here are never fatal to a game in progress: callers fall
//! back to in-memory state and surface a warning.

use mongodb::error::Error as MongoDbError;

pub type DbResult<T> = std::result::Result<T, MongoDbError>;

mod profiles;
pub use profiles::{UserProfile, UserProfiles};

mod leaderboard;
pub use leaderboard::{Leaderboard, LeaderboardEntry};

pub mod session_cache;
pub use session_cache::SessionCache;
