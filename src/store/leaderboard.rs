use mongodb::{bson::doc, options::FindOptions, Collection, Database};
use serde::Serialize;
use tracing::instrument;

use super::{profiles::UserProfile, DbResult};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub games_won: u32,
    pub max_streak: u32,
    pub average_tries: f64,
}

impl From<UserProfile> for LeaderboardEntry {
    fn from(profile: UserProfile) -> Self {
        let username = if profile.username.is_empty() {
            "Anonymous Player".to_owned()
        } else {
            profile.username
        };

        Self {
            username,
            games_won: profile.games_won,
            max_streak: profile.max_streak,
            average_tries: profile.average_tries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    collection: Collection<UserProfile>,
}

impl Leaderboard {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// The top players by total wins, best first.
    #[instrument(skip_all)]
    pub async fn top(&self, limit: impl Into<Option<i64>>) -> DbResult<Vec<LeaderboardEntry>> {
        let limit = limit.into().unwrap_or(DEFAULT_LIMIT);

        let mut cursor = self
            .collection
            .find(
                None,
                FindOptions::builder()
                    .sort(doc! { "games_won": -1 })
                    .limit(limit)
                    .build(),
            )
            .await?;

        let mut entries = Vec::with_capacity(limit.max(0) as usize);

        while cursor.advance().await? {
            entries.push(LeaderboardEntry::from(cursor.deserialize_current()?));
        }

        Ok(entries)
    }
}
