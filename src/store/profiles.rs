use mongodb::{bson::doc, options::UpdateOptions, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{data::UtcDateTime, game::GameStats, player::UserId};

use super::DbResult;

/// One player's document in the `users` collection.
///
/// `games_won`, `max_streak` and `average_tries` duplicate the stats
/// so the leaderboard can sort on them server-side; they are rewritten
/// on every outcome and never read back into the stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: UserId,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub created_at: Option<UtcDateTime>,

    #[serde(default)]
    pub stats: GameStats,

    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub max_streak: u32,
    #[serde(default)]
    pub average_tries: f64,

    #[serde(default)]
    pub last_played_at: Option<UtcDateTime>,
}

impl UserProfile {
    fn new(user: UserId, username: String, created_at: UtcDateTime) -> Self {
        Self {
            user,
            username,
            created_at: Some(created_at),
            stats: GameStats::default(),
            games_won: 0,
            max_streak: 0,
            average_tries: 0.0,
            last_played_at: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserProfiles {
    collection: Collection<UserProfile>,
}

impl UserProfiles {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    #[instrument(skip_all, fields(%user))]
    pub async fn get(&self, user: &UserId) -> DbResult<Option<UserProfile>> {
        let user = mongodb::bson::ser::to_bson(user).expect("implements serialize");

        self.collection.find_one(doc! { "user": user }, None).await
    }

    /// The player's profile, created with default stats when missing.
    #[instrument(skip_all, fields(%user))]
    pub async fn ensure(
        &self,
        user: &UserId,
        username: &str,
        now: UtcDateTime,
    ) -> DbResult<UserProfile> {
        if let Some(profile) = self.get(user).await? {
            trace!("profile exists");
            return Ok(profile);
        }

        debug!("creating profile with default stats");

        let profile = UserProfile::new(user.clone(), username.to_owned(), now);
        self.collection.insert_one(&profile, None).await?;

        Ok(profile)
    }

    /// The player's stats, defaulted when the profile or its stats are
    /// missing. Absence is resolved here, never inside game logic.
    pub async fn stats_for(&self, user: &UserId) -> DbResult<GameStats> {
        Ok(self
            .get(user)
            .await?
            .map(|profile| profile.stats)
            .unwrap_or_default())
    }

    /// Writes a new stats snapshot plus the denormalized leaderboard
    /// fields. Last write wins; each player is single-writer.
    #[instrument(skip_all, fields(%user))]
    pub async fn record_outcome(
        &self,
        user: &UserId,
        stats: &GameStats,
        now: UtcDateTime,
    ) -> DbResult<()> {
        let user = mongodb::bson::ser::to_bson(user).expect("implements serialize");
        let stats_doc = mongodb::bson::ser::to_bson(stats).expect("implements serialize");
        let now = mongodb::bson::ser::to_bson(&now).expect("implements serialize");

        self.collection
            .update_one(
                doc! { "user": &user },
                doc! { "$set": {
                    "stats": stats_doc,
                    "games_won": i64::from(stats.games_won),
                    "max_streak": i64::from(stats.max_streak),
                    "average_tries": stats.average_tries(),
                    "last_played_at": now,
                } },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;

        debug!(games_played = stats.games_played, "stats recorded");

        Ok(())
    }
}
