use std::collections::HashSet;

use super::stats::GameStats;

/// A static badge with a pure predicate over the stats snapshot.
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    predicate: fn(&GameStats) -> bool,
}

impl Achievement {
    pub fn unlocked_by(&self, stats: &GameStats) -> bool {
        (self.predicate)(stats)
    }
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement").field("id", &self.id).finish()
    }
}

pub const CATALOG: &[Achievement] = &[
    Achievement {
        id: "first_win",
        title: "First Victory",
        description: "Win your first game",
        icon: "🏆",
        predicate: |stats| stats.games_won >= 1,
    },
    Achievement {
        id: "faithful_player",
        title: "Faithful Player",
        description: "Play 5 games",
        icon: "✝️",
        predicate: |stats| stats.games_played >= 5,
    },
    Achievement {
        id: "wisdom_seeker",
        title: "Wisdom Seeker",
        description: "Win 3 games",
        icon: "📖",
        predicate: |stats| stats.games_won >= 3,
    },
    Achievement {
        id: "blessed_streak",
        title: "Blessed Streak",
        description: "Get a streak of 3 wins",
        icon: "🔥",
        predicate: |stats| stats.current_streak >= 3,
    },
    Achievement {
        id: "revelation",
        title: "Revelation",
        description: "Win a game in 3 or fewer tries",
        icon: "⚡",
        predicate: |stats| stats.guess_distribution[..3].iter().any(|&count| count > 0),
    },
    Achievement {
        id: "disciple",
        title: "Disciple",
        description: "Win 12 games",
        icon: "👑",
        predicate: |stats| stats.games_won >= 12,
    },
];

/// Every catalog entry whose predicate holds for `stats`.
pub fn unlocked_for(stats: &GameStats) -> Vec<&'static Achievement> {
    CATALOG
        .iter()
        .filter(|achievement| achievement.unlocked_by(stats))
        .collect()
}

/// Catalog entries unlocked by `new` but not by `old`. A pure diff;
/// monotonicity comes from stats only ever increasing.
pub fn newly_unlocked(old: &GameStats, new: &GameStats) -> Vec<&'static Achievement> {
    let already: HashSet<&str> = unlocked_for(old)
        .into_iter()
        .map(|achievement| achievement.id)
        .collect();

    unlocked_for(new)
        .into_iter()
        .filter(|achievement| !already.contains(achievement.id))
        .collect()
}
