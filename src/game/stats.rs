use serde::{Deserialize, Serialize};

use crate::data::UtcDateTime;

use super::MAX_ATTEMPTS;

/// How a completed session ended. `attempts_used` is 1-based and capped
/// at [`MAX_ATTEMPTS`] by the session that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub won: bool,
    pub attempts_used: u32,
}

/// Cumulative per-player statistics, folded once per completed session.
///
/// Invariants: `games_won <= games_played`, the distribution sums to
/// `games_won`, and `current_streak <= max_streak`. Nothing here ever
/// decreases except `current_streak` resetting on a loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub guess_distribution: [u32; MAX_ATTEMPTS],
    pub fastest_win: Option<u32>,
    pub last_completed_at: Option<UtcDateTime>,
}

impl GameStats {
    /// Folds one outcome into a new snapshot, leaving `self` untouched
    /// so the caller can still diff achievements against the old state.
    #[must_use]
    pub fn apply(&self, outcome: GameOutcome, completed_at: UtcDateTime) -> Self {
        let mut next = self.clone();

        next.games_played += 1;
        next.last_completed_at = Some(completed_at);

        if outcome.won {
            next.games_won += 1;
            next.current_streak += 1;
            next.max_streak = next.max_streak.max(next.current_streak);
            next.guess_distribution[outcome.attempts_used as usize - 1] += 1;

            next.fastest_win = Some(
                self.fastest_win
                    .map_or(outcome.attempts_used, |fastest| {
                        fastest.min(outcome.attempts_used)
                    }),
            );
        } else {
            next.current_streak = 0;
        }

        next
    }

    /// Mean winning attempt count, recomputed from the distribution so
    /// it cannot drift. Zero with no wins.
    pub fn average_tries(&self) -> f64 {
        if self.games_won == 0 {
            return 0.0;
        }

        let total: u32 = self
            .guess_distribution
            .iter()
            .enumerate()
            .map(|(index, count)| count * (index as u32 + 1))
            .sum();

        f64::from(total) / f64::from(self.games_won)
    }

    /// Percentage of games won, rounded to the nearest whole number.
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }

        (f64::from(self.games_won) / f64::from(self.games_played) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use crate::data::UtcDateTime;

    use super::{GameOutcome, GameStats};

    fn win(attempts_used: u32) -> GameOutcome {
        GameOutcome {
            won: true,
            attempts_used,
        }
    }

    fn loss() -> GameOutcome {
        GameOutcome {
            won: false,
            attempts_used: 6,
        }
    }

    fn now() -> UtcDateTime {
        Utc.with_ymd_and_hms(2025, 5, 4, 18, 0, 0).unwrap()
    }

    fn invariants(stats: &GameStats) {
        assert!(stats.games_won <= stats.games_played);
        assert!(stats.current_streak <= stats.max_streak);
        assert_eq!(
            stats.guess_distribution.iter().sum::<u32>(),
            stats.games_won
        );
    }

    #[test]
    fn first_win_in_one_try() {
        let stats = GameStats::default().apply(win(1), now());

        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.guess_distribution[0], 1);
        assert_eq!(stats.fastest_win, Some(1));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.last_completed_at, Some(now()));
        invariants(&stats);
    }

    #[test]
    fn losses_reset_the_streak_but_keep_the_max() {
        let stats = GameStats::default()
            .apply(win(3), now())
            .apply(win(2), now())
            .apply(loss(), now());

        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 2);
        invariants(&stats);
    }

    #[test]
    fn fastest_win_only_improves() {
        let stats = GameStats::default()
            .apply(win(4), now())
            .apply(win(2), now())
            .apply(win(5), now());

        assert_eq!(stats.fastest_win, Some(2));
        invariants(&stats);
    }

    #[test]
    fn average_tries_is_recomputed_from_the_distribution() {
        let stats = GameStats::default()
            .apply(win(1), now())
            .apply(win(3), now());

        assert_eq!(stats.average_tries(), 2.0);
        assert_eq!(GameStats::default().average_tries(), 0.0);
    }

    #[test]
    fn win_rate_rounds() {
        let stats = GameStats::default()
            .apply(win(2), now())
            .apply(loss(), now())
            .apply(loss(), now());

        // 1/3 rounds to 33
        assert_eq!(stats.win_rate(), 33);
        assert_eq!(GameStats::default().win_rate(), 0);
    }

    #[test]
    fn invariants_hold_over_mixed_histories() {
        let outcomes = [
            win(6),
            loss(),
            win(1),
            win(4),
            loss(),
            win(2),
            win(2),
            loss(),
        ];

        let mut stats = GameStats::default();
        for outcome in outcomes {
            stats = stats.apply(outcome, now());
            invariants(&stats);
        }

        assert_eq!(stats.games_played, 8);
        assert_eq!(stats.games_won, 5);
        assert_eq!(stats.guess_distribution, [1, 2, 0, 1, 0, 1]);
    }
}
