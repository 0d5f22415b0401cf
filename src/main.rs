use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use biblewordle::{
    errors::Error,
    framework::{self, Config},
    game::{
        achievements, AsEmoji, GameSession, GameStats, GuessPolicy, LetterState, Submission,
        WordsList, MAX_ATTEMPTS,
    },
    player::Player,
    store::{Leaderboard, SessionCache, UserProfiles},
    utils::FormatDuration,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    framework::logging::init_tracing();

    let config = Config::load()?;
    let words = config.game.words_list()?;
    let db = framework::db::database(&config.db)?;

    let profiles = UserProfiles::new(&db);
    let leaderboard = Leaderboard::new(&db);
    let cache = SessionCache::new(config.game.cache_dir());
    let player = Player::from_env();

    info!(player = player.username(), "starting");

    play(
        &words,
        config.game.guess_policy,
        &player,
        &profiles,
        &leaderboard,
        &cache,
    )
    .await?;

    Ok(())
}

/// Runs one game on stdin: each line is a guess. Everything in here is
/// wiring; the rules live in [`biblewordle::game`].
async fn play(
    words: &WordsList,
    policy: GuessPolicy,
    player: &Player,
    profiles: &UserProfiles,
    leaderboard: &Leaderboard,
    cache: &SessionCache,
) -> Result<(), Error> {
    let now = Utc::now();
    let today = now.date_naive();

    let practice = std::env::var_os("BIBLEWORDLE_PRACTICE").is_some();

    // practice games never touch the daily lockout or the stats
    let identity = if practice { None } else { player.id() };

    let mut session = if practice {
        info!("starting a practice game");
        GameSession::practice(words, today)
    } else {
        match identity {
            Some(user) => match cache.restore(user, today, words.daily_word(today))? {
                Some(snapshot) => GameSession::restore(snapshot),
                None => GameSession::daily(words, today),
            },
            None => GameSession::daily(words, today),
        }
    };

    if session.is_completed() {
        println!("you've already finished today's word!\n");
        println!("{}", session.share_summary());
        print_countdown();
        return Ok(());
    }

    let stats = match identity {
        Some(user) => {
            profiles.ensure(user, player.username(), now).await?;
            profiles.stats_for(user).await?
        }
        None => GameStats::default(),
    };

    println!("guess today's word! you have {MAX_ATTEMPTS} attempts.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        for ch in line.trim().chars() {
            session.append_letter(ch);
        }

        let submission = match session.submit_guess(words, policy) {
            Ok(submission) => submission,
            Err(err) => {
                println!("{err}");
                while !session.current_guess().is_empty() {
                    session.delete_letter();
                }
                continue;
            }
        };

        println!("{}", session.guesses().as_emoji());

        let outcome = match submission {
            Submission::Continue(_) => {
                let found: String = ('A'..='Z')
                    .filter(|ch| {
                        session
                            .keyboard()
                            .get(*ch)
                            .is_some_and(|state| state > LetterState::Absent)
                    })
                    .collect();

                if !found.is_empty() {
                    println!("letters in the word: {found}");
                }

                continue;
            }
            Submission::Won(outcome) => {
                println!("you won in {}/{MAX_ATTEMPTS} tries!", outcome.attempts_used);
                outcome
            }
            Submission::Lost { answer, outcome } => {
                println!("game over! the word was: {answer}");
                outcome
            }
        };

        let completed_at = Utc::now();

        if let Some(user) = identity {
            cache.store(user, &session.snapshot())?;

            let updated = stats.apply(outcome, completed_at);

            for achievement in achievements::newly_unlocked(&stats, &updated) {
                println!(
                    "achievement unlocked! {} {}: {}",
                    achievement.icon, achievement.title, achievement.description
                );
            }

            if let Err(err) = profiles.record_outcome(user, &updated, completed_at).await {
                warn!(%err, "failed to save stats, results are kept in memory only");
            }

            println!(
                "played {} | win rate {}% | average tries {:.1}",
                updated.games_played,
                updated.win_rate(),
                updated.average_tries()
            );
        } else if player.is_guest() && !practice {
            println!("sign in to save your progress and join the leaderboard");
        }

        println!("\n{}\n", session.share_summary());
        print_countdown();

        if !practice {
            match leaderboard.top(None).await {
                Ok(entries) => {
                    for (rank, entry) in entries.iter().enumerate() {
                        println!(
                            "{}. {} - {} wins (best streak {}, {:.1} avg tries)",
                            rank + 1,
                            entry.username,
                            entry.games_won,
                            entry.max_streak,
                            entry.average_tries
                        );
                    }
                }
                Err(err) => warn!(%err, "failed to load leaderboard"),
            }
        }

        break;
    }

    Ok(())
}

fn print_countdown() {
    println!(
        "next word unlocks in {}",
        GameSession::time_until_next_word(Utc::now()).format_clock()
    );
}
