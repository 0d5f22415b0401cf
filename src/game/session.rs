use std::borrow::Cow;

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::data::UtcDateTime;

use super::{
    core::{AsEmoji, Guess, Guesses, KeyboardState, ToPartialGuess, Word},
    error::Error,
    stats::GameOutcome,
    words_list::{GuessPolicy, WordsList},
    MAX_ATTEMPTS, WORD_LENGTH,
};

const APP_NAME: &str = "BibleWordle";
const SHARE_URL: &str = "https://biblewordle.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Playing
    }
}

/// What a successful submission did to the session.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Not solved yet, attempts remain.
    Continue(Guess),
    Won(GameOutcome),
    /// Out of attempts. Carries the answer so the caller can reveal it.
    Lost { answer: Word, outcome: GameOutcome },
}

/// Persisted form of a session, used to restore a day's completed game
/// without replaying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub date: NaiveDate,
    pub answer: Word,
    pub guesses: Guesses,
    pub keyboard: KeyboardState,
    pub status: GameStatus,
    pub completed: bool,
}

/// One day's play for one player.
///
/// The session owns the attempt rows, the in-progress guess text and
/// the keyboard state, and refuses further input once the day's result
/// is decided. It never touches storage; callers snapshot and persist.
#[derive(Debug, Clone)]
pub struct GameSession {
    date: NaiveDate,
    answer: Word,
    guesses: Guesses,
    current: String,
    keyboard: KeyboardState,
    status: GameStatus,
    completed: bool,
}

impl GameSession {
    pub fn new(date: NaiveDate, answer: Word) -> Self {
        Self {
            date,
            answer,
            guesses: Guesses::new(),
            current: String::new(),
            keyboard: KeyboardState::new(),
            status: GameStatus::Playing,
            completed: false,
        }
    }

    /// The daily session for `date`.
    pub fn daily(words: &WordsList, date: NaiveDate) -> Self {
        Self::new(date, words.daily_word(date).clone())
    }

    /// A practice session with a random answer. Same rules, but callers
    /// should not persist its outcome against the daily lockout.
    pub fn practice(words: &WordsList, date: NaiveDate) -> Self {
        Self::new(date, words.random_answer())
    }

    pub fn restore(snapshot: SessionSnapshot) -> Self {
        Self {
            date: snapshot.date,
            answer: snapshot.answer,
            guesses: snapshot.guesses,
            current: String::new(),
            keyboard: snapshot.keyboard,
            status: snapshot.status,
            completed: snapshot.completed,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            date: self.date,
            answer: self.answer.clone(),
            guesses: self.guesses.clone(),
            keyboard: self.keyboard.clone(),
            status: self.status,
            completed: self.completed,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn answer(&self) -> &Word {
        &self.answer
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Index of the row being typed into, 0-based.
    pub fn attempt(&self) -> usize {
        self.guesses.count()
    }

    pub fn current_guess(&self) -> &str {
        &self.current
    }

    pub fn guesses(&self) -> &Guesses {
        &self.guesses
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    fn accepts_input(&self) -> bool {
        !self.status.is_terminal() && !self.completed
    }

    /// Appends one letter to the in-progress guess. Ignored when the
    /// session is over, the row is full, or `ch` is not a letter.
    pub fn append_letter(&mut self, ch: char) {
        if !self.accepts_input() || self.current.len() >= WORD_LENGTH {
            return;
        }

        if ch.is_ascii_alphabetic() {
            self.current.push(ch.to_ascii_uppercase());
        }
    }

    /// Removes the last letter of the in-progress guess, if any.
    pub fn delete_letter(&mut self) {
        if !self.accepts_input() {
            return;
        }

        self.current.pop();
    }

    /// Submits the in-progress guess.
    ///
    /// Validation failures leave the session untouched, including the
    /// typed text, so the caller can signal and let the player fix it.
    #[instrument(skip(self, words), fields(date = %self.date, attempt = self.attempt()))]
    pub fn submit_guess(
        &mut self,
        words: &WordsList,
        policy: GuessPolicy,
    ) -> Result<Submission, Error> {
        if !self.accepts_input() {
            return Err(Error::SessionOver);
        }

        let partial = self.current.as_str().to_partial_guess(words, policy)?;

        let guess = self.answer.guess(partial);
        self.guesses.push(guess);
        self.keyboard.merge(&guess);
        self.current.clear();

        if guess.is_correct() {
            debug!("solved");

            self.status = GameStatus::Won;
            self.completed = true;

            return Ok(Submission::Won(GameOutcome {
                won: true,
                attempts_used: self.guesses.count() as u32,
            }));
        }

        if self.guesses.count() >= MAX_ATTEMPTS {
            debug!("out of attempts");

            self.status = GameStatus::Lost;
            self.completed = true;

            return Ok(Submission::Lost {
                answer: self.answer.clone(),
                outcome: GameOutcome {
                    won: false,
                    attempts_used: MAX_ATTEMPTS as u32,
                },
            });
        }

        Ok(Submission::Continue(guess))
    }

    /// Time left until the next daily word, clamped at zero.
    pub fn time_until_next_word(now: UtcDateTime) -> chrono::Duration {
        let elapsed = i64::from(now.time().num_seconds_from_midnight());

        chrono::Duration::seconds((86_400 - elapsed).max(0))
    }

    /// The copyable result text: app name and date, score line, the
    /// emoji grid of submitted rows, and the site link.
    pub fn share_summary(&self) -> String {
        let score: Cow<str> = match self.status {
            GameStatus::Won => self.guesses.count().to_string().into(),
            _ => "X".into(),
        };

        format!(
            "{APP_NAME} {date}\n{score}/{MAX_ATTEMPTS}\n\n{grid}\n\n{SHARE_URL}",
            date = self.date.format("%Y-%m-%d"),
            grid = self.guesses.as_emoji(),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use tracing_test::traced_test;

    use crate::game::{
        core::{LetterState, PartialGuessError, Word},
        error::Error,
        words_list::{GuessPolicy, WordsList},
        MAX_ATTEMPTS,
    };

    use super::{GameSession, GameStatus, Submission};

    fn session(answer: &str) -> GameSession {
        GameSession::new(
            NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(),
            Word::from_str(answer).unwrap(),
        )
    }

    fn type_and_submit(
        session: &mut GameSession,
        words: &WordsList,
        text: &str,
    ) -> Result<Submission, Error> {
        for ch in text.chars() {
            session.append_letter(ch);
        }

        session.submit_guess(words, GuessPolicy::AnswersOnly)
    }

    #[test]
    fn append_uppercases_and_caps_length() {
        let mut session = session("FAITH");

        for ch in "grace!sx".chars() {
            session.append_letter(ch);
        }

        // the '!' is dropped, and nothing fits past five letters
        assert_eq!(session.current_guess(), "GRACE");

        session.delete_letter();
        assert_eq!(session.current_guess(), "GRAC");
    }

    #[test]
    fn too_short_is_rejected_without_mutation() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        session.append_letter('H');
        session.append_letter('O');

        let err = session
            .submit_guess(&words, GuessPolicy::AnswersOnly)
            .unwrap_err();

        assert_eq!(err, Error::Guess(PartialGuessError::WrongLength(2)));
        assert_eq!(session.attempt(), 0);
        assert_eq!(session.current_guess(), "HO");
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn dictionary_policy_rejects_unknown_words() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        for ch in "QQQQQ".chars() {
            session.append_letter(ch);
        }

        let err = session
            .submit_guess(&words, GuessPolicy::Dictionary)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Guess(PartialGuessError::NotInList(_))
        ));
        assert_eq!(session.attempt(), 0);
    }

    #[test]
    #[traced_test]
    fn winning_on_the_first_attempt() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        let submission = type_and_submit(&mut session, &words, "faith").unwrap();

        let Submission::Won(outcome) = submission else {
            panic!("expected a win, got {submission:?}");
        };

        assert!(outcome.won);
        assert_eq!(outcome.attempts_used, 1);
        assert_eq!(session.status(), GameStatus::Won);
        assert!(session.is_completed());
        assert!(session.guesses().last().is_some_and(|guess| guess.is_correct()));
    }

    #[test]
    fn wrong_guess_advances_and_clears_the_row() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        let submission = type_and_submit(&mut session, &words, "GRACE").unwrap();

        assert!(matches!(submission, Submission::Continue(_)));
        assert_eq!(session.attempt(), 1);
        assert_eq!(session.current_guess(), "");
        assert_eq!(session.status(), GameStatus::Playing);

        // the keyboard picked the guess up
        assert_eq!(session.keyboard().get('A'), Some(LetterState::Present));
    }

    #[test]
    #[traced_test]
    fn losing_on_the_final_attempt() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        for wrong in ["GRACE", "CROSS", "PSALM", "BIBLE", "JESUS"] {
            let submission = type_and_submit(&mut session, &words, wrong).unwrap();
            assert!(matches!(submission, Submission::Continue(_)));
        }

        let submission = type_and_submit(&mut session, &words, "GLORY").unwrap();

        let Submission::Lost { answer, outcome } = submission else {
            panic!("expected a loss, got {submission:?}");
        };

        assert_eq!(answer.to_string(), "FAITH");
        assert!(!outcome.won);
        assert_eq!(outcome.attempts_used, MAX_ATTEMPTS as u32);
        assert_eq!(session.status(), GameStatus::Lost);
        assert!(session.is_completed());
    }

    #[test]
    fn completed_sessions_refuse_input() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        type_and_submit(&mut session, &words, "FAITH").unwrap();

        session.append_letter('A');
        assert_eq!(session.current_guess(), "");

        let err = session
            .submit_guess(&words, GuessPolicy::AnswersOnly)
            .unwrap_err();
        assert_eq!(err, Error::SessionOver);
    }

    #[test]
    fn restore_keeps_the_lockout() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        type_and_submit(&mut session, &words, "FLOAT").unwrap();
        type_and_submit(&mut session, &words, "FAITH").unwrap();

        let mut restored = GameSession::restore(session.snapshot());

        assert!(restored.is_completed());
        assert_eq!(restored.status(), GameStatus::Won);
        assert_eq!(restored.attempt(), 2);
        assert_eq!(restored.answer(), session.answer());

        restored.append_letter('X');
        assert_eq!(restored.current_guess(), "");
        assert_eq!(
            restored
                .submit_guess(&words, GuessPolicy::AnswersOnly)
                .unwrap_err(),
            Error::SessionOver
        );
    }

    #[test]
    fn share_summary_formats_the_grid() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        type_and_submit(&mut session, &words, "FLOAT").unwrap();
        type_and_submit(&mut session, &words, "FAITH").unwrap();

        assert_eq!(
            session.share_summary(),
            "BibleWordle 2025-05-04\n2/6\n\n🟩⬛⬛🟧🟧\n🟩🟩🟩🟩🟩\n\nhttps://biblewordle.com"
        );
    }

    #[test]
    fn share_summary_marks_losses_with_x() {
        let words = WordsList::built_in();
        let mut session = session("FAITH");

        for wrong in ["GRACE", "CROSS", "PSALM", "BIBLE", "JESUS", "GLORY"] {
            type_and_submit(&mut session, &words, wrong).unwrap();
        }

        assert!(session.share_summary().contains("\nX/6\n"));
    }

    #[test]
    fn countdown_never_goes_negative() {
        let noon = Utc.with_ymd_and_hms(2025, 5, 4, 12, 0, 0).unwrap();
        assert_eq!(
            GameSession::time_until_next_word(noon),
            chrono::Duration::hours(12)
        );

        let nearly_midnight = Utc.with_ymd_and_hms(2025, 5, 4, 23, 59, 30).unwrap();
        assert_eq!(
            GameSession::time_until_next_word(nearly_midnight),
            chrono::Duration::seconds(30)
        );
    }

    #[test]
    fn daily_sessions_share_an_answer() {
        let words = WordsList::built_in();
        let date = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();

        let a = GameSession::daily(&words, date);
        let b = GameSession::daily(&words, date);

        assert_eq!(a.answer(), b.answer());
        assert_eq!(a.date(), date);
    }

    #[test]
    fn practice_sessions_draw_from_the_list() {
        let words = WordsList::built_in();
        let date = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();

        let session = GameSession::practice(&words, date);
        assert!(words.valid_guess(&session.answer().to_string()));
    }
}
