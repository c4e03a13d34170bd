//! The quiz session state machine.
//!
//! Owns the question pointer, the reveal-window selection, and the souls
//! total. All transitions are synchronous and pure; timers, persistence,
//! and notifications live in the services and UI layers.

use thiserror::Error;

use crate::model::{PlayerName, PlayerNameError, Question};
use crate::rank::Rank;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    InvalidPlayerName(#[from] PlayerNameError),

    #[error("no questions available")]
    NoQuestions,

    #[error("session is not accepting answers")]
    NotPlaying,

    #[error("an answer is already selected for the current question")]
    AnswerPending,

    #[error("answer index {index} is out of range")]
    AnswerIndexOutOfRange { index: usize },
}

/// Coarse lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    Finished,
    Ranking,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Finished | Phase::Ranking)
    }
}

/// What a single `submit_answer` produced. The caller turns this into a
/// notice for the toast sink; the machine itself never performs IO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub souls_awarded: u32,
    pub total_souls: u32,
    /// Text of the correct option, for the "the answer was ..." reveal.
    pub correct_option: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    phase: Phase,
    player_name: Option<PlayerName>,
    current: usize,
    selected: Option<usize>,
    total_souls: u32,
    answered: Vec<bool>,
}

impl QuizSession {
    /// Create a session over an already-ordered question list, waiting at
    /// the name-entry screen.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let answered = vec![false; questions.len()];
        Self {
            questions,
            phase: Phase::Start,
            player_name: None,
            current: 0,
            selected: None,
            total_souls: 0,
            answered,
        }
    }

    /// Leave the start screen and begin the question loop.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPlayerName` for a blank name and
    /// `SessionError::NoQuestions` for an empty question set; the phase
    /// stays `Start` in both cases.
    pub fn begin(&mut self, raw_name: &str) -> Result<(), SessionError> {
        let name = PlayerName::new(raw_name)?;
        if self.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        self.player_name = Some(name);
        self.phase = Phase::Playing;
        self.current = 0;
        self.selected = None;
        self.total_souls = 0;
        self.answered = vec![false; self.questions.len()];
        Ok(())
    }

    /// Record an answer for the current question and open the reveal
    /// window. Souls are awarded only on a correct answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPlaying` outside the question loop,
    /// `SessionError::AnswerPending` while a reveal window is open, and
    /// `SessionError::AnswerIndexOutOfRange` for an index past the option
    /// list.
    pub fn submit_answer(&mut self, index: usize) -> Result<AnswerOutcome, SessionError> {
        if self.phase != Phase::Playing {
            return Err(SessionError::NotPlaying);
        }
        if self.selected.is_some() {
            return Err(SessionError::AnswerPending);
        }
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::NotPlaying);
        };
        if index >= question.options().len() {
            return Err(SessionError::AnswerIndexOutOfRange { index });
        }

        self.selected = Some(index);
        self.answered[self.current] = true;

        let correct = question.is_correct(index);
        let souls_awarded = if correct { question.souls().value() } else { 0 };
        self.total_souls += souls_awarded;

        Ok(AnswerOutcome {
            correct,
            souls_awarded,
            total_souls: self.total_souls,
            correct_option: question.options()[question.correct_index()].clone(),
        })
    }

    /// Close the reveal window and move on. Runs when the reveal delay
    /// fires, so it re-reads the live state instead of trusting whatever
    /// the caller captured: without an open reveal window it is a no-op,
    /// and a pointer that no longer fits the question list completes the
    /// session rather than indexing out of range.
    pub fn advance(&mut self) -> Phase {
        if self.phase != Phase::Playing || self.selected.is_none() {
            return self.phase;
        }
        self.selected = None;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.phase = Phase::Finished;
        }
        self.phase
    }

    /// Move a finished session to the leaderboard display. Called after
    /// the score write has been attempted, whether or not it succeeded.
    pub fn enter_ranking(&mut self) {
        if self.phase == Phase::Finished {
            self.phase = Phase::Ranking;
        }
    }

    /// Reset every session field and return to the start screen.
    pub fn restart(&mut self) {
        self.phase = Phase::Start;
        self.player_name = None;
        self.current = 0;
        self.selected = None;
        self.total_souls = 0;
        self.answered = vec![false; self.questions.len()];
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_name(&self) -> Option<&PlayerName> {
        self.player_name.as_ref()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Playing {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    /// The selection held open during the reveal window, if any.
    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn total_souls(&self) -> u32 {
        self.total_souls
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered.iter().filter(|answered| **answered).count()
    }

    /// Sum of every reward on offer, for the efficiency readout.
    #[must_use]
    pub fn souls_on_offer(&self) -> u32 {
        self.questions
            .iter()
            .map(|question| question.souls().value())
            .sum()
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        Rank::for_souls(self.total_souls)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
