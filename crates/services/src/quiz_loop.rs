use std::sync::Arc;

use quiz_core::model::{PlayerName, ScoreId};
use quiz_core::session::{AnswerOutcome, Phase, QuizSession};
use quiz_core::Clock;
use storage::repository::{NewScoreRecord, QuestionRepository, ScoreRepository};

use crate::error::QuizError;
use crate::notice::{Notice, NoticeSink};

/// How long the post-answer reveal stays on screen before the session
/// advances. A pacing device, not a timeout with retry semantics.
pub const REVEAL_DELAY_MS: u64 = 2000;

/// Orchestrates a player-facing quiz run: loads the ordered question set,
/// drives the session machine, and persists the final score.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    scores: Arc<dyn ScoreRepository>,
    sink: Arc<dyn NoticeSink>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionRepository>,
        scores: Arc<dyn ScoreRepository>,
        sink: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            clock,
            questions,
            scores,
            sink,
        }
    }

    /// Fetch the current question set and build a session waiting at the
    /// start screen. Called again whenever the change feed reports the
    /// question table moved.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` when the read fails; the caller shows
    /// the retry-capable empty state.
    pub async fn load_session(&self) -> Result<QuizSession, QuizError> {
        let questions = self.questions.list_questions().await?;
        Ok(QuizSession::new(questions))
    }

    /// Start the question loop for the given player name.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` for a blank name or an empty question
    /// set; a validation notice goes to the sink and the phase stays put.
    pub fn begin(&self, session: &mut QuizSession, raw_name: &str) -> Result<(), QuizError> {
        if let Err(err) = session.begin(raw_name) {
            self.sink.notify(Notice::error(
                "Cannot start the quest",
                match &err {
                    quiz_core::SessionError::NoQuestions => "No questions are available yet.",
                    _ => "Enter your name to begin.",
                },
            ));
            return Err(err.into());
        }
        Ok(())
    }

    /// Submit an answer for the current question and emit the
    /// success/failure notice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` when the machine rejects the answer.
    pub fn answer(
        &self,
        session: &mut QuizSession,
        index: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        let outcome = session.submit_answer(index)?;
        if outcome.correct {
            self.sink.notify(Notice::success(
                "Correct!",
                format!("+{} Souls collected!", outcome.souls_awarded),
            ));
        } else {
            self.sink.notify(Notice::error(
                "Wrong answer",
                format!("The correct answer was: {}", outcome.correct_option),
            ));
        }
        Ok(outcome)
    }

    /// Persist the finished session's score and move to the leaderboard
    /// display. A failed write is reported through the sink and logged,
    /// never treated as fatal: the player keeps the result already shown.
    pub async fn finish(&self, session: &mut QuizSession) -> Option<ScoreId> {
        if session.phase() != Phase::Finished {
            return None;
        }
        let name = session.player_name().cloned()?;
        let score = session.total_souls();

        let result = self.submit_score(&name, score).await;
        session.enter_ranking();

        match result {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("score write failed for {name}: {err}");
                self.sink.notify(Notice::error(
                    "Score not saved",
                    "Your result could not be stored. Try submitting again.",
                ));
                None
            }
        }
    }

    /// Raw score write, also used by the retry prompt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` when the insert fails.
    pub async fn submit_score(
        &self,
        player_name: &PlayerName,
        score: u32,
    ) -> Result<ScoreId, QuizError> {
        let record = NewScoreRecord {
            player_name: player_name.clone(),
            score,
            completed_at: self.clock.now(),
        };
        Ok(self.scores.append_score(&record).await?)
    }
}
