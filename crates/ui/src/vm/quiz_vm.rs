use quiz_core::Rank;
use quiz_core::model::{Question, ScoreId};
use quiz_core::session::{AnswerOutcome, Phase, QuizSession};
use services::QuizLoopService;

use crate::views::ViewError;

/// Screen-facing wrapper around one quiz run. All mutations go through
/// the loop service so notices and persistence stay in one place.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    session: QuizSession,
    score_id: Option<ScoreId>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            score_id: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when the run cannot start; the sink
    /// already carries the human-readable reason.
    pub fn begin(&mut self, quiz_loop: &QuizLoopService, name: &str) -> Result<(), ViewError> {
        quiz_loop
            .begin(&mut self.session, name)
            .map_err(|_| ViewError::Unknown)
    }

    /// Select an answer. Returns `None` when the machine rejects the
    /// click, e.g. a second tap inside the reveal window.
    pub fn choose(&mut self, quiz_loop: &QuizLoopService, index: usize) -> Option<AnswerOutcome> {
        quiz_loop.answer(&mut self.session, index).ok()
    }

    /// Close the reveal window when the delay fires. Safe against stale
    /// timers; the machine re-reads its own state.
    pub fn advance(&mut self) -> Phase {
        self.session.advance()
    }

    /// Persist the score and move to the leaderboard display.
    pub async fn finish(&mut self, quiz_loop: &QuizLoopService) {
        self.score_id = quiz_loop.finish(&mut self.session).await;
    }

    /// Second attempt at the score write after a failed `finish`.
    pub async fn retry_save(&mut self, quiz_loop: &QuizLoopService) -> bool {
        if self.score_id.is_some() {
            return true;
        }
        let Some(name) = self.session.player_name().cloned() else {
            return false;
        };
        match quiz_loop
            .submit_score(&name, self.session.total_souls())
            .await
        {
            Ok(id) => {
                self.score_id = Some(id);
                true
            }
            Err(_) => false,
        }
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.score_id = None;
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!(
            "Question {} of {}",
            self.session.current_index() + 1,
            self.session.question_count()
        )
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.session.question_count()
    }

    #[must_use]
    pub fn total_souls(&self) -> u32 {
        self.session.total_souls()
    }

    #[must_use]
    pub fn souls_on_offer(&self) -> u32 {
        self.session.souls_on_offer()
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        self.session.rank()
    }

    #[must_use]
    pub fn player_name(&self) -> Option<&str> {
        self.session.player_name().map(|name| name.as_str())
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.session.selected_answer()
    }

    #[must_use]
    pub fn score_saved(&self) -> bool {
        self.score_id.is_some()
    }

    /// CSS class for an option button, reveal styling included. Outside
    /// the reveal window every option renders neutral.
    #[must_use]
    pub fn option_class(&self, index: usize) -> &'static str {
        let Some(selected) = self.session.selected_answer() else {
            return "option-button";
        };
        let Some(question) = self.session.current_question() else {
            return "option-button";
        };
        if index == question.correct_index() {
            "option-button option-button--correct"
        } else if index == selected {
            "option-button option-button--wrong"
        } else {
            "option-button option-button--dim"
        }
    }
}

/// # Errors
///
/// Returns `ViewError::Unknown` when the question set cannot be read.
pub async fn load_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let session = quiz_loop
        .load_session()
        .await
        .map_err(|_| ViewError::Unknown)?;
    Ok(QuizVm::new(session))
}
