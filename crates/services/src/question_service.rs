use std::sync::Arc;

use quiz_core::model::{Question, QuestionDraft, QuestionId};
use storage::repository::QuestionRepository;

use crate::error::QuestionServiceError;

/// Admin CRUD over the question table.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Every question, ascending by display position.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` when the read fails.
    pub async fn list(&self) -> Result<Vec<Question>, QuestionServiceError> {
        Ok(self.questions.list_questions().await?)
    }

    /// Validate and insert a new question at the end of the display
    /// order. Positions are gap-tolerant: the new position is the current
    /// maximum plus one, and deleted positions are never reused.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for invalid form input and
    /// `QuestionServiceError::Storage` for write failures.
    pub async fn create(&self, draft: QuestionDraft) -> Result<QuestionId, QuestionServiceError> {
        let body = draft.validate()?;
        let position = self.questions.max_order_position().await? + 1;
        Ok(self.questions.insert_question(&body, position).await?)
    }

    /// Replace every mutable field of an existing question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for invalid form input,
    /// `QuestionServiceError::Storage` (NotFound included) otherwise.
    pub async fn update(
        &self,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> Result<(), QuestionServiceError> {
        let body = draft.validate()?;
        Ok(self.questions.update_question(id, &body).await?)
    }

    /// Hard delete; there is no undo. The confirmation step lives in the
    /// UI.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` when the delete fails; the
    /// caller leaves its list state unchanged.
    pub async fn delete(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        Ok(self.questions.delete_question(id).await?)
    }
}
