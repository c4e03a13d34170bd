use quiz_core::model::{Category, OPTION_COUNT, Question, QuestionDraft, QuestionId, Souls};
use services::QuestionServiceError;

/// Form state for the admin question editor. Everything is kept as raw
/// strings until submit so typing never fights the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionFormVm {
    pub editing: Option<QuestionId>,
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    pub correct_index: usize,
    pub category: String,
    pub difficulty: String,
    pub souls: String,
}

impl QuestionFormVm {
    /// Blank form for a new question.
    #[must_use]
    pub fn new() -> Self {
        Self {
            editing: None,
            prompt: String::new(),
            options: Default::default(),
            correct_index: 0,
            category: Category::Money.as_str().to_string(),
            difficulty: "1".to_string(),
            souls: Souls::MIN.to_string(),
        }
    }

    /// Form prefilled from an existing question, for editing.
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            editing: Some(question.id()),
            prompt: question.prompt().to_string(),
            options: question.options().clone(),
            correct_index: question.correct_index(),
            category: question.category().as_str().to_string(),
            difficulty: question.difficulty().value().to_string(),
            souls: question.souls().value().to_string(),
        }
    }

    /// Parse the raw fields into a draft. Full validation happens in the
    /// service; this only turns text into typed values.
    ///
    /// # Errors
    ///
    /// Returns a display-ready message for the first field that fails to
    /// parse.
    pub fn to_draft(&self) -> Result<QuestionDraft, String> {
        let category = Category::parse(self.category.trim())
            .map_err(|_| "Pick a category.".to_string())?;
        let difficulty: u8 = self
            .difficulty
            .trim()
            .parse()
            .map_err(|_| "Difficulty must be a number from 1 to 5.".to_string())?;
        let souls: u32 = self
            .souls
            .trim()
            .parse()
            .map_err(|_| "Souls must be a number between 50 and 500.".to_string())?;

        Ok(QuestionDraft {
            prompt: self.prompt.clone(),
            options: self.options.clone(),
            correct_index: self.correct_index,
            category,
            difficulty,
            souls,
        })
    }
}

impl Default for QuestionFormVm {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline message for a failed create or update.
#[must_use]
pub fn form_error_message(err: &QuestionServiceError) -> String {
    match err {
        QuestionServiceError::Question(inner) => inner.to_string(),
        _ => "Could not save the question. Try again.".to_string(),
    }
}
