use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question carries exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("answer option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct index {index} is out of range (must be < {OPTION_COUNT})")]
    CorrectIndexOutOfRange { index: usize },

    #[error("difficulty must be between 1 and 5, got {value}")]
    InvalidDifficulty { value: u8 },

    #[error("souls reward must be between {} and {}, got {value}", Souls::MIN, Souls::MAX)]
    InvalidSouls { value: u32 },

    #[error("unknown category: {raw}")]
    UnknownCategory { raw: String },
}

//
// ─── VALUE TYPES ───────────────────────────────────────────────────────────────
//

/// Topic a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Money,
    Income,
    Expenses,
}

impl Category {
    /// Storage representation, matches the remote table's `category` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Money => "money",
            Category::Income => "income",
            Category::Expenses => "expenses",
        }
    }

    /// Parse the storage representation back into a `Category`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::UnknownCategory` for anything else.
    pub fn parse(raw: &str) -> Result<Self, QuestionError> {
        match raw {
            "money" => Ok(Category::Money),
            "income" => Ok(Category::Income),
            "expenses" => Ok(Category::Expenses),
            other => Err(QuestionError::UnknownCategory {
                raw: other.to_string(),
            }),
        }
    }

    /// Human-facing label for badges.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Money => "Money",
            Category::Income => "Income",
            Category::Expenses => "Expenses",
        }
    }
}

/// Question difficulty on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Difficulty(u8);

impl Difficulty {
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidDifficulty` outside 1..=5.
    pub fn new(value: u8) -> Result<Self, QuestionError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuestionError::InvalidDifficulty { value })
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Souls awarded for a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Souls(u32);

impl Souls {
    pub const MIN: u32 = 50;
    pub const MAX: u32 = 500;

    /// # Errors
    ///
    /// Returns `QuestionError::InvalidSouls` outside the reward range.
    pub fn new(value: u32) -> Result<Self, QuestionError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuestionError::InvalidSouls { value })
        }
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question input, as collected from the admin form or seed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    pub correct_index: usize,
    pub category: Category,
    pub difficulty: u8,
    pub souls: u32,
}

impl QuestionDraft {
    /// Validate the draft into a question body ready for id/position
    /// assignment.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for an empty prompt, empty options, an
    /// out-of-range correct index, or invalid difficulty/souls values.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let mut options: [String; OPTION_COUNT] = Default::default();
        for (index, option) in self.options.into_iter().enumerate() {
            let trimmed = option.trim().to_owned();
            if trimmed.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            options[index] = trimmed;
        }

        if self.correct_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
            });
        }

        Ok(ValidatedQuestion {
            prompt,
            options,
            correct_index: self.correct_index,
            category: self.category,
            difficulty: Difficulty::new(self.difficulty)?,
            souls: Souls::new(self.souls)?,
        })
    }
}

/// A validated question body without identity or display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    category: Category,
    difficulty: Difficulty,
    souls: Souls,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn souls(&self) -> Souls {
        self.souls
    }

    #[must_use]
    pub fn assign(self, id: QuestionId, order_position: u32) -> Question {
        Question {
            id,
            prompt: self.prompt,
            options: self.options,
            correct_index: self.correct_index,
            category: self.category,
            difficulty: self.difficulty,
            souls: self.souls,
            order_position,
        }
    }
}

/// One multiple-choice question. Immutable for the duration of a quiz
/// session; the admin console writes a replacement row instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    category: Category,
    difficulty: Difficulty,
    souls: Souls,
    order_position: u32,
}

impl Question {
    /// Rehydrate a question from storage, revalidating every field.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted row no longer passes
    /// validation.
    pub fn from_persisted(
        id: QuestionId,
        prompt: String,
        options: [String; OPTION_COUNT],
        correct_index: usize,
        category: Category,
        difficulty: u8,
        souls: u32,
        order_position: u32,
    ) -> Result<Self, QuestionError> {
        let draft = QuestionDraft {
            prompt,
            options,
            correct_index,
            category,
            difficulty,
            souls,
        };
        Ok(draft.validate()?.assign(id, order_position))
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn souls(&self) -> Souls {
        self.souls
    }

    #[must_use]
    pub fn order_position(&self) -> u32 {
        self.order_position
    }

    #[must_use]
    pub fn is_correct(&self, answer_index: usize) -> bool {
        answer_index == self.correct_index
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            prompt: "What are souls?".into(),
            options: [
                "Paper".into(),
                "XP you collect".into(),
                "A cosmetic".into(),
                "A weapon".into(),
            ],
            correct_index: 1,
            category: Category::Money,
            difficulty: 1,
            souls: 100,
        }
    }

    #[test]
    fn valid_draft_validates_and_assigns() {
        let question = draft().validate().unwrap().assign(QuestionId::new(7), 3);
        assert_eq!(question.id(), QuestionId::new(7));
        assert_eq!(question.order_position(), 3);
        assert_eq!(question.souls().value(), 100);
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn draft_fails_on_blank_prompt() {
        let mut d = draft();
        d.prompt = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn draft_fails_on_blank_option() {
        let mut d = draft();
        d.options[2] = " ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::EmptyOption { index: 2 }
        );
    }

    #[test]
    fn draft_fails_on_out_of_range_correct_index() {
        let mut d = draft();
        d.correct_index = 4;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::CorrectIndexOutOfRange { index: 4 }
        );
    }

    #[test]
    fn draft_fails_on_invalid_difficulty() {
        let mut d = draft();
        d.difficulty = 6;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::InvalidDifficulty { value: 6 }
        );
    }

    #[test]
    fn draft_fails_on_souls_out_of_range() {
        let mut d = draft();
        d.souls = 25;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::InvalidSouls { value: 25 }
        );
    }

    #[test]
    fn option_text_is_trimmed() {
        let mut d = draft();
        d.options[0] = "  Paper  ".into();
        let question = d.validate().unwrap().assign(QuestionId::new(1), 1);
        assert_eq!(question.options()[0], "Paper");
    }

    #[test]
    fn category_parse_roundtrip() {
        for category in [Category::Money, Category::Income, Category::Expenses] {
            assert_eq!(Category::parse(category.as_str()).unwrap(), category);
        }
        assert!(matches!(
            Category::parse("savings"),
            Err(QuestionError::UnknownCategory { .. })
        ));
    }
}
