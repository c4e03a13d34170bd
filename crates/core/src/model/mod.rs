mod ids;
mod question;
mod score;

pub use ids::{ParseIdError, QuestionId, ScoreId};
pub use question::{
    Category, Difficulty, OPTION_COUNT, Question, QuestionDraft, QuestionError, Souls,
    ValidatedQuestion,
};
pub use score::{PlayerName, PlayerNameError, ScoreRecord};
