#![forbid(unsafe_code)]

pub mod model;
pub mod rank;
pub mod session;
pub mod time;

pub use rank::Rank;
pub use session::{AnswerOutcome, Phase, QuizSession, SessionError};
pub use time::Clock;
