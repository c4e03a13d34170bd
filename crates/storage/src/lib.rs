#![forbid(unsafe_code)]

pub mod changes;
pub mod repository;
pub mod seed;
pub mod sqlite;

pub use changes::{ChangeFeed, TableChange};
pub use repository::{
    InMemoryRepository, NewScoreRecord, QuestionRepository, ScoreRepository, Storage, StorageError,
};
