use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{
    PlayerName, Question, QuestionId, ScoreId, ScoreRecord, ValidatedQuestion,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::changes::{ChangeFeed, TableChange};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a leaderboard entry. The id comes from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScoreRecord {
    pub player_name: PlayerName,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

/// Repository contract for the question table.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch every question, ascending by `order_position`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Insert a validated question body at the given display position and
    /// return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the insert fails.
    async fn insert_question(
        &self,
        body: &ValidatedQuestion,
        order_position: u32,
    ) -> Result<QuestionId, StorageError>;

    /// Replace every mutable field of an existing question. The display
    /// position is untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id does not exist.
    async fn update_question(
        &self,
        id: QuestionId,
        body: &ValidatedQuestion,
    ) -> Result<(), StorageError>;

    /// Hard delete. Positions of the remaining rows are not compacted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id does not exist.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;

    /// Highest `order_position` in the table, 0 when empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    async fn max_order_position(&self) -> Result<u32, StorageError>;
}

/// Repository contract for the append-only score table.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Append a finished run's score and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the insert fails.
    async fn append_score(&self, record: &NewScoreRecord) -> Result<ScoreId, StorageError>;

    /// Fetch the leaderboard: descending by score, ascending by
    /// `completed_at` on ties.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    async fn list_ranking(&self, limit: u32) -> Result<Vec<ScoreRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
    scores: Arc<Mutex<Vec<ScoreRecord>>>,
    next_question_id: Arc<Mutex<u64>>,
    next_score_id: Arc<Mutex<u64>>,
    changes: ChangeFeed,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(Vec::new())),
            scores: Arc::new(Mutex::new(Vec::new())),
            next_question_id: Arc::new(Mutex::new(1)),
            next_score_id: Arc::new(Mutex::new(1)),
            changes: ChangeFeed::new(),
        }
    }

    #[must_use]
    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    fn lock<'a, T>(
        guard: &'a Arc<Mutex<T>>,
    ) -> Result<std::sync::MutexGuard<'a, T>, StorageError> {
        guard
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = Self::lock(&self.questions)?;
        let mut out = guard.clone();
        out.sort_by_key(Question::order_position);
        Ok(out)
    }

    async fn insert_question(
        &self,
        body: &ValidatedQuestion,
        order_position: u32,
    ) -> Result<QuestionId, StorageError> {
        let id = {
            let mut next = Self::lock(&self.next_question_id)?;
            let id = QuestionId::new(*next);
            *next += 1;
            id
        };
        let question = body.clone().assign(id, order_position);
        Self::lock(&self.questions)?.push(question);
        self.changes.publish(TableChange::Questions);
        Ok(id)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        body: &ValidatedQuestion,
    ) -> Result<(), StorageError> {
        {
            let mut guard = Self::lock(&self.questions)?;
            let slot = guard
                .iter_mut()
                .find(|question| question.id() == id)
                .ok_or(StorageError::NotFound)?;
            *slot = body.clone().assign(id, slot.order_position());
        }
        self.changes.publish(TableChange::Questions);
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        {
            let mut guard = Self::lock(&self.questions)?;
            let before = guard.len();
            guard.retain(|question| question.id() != id);
            if guard.len() == before {
                return Err(StorageError::NotFound);
            }
        }
        self.changes.publish(TableChange::Questions);
        Ok(())
    }

    async fn max_order_position(&self) -> Result<u32, StorageError> {
        let guard = Self::lock(&self.questions)?;
        Ok(guard
            .iter()
            .map(Question::order_position)
            .max()
            .unwrap_or(0))
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn append_score(&self, record: &NewScoreRecord) -> Result<ScoreId, StorageError> {
        let id = {
            let mut next = Self::lock(&self.next_score_id)?;
            let id = ScoreId::new(*next);
            *next += 1;
            id
        };
        Self::lock(&self.scores)?.push(ScoreRecord {
            id,
            player_name: record.player_name.clone(),
            score: record.score,
            completed_at: record.completed_at,
        });
        self.changes.publish(TableChange::Scores);
        Ok(id)
    }

    async fn list_ranking(&self, limit: u32) -> Result<Vec<ScoreRecord>, StorageError> {
        let guard = Self::lock(&self.scores)?;
        let mut out = guard.clone();
        out.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.completed_at.cmp(&b.completed_at))
        });
        out.truncate(limit as usize);
        Ok(out)
    }
}

/// Aggregates the table repositories and the change feed behind trait
/// objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub scores: Arc<dyn ScoreRepository>,
    pub changes: ChangeFeed,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let changes = repo.changes().clone();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let scores: Arc<dyn ScoreRepository> = Arc::new(repo);
        Self {
            questions,
            scores,
            changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{Category, QuestionDraft};
    use quiz_core::time::fixed_now;

    fn body(prompt: &str, souls: u32) -> ValidatedQuestion {
        QuestionDraft {
            prompt: prompt.into(),
            options: ["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index: 0,
            category: Category::Income,
            difficulty: 2,
            souls,
        }
        .validate()
        .unwrap()
    }

    fn score(name: &str, score: u32, offset_secs: i64) -> NewScoreRecord {
        NewScoreRecord {
            player_name: PlayerName::new(name).unwrap(),
            score,
            completed_at: fixed_now() + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn questions_come_back_ordered_by_position() {
        let repo = InMemoryRepository::new();
        repo.insert_question(&body("second", 100), 2).await.unwrap();
        repo.insert_question(&body("first", 100), 1).await.unwrap();

        let questions = repo.list_questions().await.unwrap();
        assert_eq!(questions[0].prompt(), "first");
        assert_eq!(questions[1].prompt(), "second");
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_position() {
        let repo = InMemoryRepository::new();
        let id = repo.insert_question(&body("old", 100), 5).await.unwrap();

        repo.update_question(id, &body("new", 250)).await.unwrap();

        let questions = repo.list_questions().await.unwrap();
        assert_eq!(questions[0].prompt(), "new");
        assert_eq!(questions[0].souls().value(), 250);
        assert_eq!(questions[0].order_position(), 5);
    }

    #[tokio::test]
    async fn delete_missing_question_is_not_found() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.delete_question(QuestionId::new(9)).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn ranking_orders_by_score_then_time() {
        let repo = InMemoryRepository::new();
        repo.append_score(&score("late-high", 900, 30)).await.unwrap();
        repo.append_score(&score("early-high", 900, 10)).await.unwrap();
        repo.append_score(&score("low", 100, 0)).await.unwrap();

        let ranking = repo.list_ranking(10).await.unwrap();
        assert_eq!(ranking[0].player_name.as_str(), "early-high");
        assert_eq!(ranking[1].player_name.as_str(), "late-high");
        assert_eq!(ranking[2].player_name.as_str(), "low");
    }

    #[tokio::test]
    async fn mutations_publish_change_signals() {
        let repo = InMemoryRepository::new();
        let mut rx = repo.changes().subscribe();

        repo.insert_question(&body("q", 100), 1).await.unwrap();
        repo.append_score(&score("p", 100, 0)).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), TableChange::Questions);
        assert_eq!(rx.recv().await.unwrap(), TableChange::Scores);
    }
}
