use std::sync::Arc;

use storage::changes::ChangeFeed;
use storage::repository::Storage;
use storage::seed::seed_default_questions;

use crate::error::AppServicesError;
use crate::notice::NoticeSink;
use crate::question_service::QuestionService;
use crate::quiz_loop::QuizLoopService;
use crate::ranking::RankingService;
use crate::Clock;

/// Assembles the app-facing services over a shared storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    question_service: Arc<QuestionService>,
    ranking: Arc<RankingService>,
    changes: ChangeFeed,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, seeding the default
    /// question set when the table is empty.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding
    /// fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        sink: Arc<dyn NoticeSink>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        seed_default_questions(storage.questions.as_ref()).await?;
        Ok(Self::from_storage(&storage, clock, sink))
    }

    /// Wire services over an already-built storage aggregate. Used by the
    /// tests and the in-memory mode.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, sink: Arc<dyn NoticeSink>) -> Self {
        let quiz_loop = Arc::new(QuizLoopService::new(
            clock,
            Arc::clone(&storage.questions),
            Arc::clone(&storage.scores),
            sink,
        ));
        let question_service = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
        let ranking = Arc::new(RankingService::new(Arc::clone(&storage.scores)));

        Self {
            quiz_loop,
            question_service,
            ranking,
            changes: storage.changes.clone(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn question_service(&self) -> Arc<QuestionService> {
        Arc::clone(&self.question_service)
    }

    #[must_use]
    pub fn ranking(&self) -> Arc<RankingService> {
        Arc::clone(&self.ranking)
    }

    #[must_use]
    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }
}
