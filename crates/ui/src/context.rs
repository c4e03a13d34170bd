use std::sync::{Arc, Mutex};

use services::notice::Notice;
use services::{ChangeFeed, Clock, QuestionService, QuizLoopService, RankingService};
use tokio::sync::mpsc;

use crate::auth::AuthGate;

pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn question_service(&self) -> Arc<QuestionService>;
    fn ranking(&self) -> Arc<RankingService>;
    fn changes(&self) -> ChangeFeed;
    fn clock(&self) -> Clock;
    fn auth(&self) -> Arc<dyn AuthGate>;

    /// Hand over the notice channel's receiving end. Yields `Some` exactly
    /// once; the toast host owns the receiver afterwards.
    fn take_notices(&self) -> Option<mpsc::UnboundedReceiver<Notice>>;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    question_service: Arc<QuestionService>,
    ranking: Arc<RankingService>,
    changes: ChangeFeed,
    clock: Clock,
    auth: Arc<dyn AuthGate>,
    notices: Arc<Mutex<Option<mpsc::UnboundedReceiver<Notice>>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            question_service: app.question_service(),
            ranking: app.ranking(),
            changes: app.changes(),
            clock: app.clock(),
            auth: app.auth(),
            notices: Arc::new(Mutex::new(app.take_notices())),
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
    pub fn changes(&self) -> ChangeFeed {
        self.changes.clone()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.auth.is_admin()
    }

    /// One-shot handoff of the notice receiver to the toast host.
    #[must_use]
    pub fn take_notices(&self) -> Option<mpsc::UnboundedReceiver<Notice>> {
        self.notices.lock().ok().and_then(|mut guard| guard.take())
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
