use std::sync::Arc;

use quiz_core::model::ScoreId;
use quiz_core::rank::Rank;
use quiz_core::session::Phase;
use quiz_core::time::fixed_now;
use services::{is_current_player, Clock, NoticeLevel, QuizLoopService, RankingService, RecordingSink};
use storage::repository::{InMemoryRepository, QuestionRepository, ScoreRepository, StorageError};
use storage::seed::{default_questions, seed_default_questions};

fn quiz_services(repo: &InMemoryRepository, sink: Arc<RecordingSink>) -> QuizLoopService {
    QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        sink,
    )
}

#[tokio::test]
async fn full_run_persists_score_and_ranks_apprentice() {
    let repo = InMemoryRepository::new();
    seed_default_questions(&repo).await.expect("seed questions");

    let sink = Arc::new(RecordingSink::new());
    let loop_svc = quiz_services(&repo, Arc::clone(&sink));
    let ranking_svc = RankingService::new(Arc::new(repo.clone()));

    let mut session = loop_svc.load_session().await.expect("load session");
    assert_eq!(session.phase(), Phase::Start);

    loop_svc.begin(&mut session, "Solaire").expect("begin");
    assert_eq!(session.phase(), Phase::Playing);

    // Answer the first five correctly, then miss the rest.
    for step in 0..10 {
        let question = session.current_question().expect("question").clone();
        let correct = question.correct_index();
        let pick = if step < 5 { correct } else { (correct + 1) % 4 };
        let outcome = loop_svc.answer(&mut session, pick).expect("answer");
        assert_eq!(outcome.correct, step < 5);
        session.advance();
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.total_souls(), 850);
    assert_eq!(session.rank(), Rank::Apprentice);

    let score_id = loop_svc.finish(&mut session).await;
    assert!(score_id.is_some());
    assert_eq!(session.phase(), Phase::Ranking);

    let board = ranking_svc.ranking(10).await.expect("ranking");
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].player_name.as_str(), "Solaire");
    assert_eq!(board[0].score, 850);
    assert!(is_current_player(&board[0], "Solaire", 850, fixed_now()));

    let notices = sink.drain();
    assert_eq!(notices.len(), 10);
    assert!(notices[..5]
        .iter()
        .all(|n| n.level == NoticeLevel::Success));
    assert!(notices[5..].iter().all(|n| n.level == NoticeLevel::Error));
}

#[tokio::test]
async fn begin_rejects_empty_question_set() {
    let repo = InMemoryRepository::new();
    let sink = Arc::new(RecordingSink::new());
    let loop_svc = quiz_services(&repo, Arc::clone(&sink));

    let mut session = loop_svc.load_session().await.expect("load session");
    assert!(loop_svc.begin(&mut session, "Solaire").is_err());
    assert_eq!(session.phase(), Phase::Start);

    let notices = sink.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].body, "No questions are available yet.");
}

#[tokio::test]
async fn begin_rejects_blank_name_without_starting() {
    let repo = InMemoryRepository::new();
    seed_default_questions(&repo).await.expect("seed questions");
    let sink = Arc::new(RecordingSink::new());
    let loop_svc = quiz_services(&repo, Arc::clone(&sink));

    let mut session = loop_svc.load_session().await.expect("load session");
    assert!(loop_svc.begin(&mut session, "   ").is_err());
    assert_eq!(session.phase(), Phase::Start);
    assert_eq!(sink.drain().len(), 1);
}

#[tokio::test]
async fn restart_returns_to_a_clean_start_screen() {
    let repo = InMemoryRepository::new();
    seed_default_questions(&repo).await.expect("seed questions");
    let sink = Arc::new(RecordingSink::new());
    let loop_svc = quiz_services(&repo, Arc::clone(&sink));

    let mut session = loop_svc.load_session().await.expect("load session");
    loop_svc.begin(&mut session, "Solaire").expect("begin");
    let question = session.current_question().expect("question").clone();
    loop_svc
        .answer(&mut session, question.correct_index())
        .expect("answer");

    session.restart();
    assert_eq!(session.phase(), Phase::Start);
    assert_eq!(session.total_souls(), 0);
    assert!(session.player_name().is_none());

    // The question set survives the reset.
    loop_svc.begin(&mut session, "Siegward").expect("begin again");
    assert!(session.current_question().is_some());
}

/// Score backend that always fails, standing in for a lost connection.
struct FailingScores;

#[async_trait::async_trait]
impl ScoreRepository for FailingScores {
    async fn append_score(
        &self,
        _record: &storage::repository::NewScoreRecord,
    ) -> Result<ScoreId, StorageError> {
        Err(StorageError::Connection("write refused".to_string()))
    }

    async fn list_ranking(&self, _limit: u32) -> Result<Vec<quiz_core::model::ScoreRecord>, StorageError> {
        Err(StorageError::Connection("read refused".to_string()))
    }
}

#[tokio::test]
async fn failed_score_write_still_reaches_the_leaderboard_screen() {
    let repo = InMemoryRepository::new();
    seed_default_questions(&repo).await.expect("seed questions");
    let sink = Arc::new(RecordingSink::new());
    let loop_svc = QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(FailingScores),
        sink.clone(),
    );

    let mut session = loop_svc.load_session().await.expect("load session");
    loop_svc.begin(&mut session, "Solaire").expect("begin");
    for _ in 0..10 {
        let question = session.current_question().expect("question").clone();
        loop_svc
            .answer(&mut session, question.correct_index())
            .expect("answer");
        session.advance();
    }

    let score_id = loop_svc.finish(&mut session).await;
    assert!(score_id.is_none());
    // The player keeps the locally computed result either way.
    assert_eq!(session.phase(), Phase::Ranking);
    assert_eq!(session.total_souls(), 2450);
    assert_eq!(session.rank(), Rank::Master);

    let last = sink.drain().pop().expect("retry notice");
    assert_eq!(last.title, "Score not saved");
}

#[tokio::test]
async fn default_question_rewards_sum_to_the_full_pot() {
    let repo = InMemoryRepository::new();
    seed_default_questions(&repo).await.expect("seed questions");

    let questions = repo.list_questions().await.expect("list");
    assert_eq!(questions.len(), default_questions().len());
    let pot: u32 = questions.iter().map(|q| q.souls().value()).sum();
    assert_eq!(pot, 2450);
}
