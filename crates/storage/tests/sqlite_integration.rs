use chrono::Duration;
use quiz_core::model::{Category, PlayerName, QuestionDraft, ValidatedQuestion};
use quiz_core::time::fixed_now;
use storage::changes::TableChange;
use storage::repository::{NewScoreRecord, QuestionRepository, ScoreRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn body(prompt: &str, correct_index: usize, souls: u32) -> ValidatedQuestion {
    QuestionDraft {
        prompt: prompt.into(),
        options: ["A".into(), "B".into(), "C".into(), "D".into()],
        correct_index,
        category: Category::Money,
        difficulty: 1,
        souls,
    }
    .validate()
    .unwrap()
}

#[tokio::test]
async fn sqlite_roundtrips_questions_in_display_order() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_questions?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.insert_question(&body("shown second", 1, 200), 8)
        .await
        .unwrap();
    repo.insert_question(&body("shown first", 2, 100), 3)
        .await
        .unwrap();

    let questions = repo.list_questions().await.expect("list");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].prompt(), "shown first");
    assert_eq!(questions[0].correct_index(), 2);
    assert_eq!(questions[0].options()[3], "D");
    assert_eq!(questions[1].prompt(), "shown second");
    assert_eq!(questions[1].souls().value(), 200);
}

#[tokio::test]
async fn sqlite_update_and_delete_report_missing_rows() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_missing?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = repo.insert_question(&body("original", 0, 100), 1)
        .await
        .unwrap();

    repo.update_question(id, &body("replaced", 3, 450))
        .await
        .unwrap();
    let questions = repo.list_questions().await.unwrap();
    assert_eq!(questions[0].prompt(), "replaced");
    assert_eq!(questions[0].correct_index(), 3);
    assert_eq!(questions[0].order_position(), 1);

    repo.delete_question(id).await.unwrap();
    assert!(matches!(
        repo.delete_question(id).await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        repo.update_question(id, &body("gone", 0, 100)).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn sqlite_max_order_position_tracks_inserts() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_positions?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.max_order_position().await.unwrap(), 0);
    repo.insert_question(&body("a", 0, 100), 4).await.unwrap();
    repo.insert_question(&body("b", 0, 100), 2).await.unwrap();
    assert_eq!(repo.max_order_position().await.unwrap(), 4);
}

#[tokio::test]
async fn sqlite_ranking_orders_scores() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_scores?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let now = fixed_now();
    let entries = [
        ("tied-late", 900_u32, 60_i64),
        ("tied-early", 900, 10),
        ("top", 1200, 120),
        ("bottom", 50, 0),
    ];
    for (name, score, offset) in entries {
        repo.append_score(&NewScoreRecord {
            player_name: PlayerName::new(name).unwrap(),
            score,
            completed_at: now + Duration::seconds(offset),
        })
        .await
        .unwrap();
    }

    let ranking = repo.list_ranking(10).await.unwrap();
    let names: Vec<&str> = ranking
        .iter()
        .map(|record| record.player_name.as_str())
        .collect();
    assert_eq!(names, ["top", "tied-early", "tied-late", "bottom"]);

    let top_two = repo.list_ranking(2).await.unwrap();
    assert_eq!(top_two.len(), 2);
}

#[tokio::test]
async fn sqlite_mutations_publish_change_signals() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_feed?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut rx = repo.changes().subscribe();

    let id = repo.insert_question(&body("q", 0, 100), 1).await.unwrap();
    assert_eq!(rx.recv().await.unwrap(), TableChange::Questions);

    repo.append_score(&NewScoreRecord {
        player_name: PlayerName::new("p").unwrap(),
        score: 100,
        completed_at: fixed_now(),
    })
    .await
    .unwrap();
    assert_eq!(rx.recv().await.unwrap(), TableChange::Scores);

    repo.delete_question(id).await.unwrap();
    assert_eq!(rx.recv().await.unwrap(), TableChange::Questions);
}
