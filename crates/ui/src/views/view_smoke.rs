use quiz_core::model::PlayerName;
use quiz_core::time::fixed_now;
use storage::repository::NewScoreRecord;
use storage::seed::seed_default_questions;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_start_screen() {
    let mut harness = setup_view_harness(ViewKind::Quiz, false);
    seed_default_questions(harness.storage.questions.as_ref())
        .await
        .expect("seed questions");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("10 questions stand between you and 2450 Souls."),
        "missing pot line in {html}"
    );
    assert!(html.contains("Begin the Quest"), "missing cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Quiz, false);

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("No questions are available yet."),
        "missing empty message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn ranking_view_smoke_renders_rows() {
    let mut harness = setup_view_harness(ViewKind::Ranking, false);
    let now = fixed_now();
    for (name, score) in [("Solaire", 2450u32), ("Siegward", 850)] {
        harness
            .storage
            .scores
            .append_score(&NewScoreRecord {
                player_name: PlayerName::new(name).unwrap(),
                score,
                completed_at: now,
            })
            .await
            .expect("append score");
    }

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Hall of Legends"), "missing title in {html}");
    assert!(html.contains("Solaire"), "missing top row in {html}");
    assert!(html.contains("2450 Souls"), "missing score in {html}");
    assert!(html.contains("Finance Master"), "missing rank in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn ranking_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Ranking, false);

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("No scores yet."),
        "missing empty message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_denies_without_gate() {
    let mut harness = setup_view_harness(ViewKind::Admin, false);

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Restricted area"), "missing denial in {html}");
    assert!(!html.contains("Question console"), "console leaked: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_renders_question_table() {
    let mut harness = setup_view_harness(ViewKind::Admin, true);
    seed_default_questions(harness.storage.questions.as_ref())
        .await
        .expect("seed questions");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question console"), "missing title in {html}");
    assert!(html.contains("New question"), "missing cta in {html}");
    // First seeded prompt shows up in the table.
    assert!(
        html.contains("O que é dinheiro na analogia de um jogo Souls-like?"),
        "missing seeded prompt in {html}"
    );
}
