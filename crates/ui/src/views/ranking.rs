use dioxus::prelude::*;
use quiz_core::Rank;
use quiz_core::model::ScoreRecord;
use services::{TableChange, is_current_player};
use tokio::sync::broadcast::error::RecvError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::format_completed_at;

const RANKING_LIMIT: u32 = 50;

#[derive(Clone, Debug, PartialEq)]
struct RankingData {
    rows: Vec<ScoreRecord>,
}

#[component]
pub fn RankingView() -> Element {
    rsx! {
        div { class: "page ranking-page",
            RankingPanel { current_name: None, current_score: None }
        }
    }
}

/// The live leaderboard. Embedded both as its own route and at the end of
/// a quiz run, where the caller passes the just-played name and score so
/// the matching row gets highlighted.
#[component]
pub fn RankingPanel(current_name: Option<String>, current_score: Option<u32>) -> Element {
    let ctx = use_context::<AppContext>();
    let ranking = ctx.ranking();

    let resource = use_resource(move || {
        let ranking = ranking.clone();
        async move {
            let rows = ranking
                .ranking(RANKING_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(RankingData { rows })
        }
    });

    // Every score append reloads the whole board; the signal carries no
    // row data.
    let changes = ctx.changes();
    use_hook(move || {
        let mut rx = changes.subscribe();
        spawn(async move {
            loop {
                let reload = match rx.recv().await {
                    Ok(TableChange::Scores) => true,
                    Ok(TableChange::Questions) => false,
                    Err(RecvError::Lagged(_)) => true,
                    Err(RecvError::Closed) => break,
                };
                if reload {
                    let mut resource = resource;
                    resource.restart();
                }
            }
        });
    });

    let state = view_state_from_resource(&resource);
    let now = ctx.clock().now();

    rsx! {
        section { class: "ranking-panel",
            h2 { class: "ranking-title", "Hall of Legends" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => {
                    if data.rows.is_empty() {
                        rsx! {
                            p { class: "ranking-empty", "No scores yet. Be the first legend." }
                        }
                    } else {
                        let rows = data.rows.iter().enumerate().map(|(position, record)| {
                            let is_me = match (current_name.as_deref(), current_score) {
                                (Some(name), Some(score)) => {
                                    is_current_player(record, name, score, now)
                                }
                                _ => false,
                            };
                            let row_class = if is_me {
                                "ranking-row ranking-row--me"
                            } else {
                                "ranking-row"
                            };
                            let rank = Rank::for_souls(record.score);
                            let when = format_completed_at(record.completed_at);
                            rsx! {
                                li { key: "{record.id}", class: "{row_class}",
                                    span { class: "ranking-position", "{position + 1}" }
                                    span { class: "ranking-name", "{record.player_name}" }
                                    span { class: "ranking-rank {rank.emphasis_class()}",
                                        "{rank.label()}"
                                    }
                                    span { class: "ranking-score", "{record.score} Souls" }
                                    span { class: "ranking-when", "{when}" }
                                }
                            }
                        });
                        rsx! {
                            ol { class: "ranking-rows", {rows} }
                        }
                    }
                }
            }
        }
    }
}
