use std::time::Duration;

use dioxus::prelude::*;
use quiz_core::session::Phase;
use services::{REVEAL_DELAY_MS, TableChange};
use tokio::sync::broadcast::error::RecvError;

use crate::context::AppContext;
use crate::views::{RankingPanel, ViewError};
use crate::vm::{QuizVm, load_quiz};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let mut vm = use_signal(|| None::<QuizVm>);
    let mut load_error = use_signal(|| None::<ViewError>);
    let mut name_input = use_signal(String::new);

    // Initial load, then keep the start screen in sync with admin edits.
    // A run already in flight keeps the set it started with.
    let changes = ctx.changes();
    let loader = quiz_loop.clone();
    use_hook(move || {
        let mut rx = changes.subscribe();
        spawn(async move {
            match load_quiz(&loader).await {
                Ok(loaded) => vm.set(Some(loaded)),
                Err(err) => load_error.set(Some(err)),
            }
            loop {
                let resync = match rx.recv().await {
                    Ok(TableChange::Questions) => true,
                    Ok(TableChange::Scores) => false,
                    // Missed signals carry no payload anyway; reload once.
                    Err(RecvError::Lagged(_)) => true,
                    Err(RecvError::Closed) => break,
                };
                let at_start = vm.peek().as_ref().is_none_or(|v| v.phase() == Phase::Start);
                if resync && at_start {
                    if let Ok(loaded) = load_quiz(&loader).await {
                        vm.set(Some(loaded));
                        load_error.set(None);
                    }
                }
            }
        });
    });

    let retry_loop = quiz_loop.clone();
    let body = if let Some(err) = load_error() {
        rsx! {
            p { class: "quiz-error", "{err.message()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| {
                    let quiz_loop = retry_loop.clone();
                    spawn(async move {
                        match load_quiz(&quiz_loop).await {
                            Ok(loaded) => {
                                vm.set(Some(loaded));
                                load_error.set(None);
                            }
                            Err(err) => load_error.set(Some(err)),
                        }
                    });
                },
                "Retry"
            }
        }
    } else if let Some(current) = vm() {
        match current.phase() {
            Phase::Start => start_screen(&current, vm, name_input, &ctx),
            Phase::Playing => question_screen(&current, vm, &ctx),
            Phase::Finished => finished_screen(&current, vm, &ctx),
            Phase::Ranking => ranking_screen(&current, vm, &ctx),
        }
    } else {
        rsx! {
            p { "Loading..." }
        }
    };

    rsx! {
        div { class: "page quiz-page", {body} }
    }
}

fn start_screen(
    current: &QuizVm,
    mut vm: Signal<Option<QuizVm>>,
    mut name_input: Signal<String>,
    ctx: &AppContext,
) -> Element {
    let quiz_loop = ctx.quiz_loop();
    let question_count = current.question_count();
    let pot = current.souls_on_offer();
    let begin = move |_| {
        let name = name_input();
        if let Some(v) = vm.write().as_mut() {
            let _ = v.begin(&quiz_loop, &name);
        }
    };

    rsx! {
        section { class: "quest-start",
            h2 { class: "quest-title", "The Financial Quest" }
            p { class: "quest-subtitle",
                "{question_count} questions stand between you and {pot} Souls."
            }
            if question_count == 0 {
                p { class: "quest-empty", "No questions are available yet. Check back soon." }
            }
            form {
                class: "quest-start-form",
                onsubmit: begin,
                input {
                    class: "quest-name-input",
                    r#type: "text",
                    placeholder: "Your name, adventurer",
                    value: "{name_input()}",
                    oninput: move |evt| name_input.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: question_count == 0,
                    "Begin the Quest"
                }
            }
        }
    }
}

fn question_screen(current: &QuizVm, mut vm: Signal<Option<QuizVm>>, ctx: &AppContext) -> Element {
    let quiz_loop = ctx.quiz_loop();
    let Some(question) = current.question() else {
        // Unreachable while Playing; render a safe fallback regardless.
        return rsx! {
            p { "Loading..." }
        };
    };

    let progress = current.progress_label();
    let total = current.total_souls();
    let category = question.category().label();
    let difficulty = "★".repeat(usize::from(question.difficulty().value()));
    let reward = question.souls().value();
    let reveal_open = current.selected_answer().is_some();

    let options = question.options().iter().enumerate().map(|(index, text)| {
        let text = text.clone();
        let class = current.option_class(index);
        let quiz_loop = quiz_loop.clone();
        rsx! {
            button {
                key: "{index}",
                class: "{class}",
                r#type: "button",
                disabled: reveal_open,
                onclick: move |_| {
                    let outcome = match vm.write().as_mut() {
                        Some(v) => v.choose(&quiz_loop, index),
                        None => None,
                    };
                    if outcome.is_some() {
                        spawn(async move {
                            tokio::time::sleep(Duration::from_millis(REVEAL_DELAY_MS)).await;
                            if let Some(v) = vm.write().as_mut() {
                                v.advance();
                            }
                        });
                    }
                },
                "{text}"
            }
        }
    });

    rsx! {
        section { class: "question-card",
            header { class: "question-header",
                span { class: "question-progress", "{progress}" }
                span { class: "question-souls", "{total} Souls" }
            }
            div { class: "question-badges",
                span { class: "badge badge-category", "{category}" }
                span { class: "badge badge-difficulty", "{difficulty}" }
                span { class: "badge badge-reward", "+{reward} Souls" }
            }
            h2 { class: "question-prompt", "{question.prompt()}" }
            div { class: "question-options", {options} }
        }
    }
}

fn finished_screen(current: &QuizVm, mut vm: Signal<Option<QuizVm>>, ctx: &AppContext) -> Element {
    let quiz_loop = ctx.quiz_loop();
    let name = current.player_name().unwrap_or("adventurer").to_string();
    let total = current.total_souls();
    let pot = current.souls_on_offer();
    let rank = current.rank();

    rsx! {
        section { class: "quest-result",
            h2 { class: "quest-result-title", "Quest complete, {name}!" }
            p { class: "quest-result-souls", "{total} of {pot} Souls collected" }
            p { class: "quest-result-rank {rank.emphasis_class()}", "{rank.label()}" }
            div { class: "quest-result-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let quiz_loop = quiz_loop.clone();
                        spawn(async move {
                            let mut taken = vm.peek().clone();
                            if let Some(v) = taken.as_mut() {
                                v.finish(&quiz_loop).await;
                                if snapshot_still_current(vm.peek().as_ref(), Phase::Finished) {
                                    vm.set(taken);
                                }
                            }
                        });
                    },
                    "See the leaderboard"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        if let Some(v) = vm.write().as_mut() {
                            v.restart();
                        }
                    },
                    "Play again"
                }
            }
        }
    }
}

fn ranking_screen(current: &QuizVm, mut vm: Signal<Option<QuizVm>>, ctx: &AppContext) -> Element {
    let quiz_loop = ctx.quiz_loop();
    let name = current.player_name().map(str::to_string);
    let total = current.total_souls();
    let saved = current.score_saved();

    rsx! {
        section { class: "quest-ranking",
            if !saved {
                div { class: "save-warning",
                    p { "Your score could not be stored." }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let quiz_loop = quiz_loop.clone();
                            spawn(async move {
                                let mut taken = vm.peek().clone();
                                if let Some(v) = taken.as_mut() {
                                    let _ = v.retry_save(&quiz_loop).await;
                                    if snapshot_still_current(vm.peek().as_ref(), Phase::Ranking) {
                                        vm.set(taken);
                                    }
                                }
                            });
                        },
                        "Submit score again"
                    }
                }
            }
            RankingPanel { current_name: name, current_score: Some(total) }
            button {
                class: "btn btn-primary quest-ranking-again",
                r#type: "button",
                onclick: move |_| {
                    if let Some(v) = vm.write().as_mut() {
                        v.restart();
                    }
                },
                "Play again"
            }
        }
    }
}

/// A click handler that awaits works on a snapshot of the run. Commit
/// the snapshot only while the live run is still in the phase the click
/// was made in; a restart that lands mid-await keeps its fresh state.
fn snapshot_still_current(live: Option<&QuizVm>, phase_at_click: Phase) -> bool {
    live.is_some_and(|v| v.phase() == phase_at_click)
}

#[cfg(test)]
mod tests {
    use quiz_core::model::{Category, QuestionDraft, QuestionId};
    use quiz_core::session::QuizSession;

    use super::*;

    fn finished_vm() -> QuizVm {
        let question = QuestionDraft {
            prompt: "What is a budget?".into(),
            options: ["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index: 0,
            category: Category::Money,
            difficulty: 1,
            souls: 100,
        }
        .validate()
        .unwrap()
        .assign(QuestionId::new(1), 1);

        let mut session = QuizSession::new(vec![question]);
        session.begin("Solaire").unwrap();
        session.submit_answer(0).unwrap();
        session.advance();
        assert_eq!(session.phase(), Phase::Finished);
        QuizVm::new(session)
    }

    #[test]
    fn unchanged_run_commits_the_snapshot() {
        let live = finished_vm();
        assert!(snapshot_still_current(Some(&live), Phase::Finished));
    }

    #[test]
    fn restart_during_the_await_drops_the_snapshot() {
        let mut live = finished_vm();
        live.restart();
        assert_eq!(live.phase(), Phase::Start);
        assert!(!snapshot_still_current(Some(&live), Phase::Finished));
        assert!(!snapshot_still_current(None, Phase::Finished));
    }
}
