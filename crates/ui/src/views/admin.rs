use dioxus::prelude::*;
use quiz_core::model::{Category, Question, QuestionId};
use services::TableChange;
use tokio::sync::broadcast::error::RecvError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionFormVm, form_error_message};

#[derive(Clone, Debug, PartialEq)]
struct AdminData {
    questions: Vec<Question>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeleteState {
    Idle,
    Deleting,
    Error(ViewError),
}

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();

    if !ctx.is_admin() {
        return rsx! {
            div { class: "page admin-page",
                section { class: "admin-denied",
                    h2 { "Restricted area" }
                    p { "The question console is only available to administrators." }
                }
            }
        };
    }

    let service = ctx.question_service();
    let mut form = use_signal(|| None::<QuestionFormVm>);
    let mut form_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);
    let mut delete_target = use_signal(|| None::<QuestionId>);
    let mut delete_state = use_signal(|| DeleteState::Idle);

    let list_service = service.clone();
    let resource = use_resource(move || {
        let service = list_service.clone();
        async move {
            let questions = service.list().await.map_err(|_| ViewError::Unknown)?;
            Ok(AdminData { questions })
        }
    });

    // Reload when another writer touches the table.
    let changes = ctx.changes();
    use_hook(move || {
        let mut rx = changes.subscribe();
        spawn(async move {
            loop {
                let reload = match rx.recv().await {
                    Ok(TableChange::Questions) => true,
                    Ok(TableChange::Scores) => false,
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
    let save_service = service.clone();
    let delete_service = service.clone();

    rsx! {
        div { class: "page admin-page",
            header { class: "view-header",
                h2 { class: "view-title", "Question console" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        form_error.set(None);
                        form.set(Some(QuestionFormVm::new()));
                    },
                    "New question"
                }
            }
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
                    if data.questions.is_empty() {
                        rsx! {
                            p { class: "admin-empty", "No questions yet. Create the first one." }
                        }
                    } else {
                        let rows = data.questions.iter().map(|question| {
                            let question = question.clone();
                            let id = question.id();
                            let edit_question = question.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { class: "admin-cell-position", "{question.order_position()}" }
                                    td { class: "admin-cell-prompt", "{question.prompt()}" }
                                    td { "{question.category().label()}" }
                                    td { "{question.difficulty().value()}" }
                                    td { "{question.souls().value()}" }
                                    td { class: "admin-cell-actions",
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            onclick: move |_| {
                                                form_error.set(None);
                                                form.set(Some(QuestionFormVm::from_question(&edit_question)));
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-danger",
                                            r#type: "button",
                                            onclick: move |_| {
                                                delete_state.set(DeleteState::Idle);
                                                delete_target.set(Some(id));
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        });
                        rsx! {
                            table { class: "admin-table",
                                thead {
                                    tr {
                                        th { "#" }
                                        th { "Prompt" }
                                        th { "Category" }
                                        th { "Difficulty" }
                                        th { "Souls" }
                                        th { "" }
                                    }
                                }
                                tbody { {rows} }
                            }
                        }
                    }
                }
            }

            if let Some(current) = form() {
                QuestionFormModal {
                    current,
                    error: form_error(),
                    saving: saving(),
                    on_close: move |()| {
                        form.set(None);
                        form_error.set(None);
                    },
                    on_change: move |updated| form.set(Some(updated)),
                    on_save: move |updated: QuestionFormVm| {
                        let service = save_service.clone();
                        let draft = match updated.to_draft() {
                            Ok(draft) => draft,
                            Err(message) => {
                                form_error.set(Some(message));
                                return;
                            }
                        };
                        let editing = updated.editing;
                        spawn(async move {
                            saving.set(true);
                            let result = match editing {
                                Some(id) => service.update(id, draft).await,
                                None => service.create(draft).await.map(|_| ()),
                            };
                            saving.set(false);
                            match result {
                                Ok(()) => {
                                    form.set(None);
                                    form_error.set(None);
                                    let mut resource = resource;
                                    resource.restart();
                                }
                                Err(err) => form_error.set(Some(form_error_message(&err))),
                            }
                        });
                    },
                }
            }

            if let Some(id) = delete_target() {
                div {
                    class: "admin-modal-overlay",
                    onclick: move |_| {
                        delete_target.set(None);
                        delete_state.set(DeleteState::Idle);
                    },
                    div {
                        class: "admin-modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "admin-modal-title", "Delete question?" }
                        p { class: "admin-modal-body",
                            "Players will no longer see it. There is no undo."
                        }
                        if let DeleteState::Error(err) = delete_state() {
                            p { class: "admin-modal-error", "{err.message()}" }
                        }
                        div { class: "admin-modal-actions",
                            button {
                                class: "btn admin-modal-cancel",
                                r#type: "button",
                                onclick: move |_| {
                                    delete_target.set(None);
                                    delete_state.set(DeleteState::Idle);
                                },
                                "Cancel"
                            }
                            button {
                                class: "btn admin-modal-confirm",
                                r#type: "button",
                                disabled: delete_state() == DeleteState::Deleting,
                                onclick: move |_| {
                                    let service = delete_service.clone();
                                    spawn(async move {
                                        delete_state.set(DeleteState::Deleting);
                                        match service.delete(id).await {
                                            Ok(()) => {
                                                delete_state.set(DeleteState::Idle);
                                                delete_target.set(None);
                                                let mut resource = resource;
                                                resource.restart();
                                            }
                                            Err(_) => {
                                                delete_state.set(DeleteState::Error(ViewError::Unknown));
                                            }
                                        }
                                    });
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionFormModal(
    current: QuestionFormVm,
    error: Option<String>,
    saving: bool,
    on_close: Callback<()>,
    on_change: Callback<QuestionFormVm>,
    on_save: Callback<QuestionFormVm>,
) -> Element {
    let title = if current.editing.is_some() {
        "Edit question"
    } else {
        "New question"
    };

    let option_fields = (0..current.options.len()).map(|index| {
        let value = current.options[index].clone();
        let checked = current.correct_index == index;
        let form_for_input = current.clone();
        let form_for_radio = current.clone();
        rsx! {
            div { key: "{index}", class: "admin-form-option",
                input {
                    r#type: "radio",
                    name: "correct-option",
                    checked,
                    onchange: move |_| {
                        let mut updated = form_for_radio.clone();
                        updated.correct_index = index;
                        on_change.call(updated);
                    },
                }
                input {
                    class: "admin-form-option-text",
                    r#type: "text",
                    placeholder: "Option {index + 1}",
                    value: "{value}",
                    oninput: move |evt| {
                        let mut updated = form_for_input.clone();
                        updated.options[index] = evt.value();
                        on_change.call(updated);
                    },
                }
            }
        }
    });

    let form_for_prompt = current.clone();
    let form_for_category = current.clone();
    let form_for_difficulty = current.clone();
    let form_for_souls = current.clone();
    let form_for_save = current.clone();

    rsx! {
        div {
            class: "admin-modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "admin-modal admin-form",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "admin-modal-title", "{title}" }
                label { class: "admin-form-label", "Prompt" }
                textarea {
                    class: "admin-form-prompt",
                    value: "{current.prompt}",
                    oninput: move |evt| {
                        let mut updated = form_for_prompt.clone();
                        updated.prompt = evt.value();
                        on_change.call(updated);
                    },
                }
                label { class: "admin-form-label", "Options (pick the correct one)" }
                {option_fields}
                div { class: "admin-form-row",
                    label { class: "admin-form-label", "Category"
                        select {
                            value: "{current.category}",
                            onchange: move |evt| {
                                let mut updated = form_for_category.clone();
                                updated.category = evt.value();
                                on_change.call(updated);
                            },
                            for category in [Category::Money, Category::Income, Category::Expenses] {
                                option { value: "{category.as_str()}", "{category.label()}" }
                            }
                        }
                    }
                    label { class: "admin-form-label", "Difficulty (1-5)"
                        input {
                            r#type: "number",
                            min: "1",
                            max: "5",
                            value: "{current.difficulty}",
                            oninput: move |evt| {
                                let mut updated = form_for_difficulty.clone();
                                updated.difficulty = evt.value();
                                on_change.call(updated);
                            },
                        }
                    }
                    label { class: "admin-form-label", "Souls (50-500)"
                        input {
                            r#type: "number",
                            min: "50",
                            max: "500",
                            step: "50",
                            value: "{current.souls}",
                            oninput: move |evt| {
                                let mut updated = form_for_souls.clone();
                                updated.souls = evt.value();
                                on_change.call(updated);
                            },
                        }
                    }
                }
                if let Some(message) = error {
                    p { class: "admin-form-error", "{message}" }
                }
                div { class: "admin-modal-actions",
                    button {
                        class: "btn admin-modal-cancel",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: saving,
                        onclick: move |_| on_save.call(form_for_save.clone()),
                        "Save"
                    }
                }
            }
        }
    }
}
