use std::time::Duration;

use dioxus::prelude::*;
use services::notice::{Notice, NoticeLevel};

use crate::context::AppContext;

const DISMISS_AFTER_MS: u64 = 4000;

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    notice: Notice,
}

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast toast--success",
        NoticeLevel::Error => "toast toast--error",
        NoticeLevel::Info => "toast toast--info",
    }
}

/// Drains the notice channel into a stack of self-dismissing toasts.
/// Mounted once at the app root; the receiver handoff is one-shot.
#[component]
pub fn NoticeHost() -> Element {
    let ctx = use_context::<AppContext>();
    let mut toasts = use_signal(Vec::<Toast>::new);
    let mut next_id = use_signal(|| 0u64);

    use_hook(move || {
        if let Some(mut rx) = ctx.take_notices() {
            spawn(async move {
                while let Some(notice) = rx.recv().await {
                    let id = next_id();
                    next_id.set(id + 1);
                    toasts.write().push(Toast { id, notice });
                    let mut toasts = toasts;
                    spawn(async move {
                        tokio::time::sleep(Duration::from_millis(DISMISS_AFTER_MS)).await;
                        toasts.write().retain(|toast| toast.id != id);
                    });
                }
            });
        }
    });

    rsx! {
        div { class: "toast-stack",
            for toast in toasts() {
                div {
                    key: "{toast.id}",
                    class: level_class(toast.notice.level),
                    onclick: {
                        let id = toast.id;
                        move |_| toasts.write().retain(|toast| toast.id != id)
                    },
                    strong { class: "toast-title", "{toast.notice.title}" }
                    if !toast.notice.body.is_empty() {
                        span { class: "toast-body", "{toast.notice.body}" }
                    }
                }
            }
        }
    }
}
