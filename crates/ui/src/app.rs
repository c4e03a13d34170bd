use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;
use crate::views::NoticeHost;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route headings live in the views.
        document::Title { "Gold Quest Academy" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
            NoticeHost {}
        }
    }
}
