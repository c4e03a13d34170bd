use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{AdminView, QuizView, RankingView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/ranking", RankingView)] Ranking {},
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "app",
            nav { class: "topbar",
                h1 { class: "topbar-title", "Gold Quest Academy" }
                ul { class: "topbar-links",
                    li { Link { to: Route::Quiz {}, "Quest" } }
                    li { Link { to: Route::Ranking {}, "Ranking" } }
                    if ctx.is_admin() {
                        li { Link { to: Route::Admin {}, "Admin" } }
                    }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
