use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::time::fixed_now;
use services::notice::Notice;
use services::{
    AppServices, ChangeFeed, Clock, NullSink, QuestionService, QuizLoopService, RankingService,
};
use storage::repository::Storage;
use tokio::sync::mpsc;

use crate::auth::{AuthGate, StaticAuthGate};
use crate::context::{UiApp, build_app_context};
use crate::views::{AdminView, QuizView, RankingView};

struct TestApp {
    services: AppServices,
    auth: Arc<StaticAuthGate>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn question_service(&self) -> Arc<QuestionService> {
        self.services.question_service()
    }

    fn ranking(&self) -> Arc<RankingService> {
        self.services.ranking()
    }

    fn changes(&self) -> ChangeFeed {
        self.services.changes().clone()
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn auth(&self) -> Arc<dyn AuthGate> {
        self.auth.clone()
    }

    fn take_notices(&self) -> Option<mpsc::UnboundedReceiver<Notice>> {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Ranking,
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! {
        Router::<TestRoute> {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Ranking => rsx! { RankingView {} },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, is_admin: bool) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(
        &storage,
        Clock::fixed(fixed_now()),
        Arc::new(NullSink),
    );
    let app = Arc::new(TestApp {
        services,
        auth: StaticAuthGate::new(is_admin),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, storage }
}
