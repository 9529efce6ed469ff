use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::Category;
use quiz_core::time::fixed_clock;
use services::{
    AchievementEvaluator, AppServices, ChallengeService, LeaderboardService, ProgressStore,
    QuizConfig, QuizController, WatchThemeSink,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AchievementToast, DailyChallengeView, HomeView, LeaderboardView, ProfileView, QuizView,
    StartQuizView,
};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn progress(&self) -> Arc<ProgressStore> {
        self.services.progress()
    }

    fn achievements(&self) -> Arc<AchievementEvaluator> {
        self.services.achievements()
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        self.services.leaderboard()
    }

    fn challenges(&self) -> Arc<ChallengeService> {
        self.services.challenges()
    }

    fn theme(&self) -> Arc<WatchThemeSink> {
        self.services.theme()
    }

    fn categories(&self) -> Arc<[Category]> {
        self.services.categories()
    }

    fn quiz_controller(&self) -> QuizController {
        self.services.quiz_controller()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    StartQuiz(&'static str),
    Leaderboard,
    Profile,
    DailyChallenge,
    Toast,
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

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
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
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::StartQuiz(category) => rsx! { StartQuizView { category: category.to_string() } },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::DailyChallenge => rsx! { DailyChallengeView {} },
        ViewKind::Toast => rsx! { AchievementToast {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned work settle across a few render passes.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            self.drive_async().await;
        }
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

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(&storage, fixed_clock(), QuizConfig::default())
        .await
        .expect("app services");
    let app = Arc::new(TestApp {
        services: services.clone(),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, services }
}
