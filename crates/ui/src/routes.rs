use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{
    AchievementToast, DailyChallengeView, HomeView, LeaderboardView, ProfileView, QuizView,
    StartQuizView, use_watch,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/quiz/:category", StartQuizView)] StartQuiz { category: String },
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/daily", DailyChallengeView)] DailyChallenge {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let sink = ctx.theme();
    let theme = use_watch(move || sink.subscribe());
    let theme_class = theme.read().css_class();

    rsx! {
        div { class: "app {theme_class}",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            AchievementToast {}
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz Arena" }
            ul {
                li { Link { to: Route::Home {}, "🏠 Home" } }
                li { Link { to: Route::Quiz {}, "🧠 Quiz" } }
                li { Link { to: Route::DailyChallenge {}, "📅 Daily Challenge" } }
                li { Link { to: Route::Leaderboard {}, "🏆 Leaderboard" } }
                li { Link { to: Route::Profile {}, "👤 Profile" } }
            }
        }
    }
}
