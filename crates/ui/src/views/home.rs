use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::use_watch;
use crate::vm::{ProfileVm, map_category_cards};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = ctx.progress();
    let progress = use_watch(move || store.subscribe());
    let vm = ProfileVm::from(&*progress.read());
    let categories = map_category_cards(&ctx.categories());

    rsx! {
        div { class: "page home",
            h2 { "Welcome to Quiz Arena" }
            p { class: "subtitle", "Test your knowledge, build streaks and climb the ranks." }

            div { class: "stats",
                StatCard { label: "Level", value: vm.level.to_string() }
                StatCard { label: "Total XP", value: vm.total_xp.to_string() }
                StatCard { label: "Streak", value: format!("🔥 {}", vm.streak) }
                StatCard { label: "Achievements", value: vm.achievements_label.clone() }
            }

            div { class: "level-bar",
                div { class: "level-fill", style: "width: {vm.level_percent}%" }
            }
            p { class: "level-label", "{vm.xp_label}" }

            div { class: "actions",
                Link { class: "btn primary", to: Route::Quiz {}, "Start Quiz" }
                Link { class: "btn", to: Route::DailyChallenge {}, "Daily Challenge" }
            }

            h3 { "Quick play" }
            div { class: "category-grid",
                for card in categories {
                    Link {
                        key: "{card.id}",
                        class: "category-card",
                        to: Route::StartQuiz { category: card.id.as_str().to_string() },
                        span { class: "icon", "{card.icon}" }
                        h4 { "{card.name}" }
                        p { "{card.questions_label}" }
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}
