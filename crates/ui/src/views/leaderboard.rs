use dioxus::prelude::*;

use quiz_core::model::{CategoryFilter, TimeFrame};

use crate::context::AppContext;
use crate::vm::{LeaderboardRowVm, map_leaderboard_rows};

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.leaderboard();
    let mut category = use_signal(|| CategoryFilter::All);
    let mut frame = use_signal(|| TimeFrame::All);

    let category_chips: Vec<(CategoryFilter, bool)> = service
        .category_filters()
        .into_iter()
        .map(|filter| {
            let active = *category.read() == filter;
            (filter, active)
        })
        .collect();
    let frame_chips: Vec<(TimeFrame, bool)> = TimeFrame::ALL
        .into_iter()
        .map(|tf| (tf, frame() == tf))
        .collect();
    let rows = map_leaderboard_rows(&service.ranked(&category.read(), frame()));

    rsx! {
        div { class: "page leaderboard",
            h2 { "Leaderboard" }

            div { class: "filters",
                for (filter, active) in category_chips {
                    button {
                        key: "{filter.label()}",
                        class: if active { "chip active" } else { "chip" },
                        onclick: {
                            let filter = filter.clone();
                            move |_| category.set(filter.clone())
                        },
                        "{filter.label()}"
                    }
                }
            }
            div { class: "filters",
                for (tf, active) in frame_chips {
                    button {
                        key: "{tf.label()}",
                        class: if active { "chip active" } else { "chip" },
                        onclick: move |_| frame.set(tf),
                        "{tf.label()}"
                    }
                }
            }

            if rows.is_empty() {
                p { class: "empty", "No scores for this filter yet." }
            } else {
                ol { class: "leaderboard-list",
                    for row in rows {
                        LeaderboardRow { key: "{row.id}", row }
                    }
                }
            }
        }
    }
}

#[component]
fn LeaderboardRow(row: LeaderboardRowVm) -> Element {
    let class = if row.podium { "row podium" } else { "row" };
    rsx! {
        li { class: "{class}",
            span { class: "rank", "{row.rank_label}" }
            span { class: "avatar", "{row.avatar}" }
            div { class: "who",
                span { class: "name", "{row.name}" }
                span { class: "meta", "{row.category} · {row.date}" }
            }
            span { class: "streak", "🔥 {row.streak}" }
            span { class: "score", "{row.score}" }
        }
    }
}
