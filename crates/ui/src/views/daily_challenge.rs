use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::ChallengeId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{ChallengeCardVm, map_challenge_cards};

#[component]
pub fn DailyChallengeView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.challenges();
    let navigator = use_navigator();
    let mut selected = use_signal(|| None::<ChallengeCardVm>);
    let mut notice = use_signal(|| None::<String>);

    let cards = map_challenge_cards(service.list());
    let choose = use_callback(move |id: ChallengeId| match service.select(id) {
        Ok(challenge) => {
            selected.set(Some(ChallengeCardVm::from(challenge)));
            notice.set(None);
        }
        Err(err) => notice.set(Some(err.to_string())),
    });

    rsx! {
        div { class: "page daily",
            h2 { "Daily Challenges" }
            p { class: "subtitle", "Complete special challenges to earn bonus rewards." }

            if let Some(message) = notice() {
                p { class: "error", "{message}" }
            }

            div { class: "challenge-grid",
                for card in cards {
                    ChallengeCard { key: "{card.id}", card, on_select: choose }
                }
            }

            if let Some(challenge) = selected() {
                div { class: "challenge-details",
                    h3 { "Challenge Details" }
                    p { class: "title", "{challenge.title}" }
                    p { "{challenge.description}" }
                    p { class: "meta", "Reward: {challenge.reward}" }
                    p { class: "meta", "Time limit: {challenge.time_label}" }
                    div { class: "actions",
                        button {
                            class: "btn primary",
                            onclick: move |_| {
                                selected.set(None);
                                navigator.push(Route::Quiz {});
                            },
                            "Start Now"
                        }
                        button { class: "btn", onclick: move |_| selected.set(None), "Cancel" }
                    }
                }
            }
        }
    }
}

#[component]
fn ChallengeCard(card: ChallengeCardVm, on_select: EventHandler<ChallengeId>) -> Element {
    let class = if card.completed {
        "challenge-card completed"
    } else {
        "challenge-card"
    };
    let id = card.id;

    rsx! {
        div { class: "{class}",
            h3 { "{card.title}" }
            if card.completed {
                span { class: "status", "✓" }
            }
            p { "{card.description}" }
            p { class: "meta", "🎯 {card.questions_label} · ⏱ {card.time_label}" }
            p { class: "reward", "🎁 {card.reward}" }
            button {
                class: "btn",
                disabled: card.completed,
                onclick: move |_| on_select.call(id),
                if card.completed { "Completed" } else { "Start Challenge" }
            }
        }
    }
}
