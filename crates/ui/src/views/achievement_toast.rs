use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::use_watch;

/// Shows one unlocked achievement at a time until dismissed.
#[component]
pub fn AchievementToast() -> Element {
    let ctx = use_context::<AppContext>();
    let evaluator = ctx.achievements();
    let current = {
        let evaluator = evaluator.clone();
        use_watch(move || evaluator.subscribe())
    };

    let Some(achievement) = current() else {
        return rsx! {};
    };

    rsx! {
        div { class: "toast", role: "status",
            div { class: "toast-icon", "{achievement.icon()}" }
            div { class: "toast-body",
                h3 { "Achievement Unlocked!" }
                p { class: "toast-title", "{achievement.title()}" }
                p { "{achievement.description()}" }
                span { class: "toast-reward", "+{achievement.xp_reward()} XP" }
            }
            button {
                class: "toast-close",
                onclick: move |_| {
                    evaluator.dismiss();
                },
                "✕"
            }
        }
    }
}
