use std::sync::Arc;

use dioxus::prelude::*;

use quiz_core::model::SettingName;

use crate::context::AppContext;
use crate::views::use_watch;
use crate::vm::{AchievementVm, ProfileVm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProfileTab {
    Statistics,
    Achievements,
    Settings,
}

impl ProfileTab {
    const ALL: [Self; 3] = [Self::Statistics, Self::Achievements, Self::Settings];

    fn label(self) -> &'static str {
        match self {
            Self::Statistics => "Statistics",
            Self::Achievements => "Achievements",
            Self::Settings => "Settings",
        }
    }
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = ctx.progress();
    let progress = {
        let store = Arc::clone(&store);
        use_watch(move || store.subscribe())
    };
    let mut tab = use_signal(|| ProfileTab::Statistics);

    let toggle = use_callback(move |name: SettingName| {
        let store = Arc::clone(&store);
        spawn(async move {
            let value = store.toggle_setting(name).await;
            tracing::debug!(setting = name.key(), value, "setting toggled");
        });
    });

    let vm = ProfileVm::from(&*progress.read());
    let tabs: Vec<(ProfileTab, bool)> = ProfileTab::ALL
        .into_iter()
        .map(|t| (t, tab() == t))
        .collect();

    rsx! {
        div { class: "page profile",
            div { class: "profile-header",
                div { class: "level-badge", "Lv {vm.level}" }
                div { class: "level-info",
                    h2 { "Your Profile" }
                    div { class: "level-bar",
                        div { class: "level-fill", style: "width: {vm.level_percent}%" }
                    }
                    p { class: "level-label", "{vm.xp_label}" }
                }
            }

            div { class: "tabs",
                for (t, active) in tabs {
                    button {
                        key: "{t.label()}",
                        class: if active { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(t),
                        "{t.label()}"
                    }
                }
            }

            match tab() {
                ProfileTab::Statistics => rsx! {
                    div { class: "stats",
                        div { class: "stat-card",
                            span { class: "stat-value", "{vm.total_xp}" }
                            span { class: "stat-label", "Total XP" }
                        }
                        div { class: "stat-card",
                            span { class: "stat-value", "{vm.streak}" }
                            span { class: "stat-label", "Current streak" }
                        }
                        div { class: "stat-card",
                            span { class: "stat-value", "{vm.max_streak}" }
                            span { class: "stat-label", "Best streak" }
                        }
                        div { class: "stat-card",
                            span { class: "stat-value", "{vm.achievements_label}" }
                            span { class: "stat-label", "Achievements" }
                        }
                    }
                    h3 { "Power-ups" }
                    ul { class: "inventory",
                        for item in vm.power_ups.clone() {
                            li { key: "{item.label}",
                                span { class: "icon", "{item.icon}" }
                                div {
                                    strong { "{item.label}" }
                                    p { "{item.description}" }
                                }
                                span { class: "count", "×{item.count}" }
                            }
                        }
                    }
                },
                ProfileTab::Achievements => rsx! {
                    ul { class: "achievements",
                        for achievement in vm.achievements.clone() {
                            AchievementRow { key: "{achievement.title}", achievement }
                        }
                    }
                },
                ProfileTab::Settings => rsx! {
                    ul { class: "settings",
                        for setting in vm.settings.clone() {
                            li { key: "{setting.label}",
                                span { "{setting.label}" }
                                button {
                                    class: if setting.enabled { "toggle on" } else { "toggle" },
                                    onclick: move |_| toggle.call(setting.name),
                                    if setting.enabled { "On" } else { "Off" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn AchievementRow(achievement: AchievementVm) -> Element {
    let class = if achievement.unlocked {
        "achievement unlocked"
    } else {
        "achievement locked"
    };
    rsx! {
        li { class: "{class}",
            span { class: "icon", "{achievement.icon}" }
            div { class: "details",
                strong { "{achievement.title}" }
                p { "{achievement.description}" }
                if let Some(percent) = achievement.progress_percent {
                    div { class: "progress-bar",
                        div { class: "progress-fill", style: "width: {percent}%" }
                    }
                    span { class: "progress-label", "{percent}%" }
                }
            }
            span { class: "reward", "{achievement.reward_label}" }
            if achievement.unlocked {
                span { class: "status", "✓ Unlocked" }
            }
        }
    }
}
