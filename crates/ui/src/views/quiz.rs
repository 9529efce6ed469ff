use std::rc::Rc;

use dioxus::prelude::*;

use quiz_core::model::{CategoryId, PowerUpKind};

use crate::context::AppContext;
use crate::views::use_watch;
use crate::vm::{
    CategoryCardVm, PowerUpButtonVm, QuestionVm, QuizScreen, SummaryVm, map_category_cards,
    map_power_up_buttons, quiz_screen,
};

#[component]
pub fn QuizView() -> Element {
    rsx! {
        QuizPage {}
    }
}

/// Quiz page that starts `category` right away.
#[component]
pub fn StartQuizView(category: String) -> Element {
    rsx! {
        QuizPage { autostart: category }
    }
}

#[component]
fn QuizPage(autostart: Option<String>) -> Element {
    let ctx = use_context::<AppContext>();
    // Dropped with the component, which stops its timers.
    let controller = use_hook(|| Rc::new(ctx.quiz_controller()));
    let snapshot = {
        let controller = Rc::clone(&controller);
        use_watch(move || controller.subscribe())
    };
    let progress = {
        let store = ctx.progress();
        use_watch(move || store.subscribe())
    };
    let error = use_signal(|| None::<String>);

    let select = {
        let controller = Rc::clone(&controller);
        use_callback(move |id: CategoryId| {
            let controller = Rc::clone(&controller);
            let mut error = error;
            spawn(async move {
                match controller.select_category(&id).await {
                    Ok(_) => error.set(None),
                    Err(err) => {
                        tracing::warn!(category = %id, error = %err, "could not start quiz");
                        error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    let submit = {
        let controller = Rc::clone(&controller);
        use_callback(move |choice: String| {
            let controller = Rc::clone(&controller);
            spawn(async move {
                controller.submit_answer(&choice).await;
            });
        })
    };

    let use_power_up = {
        let controller = Rc::clone(&controller);
        use_callback(move |kind: PowerUpKind| {
            let controller = Rc::clone(&controller);
            spawn(async move {
                controller.use_power_up(kind).await;
            });
        })
    };

    let choose_category = {
        let controller = Rc::clone(&controller);
        use_callback(move |()| {
            let controller = Rc::clone(&controller);
            spawn(async move {
                controller.reset().await;
            });
        })
    };

    let play_again = {
        let controller = Rc::clone(&controller);
        use_callback(move |id: CategoryId| {
            let controller = Rc::clone(&controller);
            let mut error = error;
            spawn(async move {
                controller.reset().await;
                if let Err(err) = controller.select_category(&id).await {
                    error.set(Some(err.to_string()));
                }
            });
        })
    };

    use_hook(move || {
        if let Some(raw) = autostart {
            select.call(CategoryId::new(raw));
        }
    });

    let screen = quiz_screen(&snapshot.read());
    let buttons = map_power_up_buttons(&snapshot.read(), progress.read().power_ups());
    let categories = map_category_cards(controller.categories());

    rsx! {
        div { class: "page quiz",
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            match screen {
                QuizScreen::PickCategory => rsx! {
                    CategoryPicker { categories, on_select: select }
                },
                QuizScreen::Question(question) => rsx! {
                    QuestionCard { question, on_answer: submit }
                    PowerUpBar { buttons, on_use: use_power_up }
                },
                QuizScreen::Summary(summary) => rsx! {
                    SummaryPanel { summary, on_play_again: play_again, on_choose: choose_category }
                },
            }
        }
    }
}

#[component]
fn CategoryPicker(categories: Vec<CategoryCardVm>, on_select: EventHandler<CategoryId>) -> Element {
    rsx! {
        h2 { "Choose a category" }
        div { class: "category-grid",
            for card in categories {
                button {
                    key: "{card.id}",
                    class: "category-card",
                    onclick: {
                        let id = card.id.clone();
                        move |_| on_select.call(id.clone())
                    },
                    span { class: "icon", "{card.icon}" }
                    h3 { "{card.name}" }
                    p { "{card.questions_label}" }
                }
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, on_answer: EventHandler<String>) -> Element {
    let timer = question.timer.clone();
    let timer_class = if timer.as_ref().is_some_and(|t| t.urgent) {
        "timer urgent"
    } else {
        "timer"
    };
    let feedback = question.feedback.clone();
    let feedback_class = if feedback.as_ref().is_some_and(|f| f.correct) {
        "feedback correct"
    } else {
        "feedback incorrect"
    };

    rsx! {
        div { class: "question-card",
            div { class: "question-header",
                span { class: "category", "{question.category_label}" }
                span { class: "progress", "{question.progress_label}" }
                span { class: "score", "Score: {question.score}" }
                span { class: "streak", "🔥 {question.streak}" }
            }
            if let Some(timer) = timer {
                div { class: "{timer_class}",
                    div { class: "timer-fill", style: "width: {timer.percent}%" }
                    span { class: "timer-label", "{timer.label}" }
                }
            }
            if question.double_points_armed {
                p { class: "badge", "✨ Double points armed" }
            }
            h3 { class: "prompt", "{question.prompt}" }
            div { class: "options",
                for option in question.options.clone() {
                    button {
                        key: "{option.label}",
                        class: option.state.class(),
                        disabled: !option.enabled,
                        onclick: {
                            let label = option.label.clone();
                            move |_| on_answer.call(label.clone())
                        },
                        "{option.label}"
                    }
                }
            }
            if let Some(feedback) = feedback {
                p { class: "{feedback_class}", "{feedback.message}" }
            }
        }
    }
}

#[component]
fn PowerUpBar(buttons: Vec<PowerUpButtonVm>, on_use: EventHandler<PowerUpKind>) -> Element {
    rsx! {
        div { class: "power-ups",
            for item in buttons {
                button {
                    key: "{item.label}",
                    class: "power-up",
                    disabled: !item.enabled,
                    onclick: {
                        let kind = item.kind;
                        move |_| on_use.call(kind)
                    },
                    "{item.icon} {item.label} ×{item.count}"
                }
            }
        }
    }
}

#[component]
fn SummaryPanel(
    summary: SummaryVm,
    on_play_again: EventHandler<CategoryId>,
    on_choose: EventHandler<()>,
) -> Element {
    let category_id = summary.category_id.clone();

    rsx! {
        div { class: "summary-card",
            h2 { "Quiz Complete!" }
            p { class: "headline", "{summary.headline}" }
            div { class: "summary-stats",
                div { class: "stat-card",
                    span { class: "stat-value", "{summary.score_label}" }
                    span { class: "stat-label", "Score" }
                }
                div { class: "stat-card",
                    span { class: "stat-value", "{summary.accuracy_label}" }
                    span { class: "stat-label", "Accuracy" }
                }
                div { class: "stat-card",
                    span { class: "stat-value", "{summary.max_streak}" }
                    span { class: "stat-label", "Best streak" }
                }
                div { class: "stat-card",
                    span { class: "stat-value", "+{summary.xp_earned}" }
                    span { class: "stat-label", "XP earned" }
                }
            }
            if summary.skipped > 0 || summary.timed_out > 0 {
                p { class: "summary-note",
                    "Skipped: {summary.skipped} · Timed out: {summary.timed_out}"
                }
            }
            div { class: "actions",
                button {
                    class: "btn primary",
                    onclick: move |_| on_play_again.call(category_id.clone()),
                    "Play Again"
                }
                button { class: "btn", onclick: move |_| on_choose.call(()), "Choose Category" }
            }
        }
    }
}
