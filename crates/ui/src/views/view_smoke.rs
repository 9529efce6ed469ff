use quiz_core::model::{CategoryId, QuizSummary};
use services::EvaluationTrigger;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_progress_and_categories() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.services.progress().add_xp(250).await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("250 / 400 XP"), "missing xp label in {html}");
    assert!(html.contains("General Knowledge"), "missing category in {html}");
    assert!(html.contains("Start Quiz"), "missing entry point in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_lists_categories() {
    let mut harness = setup_view_harness(ViewKind::Quiz).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Choose a category"), "missing title in {html}");
    assert!(html.contains("Science"), "missing category in {html}");
    assert!(html.contains("2 questions"), "missing count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn start_quiz_view_smoke_shows_first_question() {
    let mut harness = setup_view_harness(ViewKind::StartQuiz("science")).await;
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("What is the chemical symbol for water?"),
        "missing prompt in {html}"
    );
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Extra Time"), "missing power-ups in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn start_quiz_view_smoke_reports_unknown_category() {
    let mut harness = setup_view_harness(ViewKind::StartQuiz("geology")).await;
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("unknown category: geology"), "missing error in {html}");
    assert!(html.contains("Choose a category"), "missing picker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_ranks_rows() {
    let mut harness = setup_view_harness(ViewKind::Leaderboard).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Alex Johnson"), "missing leader in {html}");
    assert!(html.contains("🥇"), "missing medal in {html}");
    assert!(html.contains("#4"), "missing rank in {html}");
    assert!(html.contains("Week"), "missing time frame in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_statistics() {
    let mut harness = setup_view_harness(ViewKind::Profile).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Your Profile"), "missing title in {html}");
    assert!(html.contains("Lv 1"), "missing level in {html}");
    assert!(html.contains("Double Points"), "missing inventory in {html}");
    assert!(html.contains("Achievements"), "missing tab in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn daily_challenge_view_smoke_marks_completed() {
    let mut harness = setup_view_harness(ViewKind::DailyChallenge).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Science Sprint"), "missing challenge in {html}");
    assert!(html.contains("Completed"), "missing completed state in {html}");
    assert!(html.contains("Start Challenge"), "missing start button in {html}");
    assert!(html.contains("2:00"), "missing time limit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn achievement_toast_smoke_shows_first_unlock() {
    let mut harness = setup_view_harness(ViewKind::Toast).await;
    let summary = QuizSummary::new(CategoryId::new("science"), 2, 2, 2, 2, 0, 0, 20).unwrap();
    harness
        .services
        .achievements()
        .evaluate(EvaluationTrigger::QuizCompleted(&summary))
        .await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Achievement Unlocked!"), "missing toast in {html}");
    assert!(html.contains("First Steps"), "missing title in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn achievement_toast_smoke_is_empty_without_unlocks() {
    let mut harness = setup_view_harness(ViewKind::Toast).await;
    harness.rebuild();
    let html = harness.render();
    assert!(!html.contains("Achievement Unlocked!"), "unexpected toast in {html}");
}
