//! Display models for the quiz screen, derived from [`QuizSnapshot`].

use quiz_core::model::{Category, CategoryId, PowerUpKind, PowerUps, QuizSummary};
use services::{AnswerRecord, QuizPhase, QuizSnapshot};

use crate::vm::time_fmt::format_clock;

/// Seconds at which the timer bar turns urgent.
const URGENT_SECS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCardVm {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    pub questions_label: String,
}

impl From<&Category> for CategoryCardVm {
    fn from(category: &Category) -> Self {
        let count = category.question_count();
        Self {
            id: category.id().clone(),
            name: category.name().to_string(),
            icon: category.icon().to_string(),
            questions_label: questions_label(count),
        }
    }
}

#[must_use]
pub fn map_category_cards(categories: &[Category]) -> Vec<CategoryCardVm> {
    categories.iter().map(CategoryCardVm::from).collect()
}

fn questions_label(count: usize) -> String {
    if count == 1 {
        "1 question".to_string()
    } else {
        format!("{count} questions")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Open,
    Correct,
    /// The player's wrong pick.
    Incorrect,
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "option",
            Self::Correct => "option correct",
            Self::Incorrect => "option incorrect",
            Self::Dimmed => "option dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub state: OptionState,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub label: String,
    pub percent: u32,
    pub urgent: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub message: String,
}

impl From<&AnswerRecord> for FeedbackVm {
    fn from(record: &AnswerRecord) -> Self {
        let message = if record.correct {
            if record.doubled {
                format!("Correct! +{} XP (double points)", record.xp_awarded)
            } else {
                format!("Correct! +{} XP", record.xp_awarded)
            }
        } else if record.timed_out() {
            format!("Time's up! The answer was {}.", record.correct_answer)
        } else {
            format!("Not quite. The answer was {}.", record.correct_answer)
        };
        Self {
            correct: record.correct,
            message,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub category_label: String,
    pub progress_label: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub timer: Option<TimerVm>,
    pub feedback: Option<FeedbackVm>,
    pub score: u32,
    pub streak: u32,
    pub double_points_armed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub category_id: CategoryId,
    pub headline: String,
    pub score_label: String,
    pub accuracy_label: String,
    pub max_streak: u32,
    pub xp_earned: u64,
    pub skipped: u32,
    pub timed_out: u32,
}

impl From<&QuizSummary> for SummaryVm {
    fn from(summary: &QuizSummary) -> Self {
        let accuracy = summary.accuracy_percent();
        let headline = match accuracy {
            100 => "Perfect score!",
            80..=99 => "Excellent work!",
            50..=79 => "Good job!",
            _ => "Keep practicing!",
        };
        Self {
            category_id: summary.category_id().clone(),
            headline: headline.to_string(),
            score_label: format!("{} / {}", summary.score(), summary.question_count()),
            accuracy_label: format!("{accuracy}%"),
            max_streak: summary.max_streak(),
            xp_earned: summary.xp_earned(),
            skipped: summary.skipped(),
            timed_out: summary.timed_out(),
        }
    }
}

/// What the quiz screen shows for a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    PickCategory,
    Question(QuestionVm),
    Summary(SummaryVm),
}

#[must_use]
pub fn quiz_screen(snapshot: &QuizSnapshot) -> QuizScreen {
    match snapshot.phase {
        QuizPhase::Idle => QuizScreen::PickCategory,
        QuizPhase::Answering | QuizPhase::Feedback => QuizScreen::Question(question_vm(snapshot)),
        QuizPhase::Summary => snapshot
            .summary
            .as_ref()
            .map_or(QuizScreen::PickCategory, |summary| {
                QuizScreen::Summary(SummaryVm::from(summary))
            }),
    }
}

fn question_vm(snapshot: &QuizSnapshot) -> QuestionVm {
    let answering = snapshot.phase == QuizPhase::Answering;
    let revealed = snapshot
        .last_answer
        .as_ref()
        .filter(|_| snapshot.phase == QuizPhase::Feedback);

    let options = snapshot
        .options
        .iter()
        .map(|label| {
            let state = match revealed {
                None => OptionState::Open,
                Some(record) if *label == record.correct_answer => OptionState::Correct,
                Some(record) if record.choice.as_deref() == Some(label.as_str()) => {
                    OptionState::Incorrect
                }
                Some(_) => OptionState::Dimmed,
            };
            OptionVm {
                label: label.clone(),
                state,
                enabled: answering,
            }
        })
        .collect();

    let timer = snapshot.timer_enabled.then(|| {
        let limit = snapshot.time_limit.max(1);
        TimerVm {
            label: format_clock(snapshot.time_left),
            percent: (snapshot.time_left.min(limit) * 100) / limit,
            urgent: snapshot.time_left <= URGENT_SECS,
        }
    });

    QuestionVm {
        category_label: format!("{} {}", snapshot.category_icon, snapshot.category_name),
        progress_label: format!(
            "Question {} of {}",
            snapshot.question_index + 1,
            snapshot.question_count
        ),
        prompt: snapshot.prompt.clone(),
        options,
        timer,
        feedback: revealed.map(FeedbackVm::from),
        score: snapshot.score,
        streak: snapshot.streak,
        double_points_armed: snapshot.double_points_armed,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUpButtonVm {
    pub kind: PowerUpKind,
    pub icon: &'static str,
    pub label: &'static str,
    pub count: u32,
    pub enabled: bool,
}

/// Power-up bar: usable only while answering and when in stock. Extra time
/// also needs the countdown.
#[must_use]
pub fn map_power_up_buttons(snapshot: &QuizSnapshot, inventory: PowerUps) -> Vec<PowerUpButtonVm> {
    let answering = snapshot.phase == QuizPhase::Answering;
    PowerUpKind::ALL
        .into_iter()
        .map(|kind| {
            let count = inventory.count(kind);
            let armed = kind == PowerUpKind::DoublePoints && snapshot.double_points_armed;
            let no_countdown = kind == PowerUpKind::ExtraTime && !snapshot.timer_enabled;
            PowerUpButtonVm {
                kind,
                icon: kind.icon(),
                label: kind.label(),
                count,
                enabled: answering && count > 0 && !armed && !no_countdown,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answering_snapshot() -> QuizSnapshot {
        QuizSnapshot {
            phase: QuizPhase::Answering,
            category_id: Some(CategoryId::new("math")),
            category_name: "Math".into(),
            category_icon: "🔢".into(),
            question_index: 0,
            question_count: 2,
            prompt: "2+2?".into(),
            options: vec!["3".into(), "4".into(), "5".into()],
            time_left: 4,
            time_limit: 10,
            timer_enabled: true,
            ..QuizSnapshot::default()
        }
    }

    #[test]
    fn answering_question_is_clickable_with_timer() {
        let QuizScreen::Question(vm) = quiz_screen(&answering_snapshot()) else {
            panic!("expected question screen");
        };
        assert_eq!(vm.progress_label, "Question 1 of 2");
        assert!(vm.options.iter().all(|o| o.enabled && o.state == OptionState::Open));
        let timer = vm.timer.unwrap();
        assert_eq!(timer.label, "0:04");
        assert_eq!(timer.percent, 40);
        assert!(timer.urgent);
        assert!(vm.feedback.is_none());
    }

    #[test]
    fn feedback_marks_correct_and_wrong_options() {
        let mut snapshot = answering_snapshot();
        snapshot.phase = QuizPhase::Feedback;
        snapshot.last_answer = Some(AnswerRecord {
            question_index: 0,
            choice: Some("3".into()),
            correct_answer: "4".into(),
            correct: false,
            xp_awarded: 0,
            doubled: false,
        });
        let QuizScreen::Question(vm) = quiz_screen(&snapshot) else {
            panic!("expected question screen");
        };
        let states: Vec<OptionState> = vm.options.iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            vec![OptionState::Incorrect, OptionState::Correct, OptionState::Dimmed]
        );
        assert!(vm.options.iter().all(|o| !o.enabled));
        assert_eq!(vm.feedback.unwrap().message, "Not quite. The answer was 4.");
    }

    #[test]
    fn timeout_feedback_names_the_answer() {
        let record = AnswerRecord {
            question_index: 0,
            choice: None,
            correct_answer: "Paris".into(),
            correct: false,
            xp_awarded: 0,
            doubled: false,
        };
        assert_eq!(
            FeedbackVm::from(&record).message,
            "Time's up! The answer was Paris."
        );
    }

    #[test]
    fn disabled_timer_is_hidden() {
        let mut snapshot = answering_snapshot();
        snapshot.timer_enabled = false;
        let QuizScreen::Question(vm) = quiz_screen(&snapshot) else {
            panic!("expected question screen");
        };
        assert!(vm.timer.is_none());
    }

    #[test]
    fn summary_screen_formats_results() {
        let mut snapshot = answering_snapshot();
        snapshot.phase = QuizPhase::Summary;
        snapshot.summary =
            Some(QuizSummary::new(CategoryId::new("math"), 2, 1, 1, 2, 0, 0, 10).unwrap());
        let QuizScreen::Summary(vm) = quiz_screen(&snapshot) else {
            panic!("expected summary screen");
        };
        assert_eq!(vm.score_label, "1 / 2");
        assert_eq!(vm.accuracy_label, "50%");
        assert_eq!(vm.headline, "Good job!");
    }

    #[test]
    fn power_ups_need_stock_and_answering_phase() {
        let snapshot = answering_snapshot();
        let buttons = map_power_up_buttons(&snapshot, PowerUps::new(1, 0, 1));
        let enabled: Vec<bool> = buttons.iter().map(|b| b.enabled).collect();
        assert_eq!(enabled, vec![true, false, true]);

        let mut feedback = snapshot;
        feedback.phase = QuizPhase::Feedback;
        let buttons = map_power_up_buttons(&feedback, PowerUps::new(1, 1, 1));
        assert!(buttons.iter().all(|b| !b.enabled));
    }

    #[test]
    fn extra_time_is_disabled_without_timer() {
        let mut snapshot = answering_snapshot();
        snapshot.timer_enabled = false;
        let buttons = map_power_up_buttons(&snapshot, PowerUps::new(1, 1, 1));
        let enabled: Vec<bool> = buttons.iter().map(|b| b.enabled).collect();
        assert_eq!(enabled, vec![false, true, true]);
    }

    #[test]
    fn idle_snapshot_picks_category() {
        assert_eq!(
            quiz_screen(&QuizSnapshot::default()),
            QuizScreen::PickCategory
        );
    }
}
