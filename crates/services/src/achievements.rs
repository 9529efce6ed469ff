//! Achievement rules and the unlock notification queue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use quiz_core::model::achievement::{CATEGORY_MASTER, FIRST_QUIZ, PERFECT_SCORE, STREAK_3};
use quiz_core::model::{Achievement, QuizSummary, UserProgress};

use crate::progress_store::ProgressStore;

const STREAK_TARGET: u32 = 3;

/// What prompted an evaluation pass.
#[derive(Clone, Copy, Debug)]
pub enum EvaluationTrigger<'a> {
    XpGained,
    StreakChanged,
    QuizCompleted(&'a QuizSummary),
}

impl<'a> EvaluationTrigger<'a> {
    fn summary(self) -> Option<&'a QuizSummary> {
        match self {
            Self::QuizCompleted(summary) => Some(summary),
            Self::XpGained | Self::StreakChanged => None,
        }
    }
}

type Predicate = fn(&UserProgress, Option<&QuizSummary>) -> bool;
type ProgressFn = fn(&UserProgress) -> u8;

struct Rule {
    id: &'static str,
    met: Predicate,
    progress: Option<ProgressFn>,
}

fn completed_nonempty(summary: Option<&QuizSummary>) -> Option<&QuizSummary> {
    summary.filter(|summary| summary.question_count() > 0)
}

fn streak_progress(progress: &UserProgress) -> u8 {
    let capped = progress.streak().min(STREAK_TARGET);
    u8::try_from(capped * 100 / STREAK_TARGET).unwrap_or(100)
}

const RULES: &[Rule] = &[
    Rule {
        id: FIRST_QUIZ,
        met: |_, summary| completed_nonempty(summary).is_some(),
        progress: None,
    },
    Rule {
        id: STREAK_3,
        met: |progress, _| progress.streak() >= STREAK_TARGET,
        progress: Some(streak_progress),
    },
    Rule {
        id: PERFECT_SCORE,
        met: |_, summary| completed_nonempty(summary).is_some_and(QuizSummary::is_perfect),
        progress: None,
    },
    Rule {
        id: CATEGORY_MASTER,
        met: |_, summary| completed_nonempty(summary).is_some_and(QuizSummary::all_answered),
        progress: None,
    },
];

fn rule_for(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.id == id)
}

/// FIFO of unlocked achievements waiting to be shown, one at a time.
#[derive(Debug, Default, Clone)]
pub struct UnlockQueue {
    pending: VecDeque<Achievement>,
}

impl UnlockQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, unlocked: impl IntoIterator<Item = Achievement>) {
        self.pending.extend(unlocked);
    }

    /// The notification currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<&Achievement> {
        self.pending.front()
    }

    /// Drop the current notification and return the next one.
    pub fn dismiss(&mut self) -> Option<&Achievement> {
        self.pending.pop_front();
        self.pending.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Checks achievement criteria against the progress store and unlocks
/// whatever is newly satisfied.
pub struct AchievementEvaluator {
    store: Arc<ProgressStore>,
    queue: Mutex<UnlockQueue>,
    current: watch::Sender<Option<Achievement>>,
}

impl AchievementEvaluator {
    #[must_use]
    pub fn new(store: Arc<ProgressStore>) -> Self {
        let (current, _rx) = watch::channel(None);
        Self {
            store,
            queue: Mutex::new(UnlockQueue::new()),
            current,
        }
    }

    /// Run one pass over every locked achievement. Returns the achievements
    /// unlocked by this pass, in list order.
    pub async fn evaluate(&self, trigger: EvaluationTrigger<'_>) -> Vec<Achievement> {
        let progress = self.store.snapshot().await;
        let summary = trigger.summary();
        let mut unlocked = Vec::new();

        for achievement in progress.achievements() {
            if achievement.is_unlocked() {
                continue;
            }
            let Some(rule) = rule_for(achievement.id().as_str()) else {
                continue;
            };

            if (rule.met)(&progress, summary) {
                if self.store.unlock_achievement(achievement.id()).await {
                    let mut shown = achievement.clone();
                    shown.unlock();
                    unlocked.push(shown);
                }
            } else if let Some(progress_fn) = rule.progress {
                let percent = progress_fn(&progress);
                if achievement.progress() != Some(percent) {
                    self.store
                        .set_achievement_progress(achievement.id(), percent)
                        .await;
                }
            }
        }

        if !unlocked.is_empty() {
            tracing::debug!(count = unlocked.len(), ?trigger, "achievements unlocked");
            self.enqueue(unlocked.clone());
        }
        unlocked
    }

    #[must_use]
    pub fn current(&self) -> Option<Achievement> {
        self.with_queue(|queue| queue.current().cloned())
    }

    /// Dismiss the visible notification; returns the next one, if any.
    pub fn dismiss(&self) -> Option<Achievement> {
        let next = self.with_queue(|queue| queue.dismiss().cloned());
        self.current.send_replace(next.clone());
        next
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.with_queue(|queue| queue.len())
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Achievement>> {
        self.current.subscribe()
    }

    fn enqueue(&self, unlocked: Vec<Achievement>) {
        let current = self.with_queue(|queue| {
            queue.extend(unlocked);
            queue.current().cloned()
        });
        self.current.send_replace(current);
    }

    fn with_queue<R>(&self, f: impl FnOnce(&mut UnlockQueue) -> R) -> R {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut queue)
    }
}
