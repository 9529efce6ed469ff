//! Async driver around [`QuizSession`]: owns the countdown and feedback
//! timers, talks to the progress store and publishes snapshots.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, MutexGuard, PoisonError, Weak};

use rand::rng;
use rand::seq::SliceRandom;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use quiz_core::model::{Category, CategoryId, PowerUpKind, QuizSummary};

use crate::achievements::{AchievementEvaluator, EvaluationTrigger};
use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::progress_store::ProgressStore;
use crate::quiz::countdown::{TimerEvent, Timers};
use crate::quiz::session::{Advance, AnswerRecord, QuizPhase, QuizSession, QuizSnapshot, TickOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded(AnswerRecord),
    /// No question was awaiting an answer.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpOutcome {
    Applied,
    /// None left in the inventory.
    Unavailable,
    /// Not usable right now; nothing was consumed.
    Ignored,
}

struct ControllerState {
    session: QuizSession,
    timer_enabled: bool,
}

struct Shared {
    store: Arc<ProgressStore>,
    evaluator: Arc<AchievementEvaluator>,
    config: QuizConfig,
    categories: Arc<[Category]>,
    state: Mutex<ControllerState>,
    timers: std::sync::Mutex<Timers>,
    generation: AtomicU64,
    events: UnboundedSender<TimerEvent>,
    snapshots: watch::Sender<QuizSnapshot>,
}

/// One quiz screen's controller. Must be created inside a Tokio runtime;
/// dropping it stops all of its timers.
pub struct QuizController {
    shared: Arc<Shared>,
    driver: JoinHandle<()>,
}

impl QuizController {
    #[must_use]
    pub fn new(
        store: Arc<ProgressStore>,
        evaluator: Arc<AchievementEvaluator>,
        categories: Arc<[Category]>,
        config: QuizConfig,
    ) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let session = QuizSession::new(config.xp_per_correct);
        let (snapshots, _rx) = watch::channel(session.snapshot(false));
        let shared = Arc::new(Shared {
            store,
            evaluator,
            config,
            categories,
            state: Mutex::new(ControllerState {
                session,
                timer_enabled: false,
            }),
            timers: std::sync::Mutex::new(Timers::default()),
            generation: AtomicU64::new(0),
            events,
            snapshots,
        });
        let driver = tokio::spawn(drive(Arc::downgrade(&shared), rx));
        Self { shared, driver }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.shared.categories
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Whether a countdown task is currently armed.
    #[must_use]
    pub fn countdown_running(&self) -> bool {
        self.shared.timers().countdown_armed()
    }

    /// Start a quiz on `id`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownCategory` for an id outside the catalog and
    /// `QuizError::SessionInProgress` unless the controller is idle.
    pub async fn select_category(&self, id: &CategoryId) -> Result<QuizSnapshot, QuizError> {
        let shared = &self.shared;
        let category = shared
            .categories
            .iter()
            .find(|category| category.id() == id)
            .ok_or_else(|| QuizError::UnknownCategory(id.clone()))?;
        let category = if shared.config.shuffle_questions {
            shuffled(category)
        } else {
            category.clone()
        };
        let timer_enabled = shared.store.snapshot().await.settings().timer_mode();

        let mut state = shared.state.lock().await;
        let questions = category.question_count();
        let phase = state.session.select_category(category)?;
        state.timer_enabled = timer_enabled;
        tracing::info!(category = %id, questions, timer_enabled, "quiz started");

        shared.restart_timers(&state);
        if phase == QuizPhase::Summary {
            if let Some(summary) = state.session.summary().cloned() {
                shared.finish(&summary).await;
            }
        }
        Ok(shared.publish(&state))
    }

    /// Answer the current question. Ignored outside the answering phase,
    /// so a second click during feedback cannot score twice.
    pub async fn submit_answer(&self, choice: &str) -> SubmitOutcome {
        let shared = &self.shared;
        let mut state = shared.state.lock().await;
        let Some(record) = state.session.submit(Some(choice)) else {
            return SubmitOutcome::Ignored;
        };
        shared.record_answer(&mut state, &record).await;
        SubmitOutcome::Recorded(record)
    }

    /// Spend one power-up on the current question. Extra time needs a
    /// running countdown.
    pub async fn use_power_up(&self, kind: PowerUpKind) -> PowerUpOutcome {
        let shared = &self.shared;
        let mut state = shared.state.lock().await;
        let usable = state.session.phase() == QuizPhase::Answering
            && match kind {
                PowerUpKind::ExtraTime => state.timer_enabled,
                PowerUpKind::DoublePoints => !state.session.double_points_armed(),
                PowerUpKind::SkipQuestion => true,
            };
        if !usable {
            return PowerUpOutcome::Ignored;
        }
        if !shared.store.consume_power_up(kind).await {
            return PowerUpOutcome::Unavailable;
        }

        match kind {
            PowerUpKind::ExtraTime => {
                state.session.add_time(shared.config.extra_time_secs);
            }
            PowerUpKind::SkipQuestion => {
                if let Some(advance) = state.session.skip() {
                    shared.after_advance(&mut state, advance).await;
                }
            }
            PowerUpKind::DoublePoints => {
                state.session.arm_double_points();
            }
        }
        tracing::debug!(power_up = kind.key(), "power-up used");
        shared.publish(&state);
        PowerUpOutcome::Applied
    }

    /// Abandon the current quiz and return to category selection.
    pub async fn reset(&self) -> QuizSnapshot {
        let shared = &self.shared;
        let mut state = shared.state.lock().await;
        state.session.reset();
        state.timer_enabled = false;
        shared.restart_timers(&state);
        shared.publish(&state)
    }
}

impl Drop for QuizController {
    fn drop(&mut self) {
        self.driver.abort();
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        self.shared.timers().cancel_all();
    }
}

impl Shared {
    fn timers(&self) -> MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ControllerState) -> QuizSnapshot {
        let snapshot = state.session.snapshot(state.timer_enabled);
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    /// Cancel whatever is armed and arm the timer the current phase needs.
    /// Bumping the generation invalidates events already in flight.
    fn restart_timers(&self, state: &ControllerState) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut timers = self.timers();
        timers.cancel_all();
        match state.session.phase() {
            QuizPhase::Answering if state.timer_enabled => {
                timers.arm_countdown(self.events.clone(), generation);
            }
            QuizPhase::Feedback => {
                timers.arm_feedback(self.events.clone(), generation, self.config.feedback_pause);
            }
            QuizPhase::Answering | QuizPhase::Idle | QuizPhase::Summary => {}
        }
    }

    async fn record_answer(&self, state: &mut ControllerState, record: &AnswerRecord) {
        self.restart_timers(state);
        self.store.update_streak(record.correct).await;
        let trigger = if record.xp_awarded > 0 {
            self.store.add_xp(record.xp_awarded).await;
            EvaluationTrigger::XpGained
        } else {
            EvaluationTrigger::StreakChanged
        };
        self.evaluator.evaluate(trigger).await;
        tracing::debug!(
            question = record.question_index,
            correct = record.correct,
            timed_out = record.timed_out(),
            xp = record.xp_awarded,
            "answer recorded"
        );
        self.publish(state);
    }

    async fn after_advance(&self, state: &mut ControllerState, advance: Advance) {
        self.restart_timers(state);
        if let Advance::Finished(summary) = advance {
            self.finish(&summary).await;
        }
    }

    async fn finish(&self, summary: &QuizSummary) {
        tracing::info!(
            category = %summary.category_id(),
            score = summary.score(),
            questions = summary.question_count(),
            accuracy = summary.accuracy_percent(),
            "quiz completed"
        );
        self.evaluator
            .evaluate(EvaluationTrigger::QuizCompleted(summary))
            .await;
    }

    async fn on_timer(&self, event: TimerEvent) {
        let mut state = self.state.lock().await;
        if event.generation() != self.generation.load(Ordering::SeqCst) {
            tracing::trace!(?event, "discarding stale timer event");
            return;
        }
        match event {
            TimerEvent::Tick { .. } => match state.session.tick() {
                TickOutcome::Ignored => {}
                TickOutcome::Running { .. } => {
                    self.publish(&state);
                }
                TickOutcome::Expired => {
                    if let Some(record) = state.session.submit(None) {
                        self.record_answer(&mut state, &record).await;
                    }
                }
            },
            TimerEvent::FeedbackElapsed { .. } => {
                if let Some(advance) = state.session.advance() {
                    self.after_advance(&mut state, advance).await;
                    self.publish(&state);
                }
            }
        }
    }
}

async fn drive(shared: Weak<Shared>, mut events: UnboundedReceiver<TimerEvent>) {
    while let Some(event) = events.recv().await {
        let Some(shared) = shared.upgrade() else {
            break;
        };
        shared.on_timer(event).await;
    }
}

fn shuffled(category: &Category) -> Category {
    let mut questions = category.questions().to_vec();
    questions.shuffle(&mut rng());
    category.with_questions(questions)
}
