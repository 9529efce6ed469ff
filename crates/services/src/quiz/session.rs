//! Pure quiz state machine. Timers and persistence live in the controller;
//! this type only decides what each event means.

use quiz_core::model::{Category, CategoryId, Question, QuizSummary};

use crate::error::QuizError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuizPhase {
    #[default]
    Idle,
    Answering,
    Feedback,
    Summary,
}

/// Outcome of one question, kept for the feedback panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_index: usize,
    /// `None` when the countdown ran out.
    pub choice: Option<String>,
    pub correct_answer: String,
    pub correct: bool,
    pub xp_awarded: u32,
    pub doubled: bool,
}

impl AnswerRecord {
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.choice.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not answering; the tick belongs to nothing.
    Ignored,
    Running { time_left: u32 },
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished(QuizSummary),
}

/// Everything the quiz view renders, detached from the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub category_icon: String,
    pub question_index: usize,
    pub question_count: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub time_left: u32,
    pub time_limit: u32,
    pub timer_enabled: bool,
    pub selected: Option<String>,
    pub last_answer: Option<AnswerRecord>,
    pub score: u32,
    pub streak: u32,
    pub max_streak: u32,
    pub double_points_armed: bool,
    pub summary: Option<QuizSummary>,
}

#[derive(Clone, Debug)]
pub struct QuizSession {
    xp_per_correct: u32,
    category: Option<Category>,
    phase: QuizPhase,
    index: usize,
    time_left: u32,
    selected: Option<String>,
    last_answer: Option<AnswerRecord>,
    score: u32,
    streak: u32,
    max_streak: u32,
    answered: u32,
    skipped: u32,
    timed_out: u32,
    xp_earned: u64,
    double_points: bool,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    #[must_use]
    pub fn new(xp_per_correct: u32) -> Self {
        Self {
            xp_per_correct,
            category: None,
            phase: QuizPhase::Idle,
            index: 0,
            time_left: 0,
            selected: None,
            last_answer: None,
            score: 0,
            streak: 0,
            max_streak: 0,
            answered: 0,
            skipped: 0,
            timed_out: 0,
            xp_earned: 0,
            double_points: false,
            summary: None,
        }
    }

    /// Start a quiz. A category without questions goes straight to the
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionInProgress` unless the session is idle.
    pub fn select_category(&mut self, category: Category) -> Result<QuizPhase, QuizError> {
        if self.phase != QuizPhase::Idle {
            return Err(QuizError::SessionInProgress);
        }
        let first_limit = category.question(0).map(Question::time_limit_secs);
        let category_id = category.id().clone();
        self.category = Some(category);
        self.index = 0;

        match first_limit {
            Some(limit) => {
                self.time_left = limit;
                self.phase = QuizPhase::Answering;
            }
            None => {
                self.summary = Some(QuizSummary::empty(category_id));
                self.phase = QuizPhase::Summary;
            }
        }
        Ok(self.phase)
    }

    /// One second of countdown. Stops at zero.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != QuizPhase::Answering {
            return TickOutcome::Ignored;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                time_left: self.time_left,
            }
        }
    }

    /// Record an answer; `None` means the countdown expired. Ignored unless
    /// a question is awaiting an answer.
    pub fn submit(&mut self, choice: Option<&str>) -> Option<AnswerRecord> {
        if self.phase != QuizPhase::Answering {
            return None;
        }
        let question = self.current_question()?;
        let correct_answer = question.correct_answer().to_string();
        let correct = choice.is_some_and(|choice| question.is_correct(choice));

        let doubled = correct && self.double_points;
        let xp_awarded = if correct {
            if doubled {
                self.xp_per_correct.saturating_mul(2)
            } else {
                self.xp_per_correct
            }
        } else {
            0
        };

        match choice {
            Some(_) => self.answered += 1,
            None => self.timed_out += 1,
        }
        if correct {
            self.score += 1;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
        if doubled {
            self.double_points = false;
        }
        self.xp_earned += u64::from(xp_awarded);

        let record = AnswerRecord {
            question_index: self.index,
            choice: choice.map(str::to_string),
            correct_answer,
            correct,
            xp_awarded,
            doubled,
        };
        self.selected = record.choice.clone();
        self.last_answer = Some(record.clone());
        self.phase = QuizPhase::Feedback;
        Some(record)
    }

    /// Leave the feedback pause.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase != QuizPhase::Feedback {
            return None;
        }
        Some(self.next_question())
    }

    /// Skip the current question without scoring it.
    pub fn skip(&mut self) -> Option<Advance> {
        if self.phase != QuizPhase::Answering {
            return None;
        }
        self.skipped += 1;
        Some(self.next_question())
    }

    pub fn add_time(&mut self, secs: u32) -> bool {
        if self.phase != QuizPhase::Answering {
            return false;
        }
        self.time_left = self.time_left.saturating_add(secs);
        true
    }

    /// Arm double XP for the next correct answer. Refused when already armed.
    pub fn arm_double_points(&mut self) -> bool {
        if self.phase != QuizPhase::Answering || self.double_points {
            return false;
        }
        self.double_points = true;
        true
    }

    /// Back to idle; the category and all counters are discarded.
    pub fn reset(&mut self) {
        *self = Self::new(self.xp_per_correct);
    }

    fn next_question(&mut self) -> Advance {
        self.selected = None;
        let next = self.index + 1;
        let next_limit = self
            .category
            .as_ref()
            .and_then(|category| category.question(next))
            .map(Question::time_limit_secs);

        if let Some(limit) = next_limit {
            self.index = next;
            self.time_left = limit;
            self.last_answer = None;
            self.phase = QuizPhase::Answering;
            return Advance::Next { index: next };
        }

        let summary = self.build_summary();
        self.summary = Some(summary.clone());
        self.phase = QuizPhase::Summary;
        Advance::Finished(summary)
    }

    fn build_summary(&self) -> QuizSummary {
        let category_id = self
            .category
            .as_ref()
            .map_or_else(|| CategoryId::new(""), |category| category.id().clone());
        let count = self.answered + self.skipped + self.timed_out;
        QuizSummary::new(
            category_id.clone(),
            count,
            self.score,
            self.max_streak,
            self.answered,
            self.skipped,
            self.timed_out,
            self.xp_earned,
        )
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "inconsistent quiz counters");
            QuizSummary::empty(category_id)
        })
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.category.as_ref()?.question(self.index)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    #[must_use]
    pub fn double_points_armed(&self) -> bool {
        self.double_points
    }

    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self, timer_enabled: bool) -> QuizSnapshot {
        let question = self.current_question();
        QuizSnapshot {
            phase: self.phase,
            category_id: self.category.as_ref().map(|c| c.id().clone()),
            category_name: self
                .category
                .as_ref()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            category_icon: self
                .category
                .as_ref()
                .map(|c| c.icon().to_string())
                .unwrap_or_default(),
            question_index: self.index,
            question_count: self.category.as_ref().map_or(0, Category::question_count),
            prompt: question.map(|q| q.prompt().to_string()).unwrap_or_default(),
            options: question.map(|q| q.options().to_vec()).unwrap_or_default(),
            time_left: self.time_left,
            time_limit: question.map_or(0, Question::time_limit_secs),
            timer_enabled,
            selected: self.selected.clone(),
            last_answer: self.last_answer.clone(),
            score: self.score,
            streak: self.streak,
            max_streak: self.max_streak,
            double_points_armed: self.double_points,
            summary: self.summary.clone(),
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(10)
    }
}
