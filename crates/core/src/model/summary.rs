use thiserror::Error;

use crate::model::ids::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("question outcomes ({sum}) do not match question count ({total})")]
    CountMismatch { total: u32, sum: u32 },

    #[error("score ({score}) exceeds answered questions ({answered})")]
    ScoreExceedsAnswered { score: u32, answered: u32 },
}

/// Result of one finished play-through of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    category_id: CategoryId,
    question_count: u32,
    score: u32,
    max_streak: u32,
    answered: u32,
    skipped: u32,
    timed_out: u32,
    xp_earned: u64,
}

impl QuizSummary {
    /// `answered` counts explicit submissions; every question is exactly one
    /// of answered, skipped or timed out.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError` when the outcome counts are inconsistent.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        category_id: CategoryId,
        question_count: u32,
        score: u32,
        max_streak: u32,
        answered: u32,
        skipped: u32,
        timed_out: u32,
        xp_earned: u64,
    ) -> Result<Self, QuizSummaryError> {
        let sum = answered.saturating_add(skipped).saturating_add(timed_out);
        if sum != question_count {
            return Err(QuizSummaryError::CountMismatch {
                total: question_count,
                sum,
            });
        }
        if score > answered {
            return Err(QuizSummaryError::ScoreExceedsAnswered { score, answered });
        }

        Ok(Self {
            category_id,
            question_count,
            score,
            max_streak,
            answered,
            skipped,
            timed_out,
            xp_earned,
        })
    }

    /// Summary of a category without questions.
    #[must_use]
    pub fn empty(category_id: CategoryId) -> Self {
        Self {
            category_id,
            question_count: 0,
            score: 0,
            max_streak: 0,
            answered: 0,
            skipped: 0,
            timed_out: 0,
            xp_earned: 0,
        }
    }

    #[must_use]
    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    #[must_use]
    pub fn timed_out(&self) -> u32 {
        self.timed_out
    }

    #[must_use]
    pub fn xp_earned(&self) -> u64 {
        self.xp_earned
    }

    /// `score / question_count` as a percentage, rounded half up. Zero
    /// questions yield 0.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        if self.question_count == 0 {
            return 0;
        }
        let total = u64::from(self.question_count);
        let scaled = u64::from(self.score) * 200 + total;
        u32::try_from(scaled / (2 * total)).unwrap_or(100)
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.question_count > 0 && self.score == self.question_count
    }

    /// Every question got an explicit answer (none skipped or timed out).
    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.question_count > 0 && self.answered == self.question_count
    }
}
