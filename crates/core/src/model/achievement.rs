use thiserror::Error;

use crate::model::ids::AchievementId;

pub const FIRST_QUIZ: &str = "first_quiz";
pub const STREAK_3: &str = "streak_3";
pub const PERFECT_SCORE: &str = "perfect_score";
pub const CATEGORY_MASTER: &str = "category_master";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AchievementError {
    #[error("achievement title cannot be empty")]
    EmptyTitle,

    #[error("achievement xp reward must be > 0")]
    InvalidXpReward,
}

/// A one-way unlockable milestone.
///
/// `unlocked` only ever moves from `false` to `true`. `progress` is an
/// optional 0..=100 percentage for milestones that can be partially tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    id: AchievementId,
    title: String,
    description: String,
    icon: String,
    unlocked: bool,
    progress: Option<u8>,
    xp_reward: u32,
}

impl Achievement {
    /// Creates a locked achievement.
    ///
    /// # Errors
    ///
    /// Returns `AchievementError` if the title is blank or the reward is zero.
    pub fn new(
        id: AchievementId,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        xp_reward: u32,
    ) -> Result<Self, AchievementError> {
        Self::from_persisted(id, title, description, icon, false, None, xp_reward)
    }

    /// Rehydrate an achievement from a stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AchievementError` if the title is blank or the reward is zero.
    pub fn from_persisted(
        id: AchievementId,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        unlocked: bool,
        progress: Option<u8>,
        xp_reward: u32,
    ) -> Result<Self, AchievementError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(AchievementError::EmptyTitle);
        }
        if xp_reward == 0 {
            return Err(AchievementError::InvalidXpReward);
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            icon: icon.into(),
            unlocked,
            progress: progress.map(|value| value.min(100)),
            xp_reward,
        })
    }

    #[must_use]
    pub fn id(&self) -> &AchievementId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    #[must_use]
    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    /// Flip to unlocked. Returns `false` if it already was.
    pub fn unlock(&mut self) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        true
    }

    /// Record partial progress on a locked achievement. Values above 100 clamp.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_progress(&mut self, percent: u8) -> bool {
        if self.unlocked {
            return false;
        }
        let percent = Some(percent.min(100));
        if self.progress == percent {
            return false;
        }
        self.progress = percent;
        true
    }
}

/// The fixed achievement list every new profile starts with, in display order.
#[must_use]
pub fn default_achievements() -> Vec<Achievement> {
    let specs: [(&str, &str, &str, &str, u32); 4] = [
        (FIRST_QUIZ, "First Steps", "Complete your first quiz", "🎯", 50),
        (STREAK_3, "Hot Streak", "Answer 3 questions in a row correctly", "🔥", 100),
        (PERFECT_SCORE, "Perfect Score", "Get all questions right in a quiz", "⭐", 200),
        (CATEGORY_MASTER, "Category Master", "Complete all questions in a category", "🏆", 300),
    ];

    specs
        .into_iter()
        .filter_map(|(id, title, description, icon, reward)| {
            Achievement::new(AchievementId::new(id), title, description, icon, reward).ok()
        })
        .collect()
}
