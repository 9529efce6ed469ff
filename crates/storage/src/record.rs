//! JSON shape of the persisted progress snapshot.
//!
//! Field names are camelCase. The stored `level` is informational only; it is
//! recomputed from `totalXp` on load.

use quiz_core::model::{
    Achievement, AchievementId, PowerUpKind, PowerUps, SettingName, Settings, UserProgress,
};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub level: u32,
    pub xp: u64,
    pub total_xp: u64,
    pub streak: u32,
    pub max_streak: u32,
    pub achievements: Vec<AchievementRecord>,
    pub power_ups: PowerUpsRecord,
    pub settings: SettingsRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    pub xp_reward: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUpsRecord {
    pub extra_time: u32,
    pub skip_question: u32,
    pub double_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct SettingsRecord {
    pub sound_effects: bool,
    pub dark_mode: bool,
    pub animations: bool,
    #[serde(default = "default_timer_mode")]
    pub timer_mode: bool,
}

fn default_timer_mode() -> bool {
    true
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        let power_ups = progress.power_ups();
        let settings = progress.settings();
        Self {
            level: progress.level(),
            xp: progress.xp(),
            total_xp: progress.total_xp(),
            streak: progress.streak(),
            max_streak: progress.max_streak(),
            achievements: progress
                .achievements()
                .iter()
                .map(AchievementRecord::from_achievement)
                .collect(),
            power_ups: PowerUpsRecord {
                extra_time: power_ups.count(PowerUpKind::ExtraTime),
                skip_question: power_ups.count(PowerUpKind::SkipQuestion),
                double_points: power_ups.count(PowerUpKind::DoublePoints),
            },
            settings: SettingsRecord {
                sound_effects: settings.get(SettingName::SoundEffects),
                dark_mode: settings.get(SettingName::DarkMode),
                animations: settings.get(SettingName::Animations),
                timer_mode: settings.get(SettingName::TimerMode),
            },
        }
    }

    /// Convert back into the domain record.
    ///
    /// The stored `level` is ignored; it is recomputed from `totalXp`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if an achievement fails validation.
    pub fn into_progress(self) -> Result<UserProgress, StorageError> {
        let achievements = self
            .achievements
            .into_iter()
            .map(AchievementRecord::into_achievement)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserProgress::from_persisted(
            self.xp,
            self.total_xp,
            self.streak,
            self.max_streak,
            achievements,
            PowerUps::new(
                self.power_ups.extra_time,
                self.power_ups.skip_question,
                self.power_ups.double_points,
            ),
            Settings::new(
                self.settings.sound_effects,
                self.settings.dark_mode,
                self.settings.animations,
                self.settings.timer_mode,
            ),
        ))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed or incompatible JSON.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

impl AchievementRecord {
    #[must_use]
    pub fn from_achievement(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id().to_string(),
            title: achievement.title().to_owned(),
            description: achievement.description().to_owned(),
            icon: achievement.icon().to_owned(),
            unlocked: achievement.is_unlocked(),
            progress: achievement.progress(),
            xp_reward: achievement.xp_reward(),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored fields are invalid.
    pub fn into_achievement(self) -> Result<Achievement, StorageError> {
        Achievement::from_persisted(
            AchievementId::new(self.id),
            self.title,
            self.description,
            self.icon,
            self.unlocked,
            self.progress,
            self.xp_reward,
        )
        .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}
