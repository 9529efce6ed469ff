use quiz_core::model::{Achievement, PowerUpKind, SettingName, UserProgress};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementVm {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    /// Shown only for locked achievements with partial progress.
    pub progress_percent: Option<u8>,
    pub reward_label: String,
}

impl From<&Achievement> for AchievementVm {
    fn from(achievement: &Achievement) -> Self {
        Self {
            title: achievement.title().to_string(),
            description: achievement.description().to_string(),
            icon: achievement.icon().to_string(),
            unlocked: achievement.is_unlocked(),
            progress_percent: achievement
                .progress()
                .filter(|_| !achievement.is_unlocked()),
            reward_label: format!("+{} XP", achievement.xp_reward()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingVm {
    pub name: SettingName,
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUpInventoryVm {
    pub icon: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileVm {
    pub level: u32,
    pub total_xp: u64,
    pub xp_label: String,
    pub level_percent: u8,
    pub streak: u32,
    pub max_streak: u32,
    pub achievements_label: String,
    pub achievements: Vec<AchievementVm>,
    pub settings: Vec<SettingVm>,
    pub power_ups: Vec<PowerUpInventoryVm>,
}

impl From<&UserProgress> for ProfileVm {
    fn from(progress: &UserProgress) -> Self {
        let settings = progress.settings();
        let power_ups = progress.power_ups();
        Self {
            level: progress.level(),
            total_xp: progress.total_xp(),
            xp_label: format!("{} / {} XP", progress.total_xp(), progress.next_level_xp()),
            level_percent: progress.level_progress_percent(),
            streak: progress.streak(),
            max_streak: progress.max_streak(),
            achievements_label: format!(
                "{} / {}",
                progress.unlocked_count(),
                progress.achievements().len()
            ),
            achievements: progress
                .achievements()
                .iter()
                .map(AchievementVm::from)
                .collect(),
            settings: SettingName::ALL
                .into_iter()
                .map(|name| SettingVm {
                    name,
                    label: name.label(),
                    enabled: settings.get(name),
                })
                .collect(),
            power_ups: PowerUpKind::ALL
                .into_iter()
                .map(|kind| PowerUpInventoryVm {
                    icon: kind.icon(),
                    label: kind.label(),
                    description: kind.description(),
                    count: power_ups.count(kind),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AchievementId;
    use quiz_core::model::achievement::STREAK_3;

    #[test]
    fn fresh_profile_shows_defaults() {
        let vm = ProfileVm::from(&UserProgress::new());
        assert_eq!(vm.level, 1);
        assert_eq!(vm.xp_label, "0 / 100 XP");
        assert_eq!(vm.achievements_label, "0 / 4");
        assert_eq!(vm.settings.len(), 4);
        let dark = vm
            .settings
            .iter()
            .find(|s| s.name == SettingName::DarkMode)
            .unwrap();
        assert!(!dark.enabled);
        let counts: Vec<u32> = vm.power_ups.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn partial_progress_is_shown_until_unlocked() {
        let mut progress = UserProgress::new();
        let id = AchievementId::new(STREAK_3);
        progress.set_achievement_progress(&id, 66);
        let vm = ProfileVm::from(&progress);
        let streak = vm.achievements.iter().find(|a| a.title == "Hot Streak").unwrap();
        assert_eq!(streak.progress_percent, Some(66));

        progress.unlock_achievement(&id);
        let vm = ProfileVm::from(&progress);
        let streak = vm.achievements.iter().find(|a| a.title == "Hot Streak").unwrap();
        assert!(streak.unlocked);
        assert_eq!(streak.progress_percent, None);
        assert_eq!(vm.achievements_label, "1 / 4");
    }
}
