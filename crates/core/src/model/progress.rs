use std::fmt;

use crate::model::achievement::{Achievement, default_achievements};
use crate::model::ids::AchievementId;

//
// ─── LEVEL MATH ────────────────────────────────────────────────────────────────
//

/// `floor(sqrt(total_xp / 100)) + 1`, computed in integers.
///
/// `floor(sqrt(x / 100)) == floor(isqrt(x) / 10)` for all non-negative `x`,
/// so no floating point is involved.
#[must_use]
pub fn level_for_total_xp(total_xp: u64) -> u32 {
    u32::try_from(total_xp.isqrt() / 10).map_or(u32::MAX, |level| level.saturating_add(1))
}

/// Total XP at which `level` is first reached (`100 * (level - 1)^2`).
#[must_use]
pub fn xp_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps.saturating_mul(steps).saturating_mul(100)
}

//
// ─── POWER-UPS ─────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    ExtraTime,
    SkipQuestion,
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [Self; 3] = [Self::ExtraTime, Self::SkipQuestion, Self::DoublePoints];

    /// Key used in the persisted snapshot.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::ExtraTime => "extraTime",
            Self::SkipQuestion => "skipQuestion",
            Self::DoublePoints => "doublePoints",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ExtraTime => "Extra Time",
            Self::SkipQuestion => "Skip Question",
            Self::DoublePoints => "Double Points",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ExtraTime => "Add 10 seconds to the timer",
            Self::SkipQuestion => "Skip the current question",
            Self::DoublePoints => "Double points for next correct answer",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::ExtraTime => "⏱️",
            Self::SkipQuestion => "⏭️",
            Self::DoublePoints => "2️⃣",
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Remaining power-up counts. Counts never go below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUps {
    extra_time: u32,
    skip_question: u32,
    double_points: u32,
}

impl PowerUps {
    #[must_use]
    pub fn new(extra_time: u32, skip_question: u32, double_points: u32) -> Self {
        Self {
            extra_time,
            skip_question,
            double_points,
        }
    }

    #[must_use]
    pub fn count(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::ExtraTime => self.extra_time,
            PowerUpKind::SkipQuestion => self.skip_question,
            PowerUpKind::DoublePoints => self.double_points,
        }
    }

    /// Take one unit of `kind`. Returns `false` (and changes nothing) when empty.
    pub fn consume(&mut self, kind: PowerUpKind) -> bool {
        let slot = match kind {
            PowerUpKind::ExtraTime => &mut self.extra_time,
            PowerUpKind::SkipQuestion => &mut self.skip_question,
            PowerUpKind::DoublePoints => &mut self.double_points,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

impl Default for PowerUps {
    fn default() -> Self {
        Self::new(3, 2, 1)
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingName {
    SoundEffects,
    DarkMode,
    Animations,
    TimerMode,
}

impl SettingName {
    pub const ALL: [Self; 4] = [
        Self::SoundEffects,
        Self::DarkMode,
        Self::Animations,
        Self::TimerMode,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::SoundEffects => "soundEffects",
            Self::DarkMode => "darkMode",
            Self::Animations => "animations",
            Self::TimerMode => "timerMode",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SoundEffects => "Sound effects",
            Self::DarkMode => "Dark mode",
            Self::Animations => "Animations",
            Self::TimerMode => "Question timer",
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    sound_effects: bool,
    dark_mode: bool,
    animations: bool,
    timer_mode: bool,
}

impl Settings {
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn new(sound_effects: bool, dark_mode: bool, animations: bool, timer_mode: bool) -> Self {
        Self {
            sound_effects,
            dark_mode,
            animations,
            timer_mode,
        }
    }

    #[must_use]
    pub fn get(&self, name: SettingName) -> bool {
        match name {
            SettingName::SoundEffects => self.sound_effects,
            SettingName::DarkMode => self.dark_mode,
            SettingName::Animations => self.animations,
            SettingName::TimerMode => self.timer_mode,
        }
    }

    /// Flip `name` and return its new value.
    pub fn toggle(&mut self, name: SettingName) -> bool {
        let slot = match name {
            SettingName::SoundEffects => &mut self.sound_effects,
            SettingName::DarkMode => &mut self.dark_mode,
            SettingName::Animations => &mut self.animations,
            SettingName::TimerMode => &mut self.timer_mode,
        };
        *slot = !*slot;
        *slot
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn timer_mode(&self) -> bool {
        self.timer_mode
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(true, false, true, true)
    }
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// The single user's long-lived progress record.
///
/// `level` is derived from `total_xp` and is recomputed by every mutation
/// that changes XP. `max_streak >= streak` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    level: u32,
    xp: u64,
    total_xp: u64,
    streak: u32,
    max_streak: u32,
    achievements: Vec<Achievement>,
    power_ups: PowerUps,
    settings: Settings,
}

impl UserProgress {
    /// Fresh record: level 1, no XP, default achievements locked.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_xp: 0,
            streak: 0,
            max_streak: 0,
            achievements: default_achievements(),
            power_ups: PowerUps::default(),
            settings: Settings::default(),
        }
    }

    /// Rehydrate from a stored snapshot.
    ///
    /// Derived fields are recomputed rather than trusted: `level` comes from
    /// `total_xp` and `max_streak` is raised to at least `streak`. The
    /// achievement list is always the default set; stored entries only
    /// contribute their unlock flag and progress.
    #[must_use]
    pub fn from_persisted(
        xp: u64,
        total_xp: u64,
        streak: u32,
        max_streak: u32,
        achievements: Vec<Achievement>,
        power_ups: PowerUps,
        settings: Settings,
    ) -> Self {
        Self {
            level: level_for_total_xp(total_xp),
            xp,
            total_xp,
            streak,
            max_streak: max_streak.max(streak),
            achievements: reconcile_achievements(&achievements),
            power_ups,
            settings,
        }
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[must_use]
    pub fn total_xp(&self) -> u64 {
        self.total_xp
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
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    #[must_use]
    pub fn achievement(&self, id: &AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id() == id)
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.is_unlocked()).count()
    }

    #[must_use]
    pub fn power_ups(&self) -> PowerUps {
        self.power_ups
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// XP needed to reach the next level.
    #[must_use]
    pub fn next_level_xp(&self) -> u64 {
        xp_for_level(self.level.saturating_add(1))
    }

    /// How far `total_xp` is between the current and next level thresholds.
    #[must_use]
    pub fn level_progress_percent(&self) -> u8 {
        let floor = xp_for_level(self.level);
        let span = self.next_level_xp().saturating_sub(floor);
        if span == 0 {
            return 100;
        }
        let into = self.total_xp.saturating_sub(floor).min(span);
        u8::try_from(into.saturating_mul(100) / span).unwrap_or(100)
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(u64::from(amount));
        self.total_xp = self.total_xp.saturating_add(u64::from(amount));
        self.level = level_for_total_xp(self.total_xp);
    }

    /// `increment` extends the streak, otherwise it resets to zero.
    pub fn update_streak(&mut self, increment: bool) {
        self.streak = if increment {
            self.streak.saturating_add(1)
        } else {
            0
        };
        self.max_streak = self.max_streak.max(self.streak);
    }

    /// Returns `true` only when a locked achievement was flipped.
    pub fn unlock_achievement(&mut self, id: &AchievementId) -> bool {
        self.achievements
            .iter_mut()
            .find(|a| a.id() == id)
            .is_some_and(Achievement::unlock)
    }

    pub fn set_achievement_progress(&mut self, id: &AchievementId, percent: u8) -> bool {
        self.achievements
            .iter_mut()
            .find(|a| a.id() == id)
            .is_some_and(|a| a.set_progress(percent))
    }

    pub fn consume_power_up(&mut self, kind: PowerUpKind) -> bool {
        self.power_ups.consume(kind)
    }

    /// Flip a setting and return its new value.
    pub fn toggle_setting(&mut self, name: SettingName) -> bool {
        self.settings.toggle(name)
    }
}

/// Default achievements carrying over state from `stored`. Unknown ids are
/// dropped, missing ones stay locked, and the first duplicate wins.
fn reconcile_achievements(stored: &[Achievement]) -> Vec<Achievement> {
    default_achievements()
        .into_iter()
        .map(|mut achievement| {
            if let Some(saved) = stored.iter().find(|a| a.id() == achievement.id()) {
                if let Some(percent) = saved.progress() {
                    achievement.set_progress(percent);
                }
                if saved.is_unlocked() {
                    achievement.unlock();
                }
            }
            achievement
        })
        .collect()
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::achievement::{FIRST_QUIZ, STREAK_3};

    fn float_level(total_xp: u64) -> u32 {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let level = ((total_xp as f64) / 100.0).sqrt().floor() as u32;
        level + 1
    }

    #[test]
    fn fresh_record_matches_documented_defaults() {
        let progress = UserProgress::new();
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.xp(), 0);
        assert_eq!(progress.total_xp(), 0);
        assert_eq!(progress.streak(), 0);
        assert_eq!(progress.max_streak(), 0);
        assert_eq!(progress.achievements().len(), 4);
        assert_eq!(progress.power_ups(), PowerUps::new(3, 2, 1));
        let settings = progress.settings();
        assert!(settings.get(SettingName::SoundEffects));
        assert!(!settings.get(SettingName::DarkMode));
        assert!(settings.get(SettingName::Animations));
        assert!(settings.get(SettingName::TimerMode));
    }

    #[test]
    fn add_100_xp_reaches_level_two() {
        let mut progress = UserProgress::new();
        progress.add_xp(100);
        assert_eq!(progress.total_xp(), 100);
        assert_eq!(progress.xp(), 100);
        assert_eq!(progress.level(), 2);
    }

    #[test]
    fn level_matches_float_formula_across_xp_sequence() {
        let mut progress = UserProgress::new();
        let amounts = [0, 1, 7, 92, 99, 1, 300, 3, 5_000, 17, 12_345, 250, 0, 99_999];
        for amount in amounts {
            progress.add_xp(amount);
            assert_eq!(progress.level(), float_level(progress.total_xp()));
            assert_eq!(progress.xp(), progress.total_xp());
        }
    }

    #[test]
    fn level_thresholds_line_up() {
        for level in 1..50 {
            let threshold = xp_for_level(level);
            assert_eq!(level_for_total_xp(threshold), level);
            if threshold > 0 {
                assert_eq!(level_for_total_xp(threshold - 1), level - 1);
            }
        }
    }

    #[test]
    fn max_streak_never_drops_below_streak() {
        let mut progress = UserProgress::new();
        let pattern = [true, true, false, true, true, true, false, false, true];
        let mut last_max = 0;
        for increment in pattern {
            progress.update_streak(increment);
            assert!(progress.max_streak() >= progress.streak());
            assert!(progress.max_streak() >= last_max);
            last_max = progress.max_streak();
        }
        assert_eq!(progress.streak(), 1);
        assert_eq!(progress.max_streak(), 3);
    }

    #[test]
    fn power_ups_never_go_negative() {
        let mut progress = UserProgress::new();
        for _ in 0..5 {
            progress.consume_power_up(PowerUpKind::SkipQuestion);
        }
        assert_eq!(progress.power_ups().count(PowerUpKind::SkipQuestion), 0);
        assert!(!progress.consume_power_up(PowerUpKind::SkipQuestion));
        assert_eq!(progress.power_ups().count(PowerUpKind::ExtraTime), 3);
    }

    #[test]
    fn unlock_is_idempotent_and_ignores_unknown_ids() {
        let mut progress = UserProgress::new();
        let id = AchievementId::new(FIRST_QUIZ);
        assert!(progress.unlock_achievement(&id));
        let once = progress.clone();
        assert!(!progress.unlock_achievement(&id));
        assert_eq!(progress, once);

        assert!(!progress.unlock_achievement(&AchievementId::new("nope")));
        assert_eq!(progress, once);
    }

    #[test]
    fn progress_tracking_targets_single_achievement() {
        let mut progress = UserProgress::new();
        let id = AchievementId::new(STREAK_3);
        assert!(progress.set_achievement_progress(&id, 66));
        assert_eq!(progress.achievement(&id).unwrap().progress(), Some(66));
        assert!(!progress.set_achievement_progress(&AchievementId::new("nope"), 10));
    }

    #[test]
    fn toggle_returns_new_value() {
        let mut progress = UserProgress::new();
        assert!(progress.toggle_setting(SettingName::DarkMode));
        assert!(progress.settings().dark_mode());
        assert!(!progress.toggle_setting(SettingName::DarkMode));
    }

    #[test]
    fn persisted_record_recomputes_derived_fields() {
        let progress = UserProgress::from_persisted(
            400,
            400,
            5,
            2,
            default_achievements(),
            PowerUps::default(),
            Settings::default(),
        );
        assert_eq!(progress.level(), 3);
        assert_eq!(progress.max_streak(), 5);
    }

    #[test]
    fn persisted_achievements_are_reconciled_with_defaults() {
        let mut streak = default_achievements().remove(1);
        streak.set_progress(66);
        let mut first = default_achievements().remove(0);
        first.unlock();
        let stray = Achievement::new(AchievementId::new("speed_demon"), "Speedy", "", "", 10)
            .unwrap();
        let stale_first = default_achievements().remove(0);

        let progress = UserProgress::from_persisted(
            0,
            0,
            0,
            0,
            vec![stray, streak, first, stale_first],
            PowerUps::default(),
            Settings::default(),
        );

        let ids: Vec<&str> = progress.achievements().iter().map(|a| a.id().as_str()).collect();
        let expected: Vec<Achievement> = default_achievements();
        let expected_ids: Vec<&str> = expected.iter().map(|a| a.id().as_str()).collect();
        assert_eq!(ids, expected_ids);
        assert!(progress.achievement(&AchievementId::new(FIRST_QUIZ)).unwrap().is_unlocked());
        assert_eq!(
            progress.achievement(&AchievementId::new(STREAK_3)).unwrap().progress(),
            Some(66)
        );
        assert_eq!(progress.unlocked_count(), 1);
    }

    #[test]
    fn empty_persisted_achievements_restore_the_full_set() {
        let progress = UserProgress::from_persisted(
            0,
            0,
            0,
            0,
            Vec::new(),
            PowerUps::default(),
            Settings::default(),
        );
        assert_eq!(progress.achievements().len(), 4);
        assert_eq!(progress.unlocked_count(), 0);
    }

    #[test]
    fn level_progress_is_relative_to_current_band() {
        let mut progress = UserProgress::new();
        progress.add_xp(250);
        // level 2 spans 100..400
        assert_eq!(progress.level(), 2);
        assert_eq!(progress.next_level_xp(), 400);
        assert_eq!(progress.level_progress_percent(), 50);
    }
}
