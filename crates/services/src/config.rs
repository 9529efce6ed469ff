use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Tunables for quiz sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    /// How long answer feedback stays on screen before the next question.
    pub feedback_pause: Duration,
    pub xp_per_correct: u32,
    /// Seconds added by the extra-time power-up.
    pub extra_time_secs: u32,
    pub shuffle_questions: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            feedback_pause: Duration::from_millis(1500),
            xp_per_correct: 10,
            extra_time_secs: 10,
            shuffle_questions: false,
        }
    }
}

impl QuizConfig {
    /// Defaults overridden by `QUIZ_FEEDBACK_MS`, `QUIZ_XP_PER_CORRECT`,
    /// `QUIZ_EXTRA_TIME_SECS` and `QUIZ_SHUFFLE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let feedback_pause = parse_var(&lookup, "QUIZ_FEEDBACK_MS")
            .map_or(defaults.feedback_pause, Duration::from_millis);
        let xp_per_correct =
            parse_var(&lookup, "QUIZ_XP_PER_CORRECT").unwrap_or(defaults.xp_per_correct);
        let extra_time_secs =
            parse_var(&lookup, "QUIZ_EXTRA_TIME_SECS").unwrap_or(defaults.extra_time_secs);
        let shuffle_questions = lookup("QUIZ_SHUFFLE")
            .map_or(defaults.shuffle_questions, |raw| parse_flag(&raw));

        Self {
            feedback_pause,
            xp_per_correct,
            extra_time_secs,
            shuffle_questions,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid config value");
            None
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = QuizConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.feedback_pause, Duration::from_millis(1500));
    }

    #[test]
    fn overrides_are_applied() {
        let config = QuizConfig::from_lookup(lookup_from(&[
            ("QUIZ_FEEDBACK_MS", "200"),
            ("QUIZ_XP_PER_CORRECT", "25"),
            ("QUIZ_EXTRA_TIME_SECS", "5"),
            ("QUIZ_SHUFFLE", "yes"),
        ]));
        assert_eq!(config.feedback_pause, Duration::from_millis(200));
        assert_eq!(config.xp_per_correct, 25);
        assert_eq!(config.extra_time_secs, 5);
        assert!(config.shuffle_questions);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = QuizConfig::from_lookup(lookup_from(&[
            ("QUIZ_XP_PER_CORRECT", "lots"),
            ("QUIZ_FEEDBACK_MS", "-1"),
        ]));
        assert_eq!(config.xp_per_correct, 10);
        assert_eq!(config.feedback_pause, Duration::from_millis(1500));
    }
}
