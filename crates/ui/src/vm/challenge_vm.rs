use quiz_core::model::{ChallengeId, DailyChallenge};

use crate::vm::time_fmt::format_clock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeCardVm {
    pub id: ChallengeId,
    pub title: String,
    pub description: String,
    pub reward: String,
    pub completed: bool,
    pub questions_label: String,
    pub time_label: String,
}

impl From<&DailyChallenge> for ChallengeCardVm {
    fn from(challenge: &DailyChallenge) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title.clone(),
            description: challenge.description.clone(),
            reward: challenge.reward.clone(),
            completed: challenge.completed,
            questions_label: format!("{} questions", challenge.questions),
            time_label: format_clock(challenge.time_limit_secs),
        }
    }
}

#[must_use]
pub fn map_challenge_cards(challenges: &[DailyChallenge]) -> Vec<ChallengeCardVm> {
    challenges.iter().map(ChallengeCardVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_formats_limits() {
        let challenge = DailyChallenge {
            id: ChallengeId::new(1),
            title: "Science Sprint".into(),
            description: "Answer fast".into(),
            reward: "100 XP".into(),
            completed: false,
            questions: 10,
            time_limit_secs: 120,
        };
        let card = ChallengeCardVm::from(&challenge);
        assert_eq!(card.questions_label, "10 questions");
        assert_eq!(card.time_label, "2:00");
        assert!(!card.completed);
    }
}
