use crate::model::ids::ChallengeId;

/// A timed, themed goal offered on the daily-challenge page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyChallenge {
    pub id: ChallengeId,
    pub title: String,
    pub description: String,
    pub reward: String,
    pub completed: bool,
    pub questions: u32,
    pub time_limit_secs: u32,
}

impl DailyChallenge {
    #[must_use]
    pub fn can_start(&self) -> bool {
        !self.completed
    }
}
