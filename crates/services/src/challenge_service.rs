use quiz_core::catalog::builtin_daily_challenges;
use quiz_core::model::{ChallengeId, DailyChallenge};

use crate::error::ChallengeError;

#[derive(Clone, Debug)]
pub struct ChallengeService {
    challenges: Vec<DailyChallenge>,
}

impl ChallengeService {
    #[must_use]
    pub fn new(challenges: Vec<DailyChallenge>) -> Self {
        Self { challenges }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_daily_challenges())
    }

    #[must_use]
    pub fn list(&self) -> &[DailyChallenge] {
        &self.challenges
    }

    #[must_use]
    pub fn get(&self, id: ChallengeId) -> Option<&DailyChallenge> {
        self.challenges.iter().find(|challenge| challenge.id == id)
    }

    /// Pick a challenge to start.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::NotFound` for unknown ids and
    /// `ChallengeError::AlreadyCompleted` for finished challenges.
    pub fn select(&self, id: ChallengeId) -> Result<&DailyChallenge, ChallengeError> {
        let challenge = self.get(id).ok_or(ChallengeError::NotFound(id))?;
        if !challenge.can_start() {
            return Err(ChallengeError::AlreadyCompleted(id));
        }
        Ok(challenge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_challenge_cannot_be_selected() {
        let service = ChallengeService::builtin();
        let done = service
            .list()
            .iter()
            .find(|challenge| challenge.completed)
            .unwrap();
        assert_eq!(
            service.select(done.id),
            Err(ChallengeError::AlreadyCompleted(done.id))
        );
    }

    #[test]
    fn open_challenge_is_selectable() {
        let service = ChallengeService::builtin();
        let open = service
            .list()
            .iter()
            .find(|challenge| !challenge.completed)
            .unwrap();
        assert_eq!(service.select(open.id).unwrap().title, open.title);
    }

    #[test]
    fn unknown_challenge_is_not_found() {
        let service = ChallengeService::builtin();
        let id = ChallengeId::new(999);
        assert_eq!(service.select(id), Err(ChallengeError::NotFound(id)));
    }
}
