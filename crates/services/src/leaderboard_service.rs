use quiz_core::catalog::builtin_leaderboard;
use quiz_core::model::{CategoryFilter, LeaderboardEntry, RankedEntry, TimeFrame, rank_entries};

use crate::Clock;

/// Read-only leaderboard over fixture rows.
#[derive(Clone, Debug)]
pub struct LeaderboardService {
    clock: Clock,
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(clock: Clock, entries: Vec<LeaderboardEntry>) -> Self {
        Self { clock, entries }
    }

    /// Fixture rows dated relative to the clock's current day.
    #[must_use]
    pub fn builtin(clock: Clock) -> Self {
        Self::new(clock, builtin_leaderboard(clock.today()))
    }

    /// `All` followed by each category name in first-seen order.
    #[must_use]
    pub fn category_filters(&self) -> Vec<CategoryFilter> {
        let mut filters = vec![CategoryFilter::All];
        for entry in &self.entries {
            let filter = CategoryFilter::Named(entry.category.clone());
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
        filters
    }

    #[must_use]
    pub fn ranked(&self, category: &CategoryFilter, frame: TimeFrame) -> Vec<RankedEntry> {
        rank_entries(&self.entries, category, frame, self.clock.today())
    }
}
