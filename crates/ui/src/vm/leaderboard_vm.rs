use quiz_core::model::RankedEntry;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub id: String,
    pub rank_label: String,
    pub podium: bool,
    pub avatar: String,
    pub name: String,
    pub score: u32,
    pub category: String,
    pub date: String,
    pub streak: u32,
}

impl From<&RankedEntry> for LeaderboardRowVm {
    fn from(row: &RankedEntry) -> Self {
        let rank_label = match row.rank {
            1 => "🥇".to_string(),
            2 => "🥈".to_string(),
            3 => "🥉".to_string(),
            rank => format!("#{rank}"),
        };
        Self {
            id: row.entry.id.clone(),
            rank_label,
            podium: row.is_podium(),
            avatar: row.entry.avatar.clone(),
            name: row.entry.name.clone(),
            score: row.entry.score,
            category: row.entry.category.clone(),
            date: format_date(row.entry.date),
            streak: row.entry.streak,
        }
    }
}

#[must_use]
pub fn map_leaderboard_rows(rows: &[RankedEntry]) -> Vec<LeaderboardRowVm> {
    rows.iter().map(LeaderboardRowVm::from).collect()
}
