use chrono::NaiveDate;

/// One row of the leaderboard fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub category: String,
    pub date: NaiveDate,
    pub streak: u32,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"All"` (case-insensitive) or an empty string means no filter.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, entry: &LeaderboardEntry) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => entry.category == *name,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Named(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFrame {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl TimeFrame {
    pub const ALL: [Self; 4] = [Self::All, Self::Today, Self::Week, Self::Month];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Today => "Today",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|frame| frame.label().eq_ignore_ascii_case(raw.trim()))
    }

    /// Whether `date` falls inside this window ending at `today` (inclusive).
    ///
    /// Future dates never match a bounded window.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let window_days = match self {
            Self::All => return true,
            Self::Today => 0,
            Self::Week => 6,
            Self::Month => 29,
        };
        let age = today.signed_duration_since(date).num_days();
        (0..=window_days).contains(&age)
    }
}

/// A leaderboard row with its 1-based position in a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: usize,
    pub entry: LeaderboardEntry,
}

impl RankedEntry {
    #[must_use]
    pub fn is_podium(&self) -> bool {
        self.rank <= 3
    }
}

/// Filter and rank rows: highest score first, ties keep fixture order.
#[must_use]
pub fn rank_entries(
    entries: &[LeaderboardEntry],
    category: &CategoryFilter,
    frame: TimeFrame,
    today: NaiveDate,
) -> Vec<RankedEntry> {
    let mut rows: Vec<&LeaderboardEntry> = entries
        .iter()
        .filter(|entry| category.matches(entry) && frame.contains(entry.date, today))
        .collect();
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows.into_iter()
        .enumerate()
        .map(|(idx, entry)| RankedEntry {
            rank: idx + 1,
            entry: entry.clone(),
        })
        .collect()
}
