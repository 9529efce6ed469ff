//! Bundled content: question banks, leaderboard rows and daily challenges.

use chrono::{Duration, NaiveDate};

use crate::error::Error;
use crate::model::{Category, CategoryId, ChallengeId, DailyChallenge, LeaderboardEntry, Question};

type QuestionSpec<'a> = (&'a str, [&'a str; 4], &'a str, u32);

fn build_category(
    id: &str,
    name: &str,
    icon: &str,
    specs: &[QuestionSpec<'_>],
) -> Result<Category, Error> {
    let questions = specs
        .iter()
        .map(|(prompt, options, answer, limit)| {
            Question::new(
                *prompt,
                options.iter().map(|o| (*o).to_string()).collect(),
                *answer,
                *limit,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Category::new(CategoryId::new(id), name, icon, questions)?)
}

/// The categories offered on the quiz page, in display order.
///
/// # Errors
///
/// Returns `Error` if a bundled question fails validation.
pub fn builtin_categories() -> Result<Vec<Category>, Error> {
    Ok(vec![
        build_category(
            "general",
            "General Knowledge",
            "🌍",
            &[
                (
                    "What is the capital of France?",
                    ["London", "Paris", "Berlin", "Madrid"],
                    "Paris",
                    15,
                ),
                (
                    "Which planet is known as the Red Planet?",
                    ["Venus", "Mars", "Jupiter", "Saturn"],
                    "Mars",
                    15,
                ),
            ],
        )?,
        build_category(
            "science",
            "Science",
            "🔬",
            &[
                (
                    "What is the chemical symbol for water?",
                    ["H2O", "CO2", "O2", "N2"],
                    "H2O",
                    10,
                ),
                (
                    "What is the largest organ in the human body?",
                    ["Heart", "Liver", "Skin", "Brain"],
                    "Skin",
                    10,
                ),
            ],
        )?,
        build_category(
            "history",
            "History",
            "📜",
            &[
                (
                    "Who was the first President of the United States?",
                    [
                        "Thomas Jefferson",
                        "George Washington",
                        "Abraham Lincoln",
                        "John Adams",
                    ],
                    "George Washington",
                    15,
                ),
                (
                    "In which year did World War II end?",
                    ["1943", "1944", "1945", "1946"],
                    "1945",
                    15,
                ),
            ],
        )?,
    ])
}

/// Leaderboard rows shown until real scores exist, dated relative to `today`
/// so every time frame has something to show.
#[must_use]
pub fn builtin_leaderboard(today: NaiveDate) -> Vec<LeaderboardEntry> {
    let rows: [(&str, &str, u32, &str, u32, &str, i64); 5] = [
        ("1", "Alex Johnson", 950, "General Knowledge", 5, "👨‍💻", 0),
        ("2", "Sarah Chen", 920, "Science", 3, "👩‍🔬", 2),
        ("3", "Mike Wilson", 890, "History", 4, "👨‍🏫", 5),
        ("4", "Emma Davis", 870, "General Knowledge", 2, "👩‍🎓", 12),
        ("5", "David Kim", 850, "Science", 1, "👨‍🔬", 35),
    ];

    rows.into_iter()
        .map(
            |(id, name, score, category, streak, avatar, days_ago)| LeaderboardEntry {
                id: id.into(),
                name: name.into(),
                score,
                category: category.into(),
                date: today - Duration::days(days_ago),
                streak,
                avatar: avatar.into(),
            },
        )
        .collect()
}

#[must_use]
pub fn builtin_daily_challenges() -> Vec<DailyChallenge> {
    vec![
        DailyChallenge {
            id: ChallengeId::new(1),
            title: "Science Sprint".into(),
            description: "Answer 10 science questions in under 2 minutes".into(),
            reward: "100 XP + Special Badge".into(),
            completed: false,
            questions: 10,
            time_limit_secs: 120,
        },
        DailyChallenge {
            id: ChallengeId::new(2),
            title: "General Knowledge Marathon".into(),
            description: "Complete 3 quizzes in different categories".into(),
            reward: "200 XP + Streak Booster".into(),
            completed: true,
            questions: 15,
            time_limit_secs: 300,
        },
        DailyChallenge {
            id: ChallengeId::new(3),
            title: "Quick Fire Round".into(),
            description: "Answer 5 questions correctly in a row".into(),
            reward: "50 XP + Speed Badge".into(),
            completed: false,
            questions: 5,
            time_limit_secs: 60,
        },
    ]
}
