use thiserror::Error;

use crate::model::ids::CategoryId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least one option")]
    NoOptions,

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("correct answer {0:?} is not one of the options")]
    AnswerNotInOptions(String),

    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with its own countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    time_limit_secs: u32,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, options are empty or
    /// duplicated, the answer is not an option, or the time limit is zero.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        time_limit_secs: u32,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        for (idx, option) in options.iter().enumerate() {
            if options[..idx].contains(option) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionError::AnswerNotInOptions(correct_answer));
        }
        if time_limit_secs == 0 {
            return Err(QuestionError::InvalidTimeLimit);
        }

        Ok(Self {
            prompt,
            options,
            correct_answer,
            time_limit_secs,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// An empty choice (timeout) is never correct.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        !choice.is_empty() && choice == self.correct_answer
    }
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// A named, ordered question list. An empty list is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    icon: String,
    questions: Vec<Question>,
}

impl Category {
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is blank.
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        icon: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            icon: icon.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Same category with a different question order or subset.
    #[must_use]
    pub fn with_questions(&self, questions: Vec<Question>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn validates_answer_membership() {
        let err = Question::new("2+2?", opts(&["3", "5"]), "4", 10).unwrap_err();
        assert_eq!(err, QuestionError::AnswerNotInOptions("4".into()));
    }

    #[test]
    fn rejects_duplicates_and_zero_limit() {
        assert_eq!(
            Question::new("Q", opts(&["a", "a"]), "a", 10).unwrap_err(),
            QuestionError::DuplicateOption("a".into())
        );
        assert_eq!(
            Question::new("Q", opts(&["a"]), "a", 0).unwrap_err(),
            QuestionError::InvalidTimeLimit
        );
        assert_eq!(
            Question::new("  ", opts(&["a"]), "a", 5).unwrap_err(),
            QuestionError::EmptyPrompt
        );
    }

    #[test]
    fn empty_choice_is_never_correct() {
        let q = Question::new("2+2?", opts(&["3", "4"]), "4", 10).unwrap();
        assert!(q.is_correct("4"));
        assert!(!q.is_correct("3"));
        assert!(!q.is_correct(""));
    }

    #[test]
    fn category_allows_empty_question_list() {
        let category = Category::new(CategoryId::new("empty"), "Empty", "∅", Vec::new()).unwrap();
        assert_eq!(category.question_count(), 0);
        assert!(category.question(0).is_none());
    }
}
