mod controller;
mod countdown;
mod session;

pub use controller::{PowerUpOutcome, QuizController, SubmitOutcome};
pub use session::{Advance, AnswerRecord, QuizPhase, QuizSession, QuizSnapshot, TickOutcome};
