use serde::Serialize;

use mathema_core::AnswerOutcome;
use mathema_core::model::{Question, SessionComplete};

/// One graded answer, kept in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub submitted: String,
    pub parsed: Option<i64>,
    pub outcome: AnswerOutcome,
}

/// Outcome of `GameSession::submit_answer`.
///
/// `completion` is set only on the answer that finished the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub answered: AnsweredQuestion,
    pub score: u32,
    pub completion: Option<SessionComplete>,
}

impl AnswerResult {
    #[must_use]
    pub fn outcome(&self) -> AnswerOutcome {
        self.answered.outcome
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.answered.question
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }
}
