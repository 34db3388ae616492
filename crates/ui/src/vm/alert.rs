use mathema_core::AnswerOutcome;
use mathema_core::model::{Question, SessionComplete};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Correct,
    Incorrect,
    GameOver,
}

/// Modal shown after an answer and once more when the game ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackAlert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl FeedbackAlert {
    #[must_use]
    pub fn for_answer(question: &Question, outcome: AnswerOutcome) -> Self {
        let (kind, title) = match outcome {
            AnswerOutcome::Correct => (AlertKind::Correct, "Correct!"),
            AnswerOutcome::Incorrect => (AlertKind::Incorrect, "Wrong!"),
        };
        Self {
            kind,
            title: title.to_string(),
            message: format!(
                "{} x {} = {}",
                question.operand_a(),
                question.operand_b(),
                question.answer()
            ),
        }
    }

    #[must_use]
    pub fn for_completion(completion: &SessionComplete) -> Self {
        let title = if completion.is_perfect() {
            "Perfect score!"
        } else {
            "Game over"
        };
        Self {
            kind: AlertKind::GameOver,
            title: title.to_string(),
            message: format!("You scored {}", completion.label()),
        }
    }
}
