//! Tolerant answer checking.
//!
//! Whatever the player typed is graded; text that is not a plain integer is
//! simply a wrong answer, never an error.

use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Result of grading one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }
}

/// Parses a submitted answer as a base-10 integer.
///
/// Surrounding whitespace is ignored. The remainder must be an optional `-`
/// followed by ASCII digits only; a leading `+`, inner spaces, separators and
/// values that overflow `i64` yield `None`.
#[must_use]
pub fn parse_answer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Grades `raw` against `question`.
#[must_use]
pub fn grade_answer(question: &Question, raw: &str) -> AnswerOutcome {
    match parse_answer(raw) {
        Some(value) if question.is_correct(value) => AnswerOutcome::Correct,
        _ => AnswerOutcome::Incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_integers() {
        assert_eq!(parse_answer("42"), Some(42));
        assert_eq!(parse_answer("  42\n"), Some(42));
        assert_eq!(parse_answer("007"), Some(7));
        assert_eq!(parse_answer("-3"), Some(-3));
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "   ", "abc", "+4", "4 2", "4.0", "1,000", "--1", "-", "٤٢"] {
            assert_eq!(parse_answer(raw), None, "{raw:?}");
        }
        assert_eq!(parse_answer("99999999999999999999"), None);
    }

    #[test]
    fn grading_treats_garbage_as_incorrect() {
        let q = Question::new(6, 7);
        assert_eq!(grade_answer(&q, "42"), AnswerOutcome::Correct);
        assert_eq!(grade_answer(&q, " 42 "), AnswerOutcome::Correct);
        assert_eq!(grade_answer(&q, "41"), AnswerOutcome::Incorrect);
        assert_eq!(grade_answer(&q, "forty-two"), AnswerOutcome::Incorrect);
        assert_eq!(grade_answer(&q, "-42"), AnswerOutcome::Incorrect);
    }
}
