use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({score}) exceeds question count ({question_count})")]
    ScoreOutOfRange { score: u32, question_count: u32 },
}

/// Final result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionComplete {
    final_score: u32,
    question_count: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionComplete {
    /// Build the completion record for a game.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::ScoreOutOfRange` if `final_score > question_count`.
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn new(
        final_score: u32,
        question_count: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if final_score > question_count {
            return Err(SummaryError::ScoreOutOfRange {
                score: final_score,
                question_count,
            });
        }
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        Ok(Self {
            final_score,
            question_count,
            started_at,
            completed_at,
        })
    }

    /// Correct answers in the finished game.
    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    /// Number of questions the game asked.
    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    /// When `start` drew the questions.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the last answer was graded.
    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// `"{final_score}/{question_count}"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.final_score, self.question_count)
    }

    /// Time from start to the last answer.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }

    /// True when every answer was correct.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.final_score == self.question_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn label_and_elapsed() {
        let start = fixed_now();
        let end = start + Duration::seconds(42);
        let done = SessionComplete::new(4, 5, start, end).unwrap();
        assert_eq!(done.label(), "4/5");
        assert_eq!(done.elapsed(), Duration::seconds(42));
        assert!(!done.is_perfect());
    }

    #[test]
    fn rejects_impossible_scores_and_times() {
        let now = fixed_now();
        assert_eq!(
            SessionComplete::new(6, 5, now, now).unwrap_err(),
            SummaryError::ScoreOutOfRange {
                score: 6,
                question_count: 5
            }
        );
        assert_eq!(
            SessionComplete::new(1, 5, now, now - Duration::seconds(1)).unwrap_err(),
            SummaryError::InvalidTimeRange
        );
    }
}
