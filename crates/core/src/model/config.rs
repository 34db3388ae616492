use serde::Serialize;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const QUESTION_COUNT_STEP: u32 = 5;
pub const MIN_QUESTION_COUNT: u32 = 5;
pub const MAX_QUESTION_COUNT: u32 = 20;

pub const MIN_MAX_FACTOR: u32 = 2;
pub const MAX_MAX_FACTOR: u32 = 12;

pub const MIN_OPERAND_B: u32 = 1;
pub const MAX_OPERAND_B: u32 = 12;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("question count must be one of 5, 10, 15 or 20 (got {value})")]
    InvalidQuestionCount { value: u32 },

    #[error("max factor must be between 2 and 12 (got {value})")]
    InvalidMaxFactor { value: u32 },

    #[error("cannot generate {count} questions with max factor {max_factor}")]
    InvalidGeneratorInput { count: u32, max_factor: u32 },
}

//
// ─── CONFIGURATION ─────────────────────────────────────────────────────────────
//

/// Adjustable parameters for one game.
///
/// - `question_count`: how many questions are asked, a multiple of 5 in `5..=20`
/// - `max_factor`: highest multiplication table drawn from, in `2..=12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameConfiguration {
    question_count: u32,
    max_factor: u32,
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self {
            question_count: MIN_QUESTION_COUNT,
            max_factor: 5,
        }
    }
}

impl GameConfiguration {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidQuestionCount` or
    /// `ConfigurationError::InvalidMaxFactor` when a value is out of its domain.
    pub fn new(question_count: u32, max_factor: u32) -> Result<Self, ConfigurationError> {
        validate_question_count(question_count)?;
        validate_max_factor(max_factor)?;
        Ok(Self {
            question_count,
            max_factor,
        })
    }

    /// Number of questions asked per game.
    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    /// Highest table the first operand is drawn from.
    #[must_use]
    pub fn max_factor(&self) -> u32 {
        self.max_factor
    }

    /// Returns a copy with a new question count.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidQuestionCount` if `value` is not in {5, 10, 15, 20}.
    pub fn with_question_count(self, value: u32) -> Result<Self, ConfigurationError> {
        validate_question_count(value)?;
        Ok(Self {
            question_count: value,
            ..self
        })
    }

    /// Returns a copy with a new max factor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidMaxFactor` if `value` is outside `2..=12`.
    pub fn with_max_factor(self, value: u32) -> Result<Self, ConfigurationError> {
        validate_max_factor(value)?;
        Ok(Self {
            max_factor: value,
            ..self
        })
    }

    /// Steps the question count up by 5, stopping at 20.
    #[must_use]
    pub fn incremented_question_count(self) -> Self {
        let next = (self.question_count + QUESTION_COUNT_STEP).min(MAX_QUESTION_COUNT);
        Self {
            question_count: next,
            ..self
        }
    }

    /// Steps the question count down by 5, stopping at 5.
    #[must_use]
    pub fn decremented_question_count(self) -> Self {
        let next = self
            .question_count
            .saturating_sub(QUESTION_COUNT_STEP)
            .max(MIN_QUESTION_COUNT);
        Self {
            question_count: next,
            ..self
        }
    }

    /// True while the stepper can still go up.
    #[must_use]
    pub fn can_increment_question_count(&self) -> bool {
        self.question_count < MAX_QUESTION_COUNT
    }

    /// True while the stepper can still go down.
    #[must_use]
    pub fn can_decrement_question_count(&self) -> bool {
        self.question_count > MIN_QUESTION_COUNT
    }

    /// Every selectable max factor, lowest first.
    #[must_use]
    pub fn max_factor_options() -> RangeInclusive<u32> {
        MIN_MAX_FACTOR..=MAX_MAX_FACTOR
    }

    /// Every selectable question count, lowest first.
    pub fn question_count_options() -> impl Iterator<Item = u32> {
        (MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).step_by(QUESTION_COUNT_STEP as usize)
    }
}

fn validate_question_count(value: u32) -> Result<(), ConfigurationError> {
    let in_range = (MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&value);
    if !in_range || value % QUESTION_COUNT_STEP != 0 {
        return Err(ConfigurationError::InvalidQuestionCount { value });
    }
    Ok(())
}

fn validate_max_factor(value: u32) -> Result<(), ConfigurationError> {
    if !GameConfiguration::max_factor_options().contains(&value) {
        return Err(ConfigurationError::InvalidMaxFactor { value });
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
