use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{
    ConfigurationError, GameConfiguration, MAX_OPERAND_B, MIN_MAX_FACTOR, MIN_OPERAND_B, Question,
};

/// Draws multiplication questions.
///
/// Each question is drawn independently: `operand_a` from `[2, max_factor]` and
/// `operand_b` from `[1, 12]`. Repeats within one game are allowed.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    rng: StdRng,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionGenerator {
    /// Returns a generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Returns a deterministic generator for tests and reproducible games.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` questions in draw order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidGeneratorInput` if `count < 1` or `max_factor < 2`.
    pub fn generate(
        &mut self,
        count: u32,
        max_factor: u32,
    ) -> Result<Vec<Question>, ConfigurationError> {
        if count < 1 || max_factor < MIN_MAX_FACTOR {
            return Err(ConfigurationError::InvalidGeneratorInput { count, max_factor });
        }

        let questions = (0..count)
            .map(|_| {
                let a = self.rng.random_range(MIN_MAX_FACTOR..=max_factor);
                let b = self.rng.random_range(MIN_OPERAND_B..=MAX_OPERAND_B);
                Question::new(a, b)
            })
            .collect();
        Ok(questions)
    }

    /// Generate the questions for one game with the given configuration.
    ///
    /// # Errors
    ///
    /// Never fails for a validated configuration; see [`QuestionGenerator::generate`].
    pub fn generate_for(
        &mut self,
        configuration: &GameConfiguration,
    ) -> Result<Vec<Question>, ConfigurationError> {
        self.generate(configuration.question_count(), configuration.max_factor())
    }
}
