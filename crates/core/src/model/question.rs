use serde::Serialize;
use std::fmt;

/// A single multiplication prompt with its precomputed answer.
///
/// Questions are created in bulk when a game starts and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Question {
    operand_a: u32,
    operand_b: u32,
    answer: u64,
}

impl Question {
    /// Builds the question and precomputes its product.
    #[must_use]
    pub fn new(operand_a: u32, operand_b: u32) -> Self {
        Self {
            operand_a,
            operand_b,
            answer: u64::from(operand_a) * u64::from(operand_b),
        }
    }

    /// The table operand, drawn from `[2, max_factor]`.
    #[must_use]
    pub fn operand_a(&self) -> u32 {
        self.operand_a
    }

    /// The multiplier, drawn from `[1, 12]`.
    #[must_use]
    pub fn operand_b(&self) -> u32 {
        self.operand_b
    }

    /// The product, widened so any pair of `u32` operands fits.
    #[must_use]
    pub fn answer(&self) -> u64 {
        self.answer
    }

    /// Renders the prompt as shown to the player, e.g. `"7 x 8 = ?"`.
    #[must_use]
    pub fn prompt(&self) -> String {
        self.to_string()
    }

    /// Returns true when `value` equals the product.
    #[must_use]
    pub fn is_correct(&self, value: i64) -> bool {
        u64::try_from(value).is_ok_and(|v| v == self.answer)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} = ?", self.operand_a, self.operand_b)
    }
}
