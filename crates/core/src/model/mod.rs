mod config;
mod question;
mod summary;

pub use config::{
    ConfigurationError, GameConfiguration, MAX_MAX_FACTOR, MAX_OPERAND_B, MAX_QUESTION_COUNT,
    MIN_MAX_FACTOR, MIN_OPERAND_B, MIN_QUESTION_COUNT, QUESTION_COUNT_STEP,
};
pub use question::Question;
pub use summary::{SessionComplete, SummaryError};
