#![forbid(unsafe_code)]

pub mod answer;
pub mod generator;
pub mod model;
pub mod time;

pub use answer::{AnswerOutcome, grade_answer, parse_answer};
pub use generator::QuestionGenerator;
pub use time::Clock;
