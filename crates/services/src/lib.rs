#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use mathema_core::{Clock, QuestionGenerator};

pub use error::SessionError;
pub use sessions::{AnswerResult, AnsweredQuestion, GamePhase, GameSession, SessionProgress};
