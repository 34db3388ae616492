mod phase;
mod progress;
mod result;
mod service;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use phase::GamePhase;
pub use progress::SessionProgress;
pub use result::{AnswerResult, AnsweredQuestion};
pub use service::GameSession;
