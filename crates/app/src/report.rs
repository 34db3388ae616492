use mathema_core::model::{GameConfiguration, SessionComplete};
use serde::Serialize;
use services::{AnsweredQuestion, GameSession};

/// JSON line written after each finished game with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub round: u32,
    pub score: String,
    pub elapsed_secs: i64,
    pub configuration: GameConfiguration,
    pub completion: SessionComplete,
    pub answers: Vec<AnsweredQuestion>,
}

impl GameReport {
    /// Snapshot a finished session. `None` unless the game just finished.
    #[must_use]
    pub fn capture(round: u32, session: &GameSession) -> Option<Self> {
        let completion = session.completion()?.clone();
        Some(Self {
            round,
            score: completion.label(),
            elapsed_secs: completion.elapsed().num_seconds(),
            configuration: *session.configuration(),
            completion,
            answers: session.answers().to_vec(),
        })
    }
}
