use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse mode of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Configuring,
    Playing,
    Finished,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Configuring => "configuring",
            GamePhase::Playing => "playing",
            GamePhase::Finished => "finished",
        };
        f.write_str(name)
    }
}
