//! Shared error types for the services crate.

use thiserror::Error;

use mathema_core::model::{ConfigurationError, SummaryError};

use crate::sessions::GamePhase;

/// Errors emitted by `GameSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigurationError),
    /// A collaborator sent an event the current phase does not accept.
    #[error("cannot {action} while {phase}")]
    InvalidStateTransition {
        phase: GamePhase,
        action: &'static str,
    },
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

impl SessionError {
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, SessionError::InvalidStateTransition { .. })
    }
}
