use services::SessionError;
use thiserror::Error;

/// User-safe failure surfaced by the view model.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("invalid game settings")]
    InvalidConfiguration,
    #[error("unexpected action for this screen")]
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::InvalidConfiguration => "Those settings are not available.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidConfiguration(_) => ViewError::InvalidConfiguration,
            _ => ViewError::Unknown,
        }
    }
}
