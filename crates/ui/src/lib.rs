pub mod audio;
pub mod error;
pub mod vm;

pub use audio::{BackgroundMusic, SilentMusic};
pub use error::ViewError;
pub use vm::{AlertKind, FeedbackAlert, GameIntent, GameVm};
