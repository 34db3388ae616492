mod alert;
mod game_vm;

pub use alert::{AlertKind, FeedbackAlert};
pub use game_vm::{GameIntent, GameVm};
