//! Background music is owned by the presentation layer and handed to the view
//! model; the game session never touches it.

pub trait BackgroundMusic {
    fn play(&mut self);
    fn stop(&mut self);
}

/// Plays nothing. Used by the terminal front end and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentMusic;

impl BackgroundMusic for SilentMusic {
    fn play(&mut self) {}

    fn stop(&mut self) {}
}
