pub mod config;
pub mod data;
pub mod feedback;
pub mod game;
pub mod input;
pub mod interaction;
pub mod math;
pub mod placement;
pub mod render;
pub mod router;
pub mod state;
pub mod ui;
pub mod util;

/// Whether the cursor is locked to the window for camera look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCapture {
    pub grabbed: bool,
    pub visible: bool,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum GameMode {
    // Player steers the ship and interacts with the world
    #[default]
    Playing,
    // Simulation is frozen, cursor is free
    Paused,
    // Title menu
    Menu,
}

impl GameMode {
    pub fn toggle(&mut self) {
        use GameMode::*;
        *self = match self {
            Playing => Paused,
            Paused | Menu => Playing,
        }
    }

    /// The cursor state that belongs to this mode
    pub fn cursor(&self) -> CursorCapture {
        let playing = matches!(self, GameMode::Playing);
        CursorCapture {
            grabbed: playing,
            visible: !playing,
        }
    }
}
