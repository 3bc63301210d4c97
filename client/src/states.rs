//! Game state machine

use bevy::prelude::*;

/// Pointer capture drives the whole session: movement and look only run while
/// the cursor is locked to the window.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Cursor free, instructions shown
    #[default]
    Paused,
    /// Cursor captured
    Walking,
}
