//! Device input to the core's `InputState`
//!
//! Keys only flip flags and pointer motion only turns the view; neither runs a
//! collision query. The movement tick in `systems::player` does that.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use shared::{InputState, PlayerController};

use crate::states::GameState;

/// Forward discrete key transitions to the movement flags
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_state: ResMut<InputState>,
) {
    for code in keyboard.get_just_pressed() {
        input_state.on_key_transition(*code, true);
    }
    for code in keyboard.get_just_released() {
        input_state.on_key_transition(*code, false);
    }
}

/// Handle mouse input for looking around
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    game_state: Res<State<GameState>>,
    mut controller: ResMut<PlayerController>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    if delta != Vec2::ZERO {
        let captured = *game_state.get() == GameState::Walking;
        controller.on_look_delta(delta.x, delta.y, captured);
    }
}

/// Click to capture the pointer
pub fn grab_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window_entity) = windows.single() else {
        return;
    };

    if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
        info!("Pointer captured");
        next_state.set(GameState::Walking);
    } else {
        warn!("Primary window has no CursorOptions; cannot capture pointer");
    }
}

/// ESC gives the pointer back
pub fn handle_escape_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Paused);
    }
}

/// Entering pause: free the cursor and drop every held flag
pub fn release_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut input_state: ResMut<InputState>,
) {
    input_state.clear();

    if let Ok(window_entity) = windows.single() {
        if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
            cursor.grab_mode = CursorGrabMode::None;
            cursor.visible = true;
            info!("Pointer released");
        }
    }
}
