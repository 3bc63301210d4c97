//! Held movement flags.
//!
//! The host feeds key transitions in; the movement tick reads the flags. A flag
//! stays set until its key is released, so a held key moves the player every
//! tick.

use bevy::prelude::*;

/// Which flag a key drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Forward,
    Backward,
    Left,
    Right,
    TurnLeft,
    TurnRight,
}

impl InputAction {
    /// WASD and arrows move, Q/E turn.
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Self::Forward),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Self::Backward),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Self::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Self::Right),
            KeyCode::KeyQ => Some(Self::TurnLeft),
            KeyCode::KeyE => Some(Self::TurnRight),
            _ => None,
        }
    }
}

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl InputState {
    /// Set or clear the flag bound to `code`. Returns false for unbound keys.
    pub fn on_key_transition(&mut self, code: KeyCode, pressed: bool) -> bool {
        let Some(action) = InputAction::from_key(code) else {
            return false;
        };
        self.set(action, pressed);
        true
    }

    pub fn set(&mut self, action: InputAction, pressed: bool) {
        let flag = match action {
            InputAction::Forward => &mut self.forward,
            InputAction::Backward => &mut self.backward,
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::TurnLeft => &mut self.turn_left,
            InputAction::TurnRight => &mut self.turn_right,
        };
        *flag = pressed;
    }

    /// Any of the four move flags held.
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// +1 turning left (yaw increases), -1 turning right, 0 when both or neither.
    pub fn turn_axis(&self) -> f32 {
        match (self.turn_left, self.turn_right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Release everything, e.g. when the pointer capture is lost.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
