//! Player-related constants and types

use bevy::prelude::*;

/// Displacement per tick (world units, not scaled by frame time)
pub const PLAYER_MOVE_SPEED: f32 = 0.1;

/// Keyboard turn rate per tick (radians)
pub const PLAYER_TURN_SPEED: f32 = 0.03;

/// Player height (body box)
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Player width (body box footprint)
pub const PLAYER_WIDTH: f32 = 0.5;

/// Radius of the sphere used for obstacle queries
pub const PLAYER_COLLISION_RADIUS: f32 = 0.25;

/// Camera height above the body origin
pub const PLAYER_EYE_HEIGHT: f32 = 1.7;

/// Mouse sensitivity for look (radians per pixel)
pub const MOUSE_SENSITIVITY: f32 = 0.002;

/// Per-session player parameters and committed position.
///
/// Yaw and pitch live in [`crate::Orientation`]; everything else the movement
/// integrator needs is here. `collision_radius` is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    collision_radius: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub mouse_sensitivity: f32,
}

impl PlayerState {
    /// Create a player at `position`.
    ///
    /// A non-positive or non-finite `collision_radius` falls back to
    /// [`PLAYER_COLLISION_RADIUS`].
    pub fn new(position: Vec3, collision_radius: f32) -> Self {
        let collision_radius = if collision_radius.is_finite() && collision_radius > 0.0 {
            collision_radius
        } else {
            warn!(
                "Invalid collision radius {collision_radius}; using default {PLAYER_COLLISION_RADIUS}"
            );
            PLAYER_COLLISION_RADIUS
        };

        Self {
            position,
            collision_radius,
            move_speed: PLAYER_MOVE_SPEED,
            turn_speed: PLAYER_TURN_SPEED,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_turn_speed(mut self, turn_speed: f32) -> Self {
        self.turn_speed = turn_speed;
        self
    }

    pub fn with_mouse_sensitivity(mut self, mouse_sensitivity: f32) -> Self {
        self.mouse_sensitivity = mouse_sensitivity;
        self
    }

    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, PLAYER_HEIGHT * 0.5, 0.0), PLAYER_COLLISION_RADIUS)
    }
}
