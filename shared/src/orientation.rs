//! Body yaw / head pitch.
//!
//! Yaw turns the whole body and is the only angle movement reads. Pitch only
//! tilts the head (camera) sub-frame, so looking up or down never changes the
//! walking direction and the camera never rolls.

use bevy::prelude::*;
use std::f32::consts::PI;

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]`.
pub const PITCH_LIMIT: f32 = PI / 2.5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// Body yaw in radians. Unbounded, never wrapped.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Head pitch in radians, always within [`PITCH_LIMIT`].
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Apply a raw pointer delta. Moving right turns left (yaw decreases),
    /// moving down looks down. Non-finite components are dropped.
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let yaw_delta = dx * sensitivity;
        if yaw_delta.is_finite() {
            self.yaw -= yaw_delta;
        }
        let pitch_delta = dy * sensitivity;
        if pitch_delta.is_finite() {
            self.pitch = clamp_pitch(self.pitch - pitch_delta);
        }
    }

    /// Keyboard turning.
    pub fn turn(&mut self, amount: f32) {
        if amount.is_finite() {
            self.yaw += amount;
        }
    }

    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn head_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }

    /// Copy yaw into `body` and pitch into `head`. Idempotent.
    pub fn sync_transforms(&self, body: &mut Transform, head: &mut Transform) {
        body.rotation = self.body_rotation();
        head.rotation = self.head_rotation();
    }
}

/// NaN collapses to level.
fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}
