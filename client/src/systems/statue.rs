//! Statue shake
//!
//! The statue's hit callback only raises a flag. This system turns the flag into
//! a short damped wobble about Y and ignores further hits until the wobble ends,
//! since the registry reports the statue on every blocked tick.

use bevy::prelude::*;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Seconds a shake lasts
pub const SHAKE_DURATION: f32 = 0.2;
/// Peak wobble in radians
pub const SHAKE_AMOUNT: f32 = 0.1;

/// Marker for the statue root
#[derive(Component)]
pub struct Statue;

#[derive(Component)]
pub struct StatueShake {
    /// Set by the obstacle registry callback
    hit: Arc<AtomicBool>,
    /// Seconds into the current shake, `None` when at rest
    elapsed: Option<f32>,
    rest_yaw: f32,
}

impl StatueShake {
    pub fn new(hit: Arc<AtomicBool>) -> Self {
        Self {
            hit,
            elapsed: None,
            rest_yaw: 0.0,
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.elapsed.is_some()
    }
}

/// Damped oscillation for `progress` in [0, 1]
pub fn shake_offset(progress: f32) -> f32 {
    (progress * PI * 4.0).sin() * SHAKE_AMOUNT * (1.0 - progress)
}

pub fn animate_statue(time: Res<Time>, mut statues: Query<(&mut Transform, &mut StatueShake)>) {
    for (mut transform, mut shake) in statues.iter_mut() {
        // Always consume the flag; hits during a shake are dropped
        let hit = shake.hit.swap(false, Ordering::Acquire);

        let Some(elapsed) = shake.elapsed else {
            if hit {
                debug!("Statue bumped, shaking");
                let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
                shake.rest_yaw = yaw;
                shake.elapsed = Some(0.0);
            }
            continue;
        };

        let elapsed = elapsed + time.delta_secs();
        if elapsed > SHAKE_DURATION {
            transform.rotation = Quat::from_rotation_y(shake.rest_yaw);
            shake.elapsed = None;
            continue;
        }

        let progress = elapsed / SHAKE_DURATION;
        transform.rotation = Quat::from_rotation_y(shake.rest_yaw + shake_offset(progress));
        shake.elapsed = Some(elapsed);
    }
}
