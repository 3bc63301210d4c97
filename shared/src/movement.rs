//! Per-frame movement integration.
//!
//! One [`PlayerController::tick`] per rendered frame: build a displacement from
//! the held flags and the body yaw, test the full candidate position against the
//! obstacle registry, then either commit it or stay put. There is no sliding and
//! no time scaling; each tick moves exactly `move_speed` along the input
//! direction.

use bevy::prelude::*;

use crate::obstacles::{ContactResult, ObstacleRegistry};
use crate::{InputState, Orientation, PlayerState, PLAYER_EYE_HEIGHT, PLAYER_HEIGHT};

/// What a tick did with the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No displacement this tick (no flags, or opposing flags cancel); registry not consulted.
    Idle,
    Moved,
    /// Candidate rejected; position unchanged.
    Blocked(ContactResult),
}

/// Body-local direction from the held flags, summed but not normalised.
///
/// In Bevy: +X is right, +Y is up, -Z is forward.
pub fn local_direction(input: &InputState) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if input.forward {
        direction.z -= 1.0;
    }
    if input.backward {
        direction.z += 1.0;
    }
    if input.left {
        direction.x -= 1.0;
    }
    if input.right {
        direction.x += 1.0;
    }
    direction
}

/// Rotate a body-local vector into world space using yaw only.
pub fn yaw_to_world(local: Vec3, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(
        local.x * cos + local.z * sin,
        local.y,
        -local.x * sin + local.z * cos,
    )
}

/// World-space displacement for one tick. Zero when opposing flags cancel.
pub fn displacement(input: &InputState, yaw: f32, move_speed: f32) -> Vec3 {
    let direction = local_direction(input);
    if direction.length_squared() == 0.0 {
        return Vec3::ZERO;
    }
    yaw_to_world(direction.normalize() * move_speed, yaw)
}

/// Owns the player's committed state and the body/head transform rig.
#[derive(Resource, Clone, Debug)]
pub struct PlayerController {
    state: PlayerState,
    orientation: Orientation,
    body: Transform,
    /// Child of `body` (origin at the body's centre); carries the eye offset and pitch.
    head: Transform,
}

impl PlayerController {
    pub fn new(state: PlayerState, orientation: Orientation) -> Self {
        let mut controller = Self {
            body: Transform::from_translation(state.position),
            head: Transform::from_xyz(0.0, PLAYER_EYE_HEIGHT - PLAYER_HEIGHT * 0.5, 0.0),
            state,
            orientation,
        };
        controller.sync_transforms();
        controller
    }

    /// Override the head's offset above the body origin.
    pub fn with_eye_offset(mut self, eye_offset: f32) -> Self {
        self.head.translation = Vec3::new(0.0, eye_offset, 0.0);
        self
    }

    /// Advance one frame.
    pub fn tick(&mut self, input: &InputState, registry: &mut ObstacleRegistry) -> MoveOutcome {
        let turn = input.turn_axis();
        if turn != 0.0 {
            self.orientation.turn(turn * self.state.turn_speed);
        }

        let outcome = if input.is_moving() {
            self.try_move(input, registry)
        } else {
            MoveOutcome::Idle
        };

        self.sync_transforms();
        trace!("tick: {:?} at {:?}", outcome, self.state.position);
        outcome
    }

    fn try_move(&mut self, input: &InputState, registry: &mut ObstacleRegistry) -> MoveOutcome {
        let step = displacement(input, self.orientation.yaw(), self.state.move_speed);
        if step == Vec3::ZERO {
            return MoveOutcome::Idle;
        }
        let candidate = self.state.position + step;

        let contact = registry.query(candidate, self.state.collision_radius());
        registry.notify(contact);

        if contact.is_contact() {
            MoveOutcome::Blocked(contact)
        } else {
            self.state.position = candidate;
            MoveOutcome::Moved
        }
    }

    /// Raw pointer motion. Ignored while the host has no pointer capture.
    pub fn on_look_delta(&mut self, dx: f32, dy: f32, capture_active: bool) {
        if !capture_active {
            return;
        }
        self.orientation
            .apply_look_delta(dx, dy, self.state.mouse_sensitivity);
    }

    /// Push position, yaw and pitch into the rig. Idempotent.
    pub fn sync_transforms(&mut self) {
        self.body.translation = self.state.position;
        self.orientation
            .sync_transforms(&mut self.body, &mut self.head);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.state.collision_radius()
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[inline]
    pub fn body_transform(&self) -> Transform {
        self.body
    }

    #[inline]
    pub fn head_transform(&self) -> Transform {
        self.head
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(PlayerState::default(), Orientation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::ObstacleShape;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::FRAC_PI_2;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn controller_at(position: Vec3, speed: f32) -> PlayerController {
        PlayerController::new(
            PlayerState::new(position, 0.3).with_move_speed(speed),
            Orientation::default(),
        )
    }

    fn open_room() -> ObstacleRegistry {
        let mut registry = ObstacleRegistry::new();
        registry.set_boundary_radius(7.5);
        registry
    }

    fn all_flag_combinations() -> impl Iterator<Item = InputState> {
        (1u8..16).map(|bits| InputState {
            forward: bits & 1 != 0,
            backward: bits & 2 != 0,
            left: bits & 4 != 0,
            right: bits & 8 != 0,
            ..default()
        })
    }

    #[test]
    fn test_local_direction_axes() {
        let forward = InputState {
            forward: true,
            ..default()
        };
        let left = InputState {
            left: true,
            ..default()
        };
        assert_eq!(local_direction(&forward), Vec3::NEG_Z);
        assert_eq!(local_direction(&left), Vec3::NEG_X);
    }

    #[test]
    fn test_yaw_rotation_matches_quat() {
        let local = Vec3::new(0.3, 0.0, -0.7);
        for yaw in [0.0, 0.4, FRAC_PI_2, -2.5, 9.0] {
            let expected = Quat::from_rotation_y(yaw) * local;
            assert!(yaw_to_world(local, yaw).distance(expected) < 1e-5);
        }
    }

    #[test]
    fn test_diagonal_not_faster() {
        let mut rng = StdRng::seed_from_u64(7);
        for input in all_flag_combinations() {
            let yaw: f32 = rng.gen_range(-10.0..10.0);
            let step = displacement(&input, yaw, 0.15);
            if local_direction(&input) == Vec3::ZERO {
                assert_eq!(step, Vec3::ZERO);
            } else {
                assert!((step.length() - 0.15).abs() < 1e-6, "{input:?}: {step:?}");
            }
        }
    }

    #[test]
    fn test_opposing_flags_stay_idle() {
        let mut registry = ObstacleRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_cb = hits.clone();
        registry.add_interactive_obstacle(
            ObstacleShape::BoundingSphere { radius: Some(1.0) },
            Transform::IDENTITY,
            move || {
                hits_cb.fetch_add(1, Ordering::SeqCst);
            },
        );

        // Already overlapping the sphere
        let start = Vec3::new(0.0, 0.0, 1.1);
        let mut controller = controller_at(start, 0.1);
        for input in [
            InputState {
                forward: true,
                backward: true,
                ..default()
            },
            InputState {
                left: true,
                right: true,
                ..default()
            },
        ] {
            assert_eq!(controller.tick(&input, &mut registry), MoveOutcome::Idle);
        }
        assert_eq!(controller.position(), start);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        // A real step out of the overlap is still tested (and blocked)
        let outcome = controller.tick(
            &InputState {
                backward: true,
                ..default()
            },
            &mut registry,
        );
        assert!(matches!(outcome, MoveOutcome::Blocked(_)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_movement_follows_yaw_not_pitch() {
        let mut registry = open_room();
        let mut controller = PlayerController::new(
            PlayerState::new(Vec3::ZERO, 0.3).with_move_speed(0.1),
            Orientation::new(FRAC_PI_2, 1.0),
        );
        let input = InputState {
            forward: true,
            ..default()
        };

        assert_eq!(controller.tick(&input, &mut registry), MoveOutcome::Moved);
        // Yaw +90 degrees faces -X; pitch leaves Y alone
        let p = controller.position();
        assert!((p.x + 0.1).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn test_blocked_move_keeps_exact_position() {
        let mut registry = open_room();
        registry.add_obstacle(
            ObstacleShape::Box {
                half_extents: Vec3::new(1.0, 1.0, 0.1),
            },
            Transform::from_xyz(0.0, 0.0, -1.0),
        );

        let start = Vec3::new(0.013, 0.0, -0.55);
        let mut controller = controller_at(start, 0.1);
        let input = InputState {
            forward: true,
            left: true,
            ..default()
        };

        for _ in 0..10 {
            let outcome = controller.tick(&input, &mut registry);
            assert!(matches!(outcome, MoveOutcome::Blocked(ContactResult::Obstacle(_))));
            assert_eq!(controller.position(), start);
        }
    }

    #[test]
    fn test_walks_until_boundary() {
        let mut registry = open_room();
        let mut controller = controller_at(Vec3::ZERO, 0.5);
        let input = InputState {
            right: true,
            ..default()
        };

        let mut moves = 0;
        while controller.tick(&input, &mut registry) == MoveOutcome::Moved {
            moves += 1;
            assert!(moves < 100);
        }
        // 14 steps reach x = 7.0; 7.0 + 0.3 < 7.5, but 7.5 + 0.3 breaches
        assert_eq!(moves, 14);
        assert!((controller.position().x - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_keyboard_turn_uses_turn_speed() {
        let mut registry = open_room();
        let mut controller = PlayerController::new(
            PlayerState::new(Vec3::ZERO, 0.3).with_turn_speed(0.05),
            Orientation::default(),
        );
        let input = InputState {
            turn_right: true,
            ..default()
        };

        for _ in 0..4 {
            assert_eq!(controller.tick(&input, &mut registry), MoveOutcome::Idle);
        }
        assert!((controller.orientation().yaw() + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_look_delta_requires_capture() {
        let mut controller = PlayerController::default();
        controller.on_look_delta(300.0, 100.0, false);
        assert_eq!(controller.orientation(), Orientation::default());

        controller.on_look_delta(300.0, 100.0, true);
        assert!(controller.orientation().yaw() < 0.0);
        assert!(controller.orientation().pitch() < 0.0);
    }

    #[test]
    fn test_non_finite_look_keeps_position_finite() {
        let mut registry = open_room();
        let mut controller = controller_at(Vec3::ZERO, 0.1);
        controller.on_look_delta(f32::INFINITY, 0.0, true);
        controller.on_look_delta(f32::NAN, f32::NAN, true);
        assert!(controller.orientation().yaw().is_finite());
        assert!(controller.orientation().pitch().is_finite());

        let input = InputState {
            forward: true,
            ..default()
        };
        assert_eq!(controller.tick(&input, &mut registry), MoveOutcome::Moved);
        assert!(controller.position().is_finite());
        assert!((controller.position().z + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_tick_syncs_rig() {
        let mut registry = open_room();
        let mut controller = controller_at(Vec3::new(1.0, 0.9, 1.0), 0.1);
        controller.on_look_delta(-250.0, 40.0, true);
        controller.tick(
            &InputState {
                backward: true,
                ..default()
            },
            &mut registry,
        );

        let body = controller.body_transform();
        let head = controller.head_transform();
        assert_eq!(body.translation, controller.position());
        assert_eq!(body.rotation, controller.orientation().body_rotation());
        assert_eq!(head.rotation, controller.orientation().head_rotation());

        controller.sync_transforms();
        assert_eq!(controller.body_transform(), body);
        assert_eq!(controller.head_transform(), head);
    }

    #[test]
    fn test_eye_offset() {
        let controller = controller_at(Vec3::new(0.0, 0.9, 0.0), 0.1);
        assert!((controller.head_transform().translation.y - 0.8).abs() < 1e-6);

        let controller = controller.with_eye_offset(0.5);
        assert_eq!(controller.head_transform().translation, Vec3::new(0.0, 0.5, 0.0));
    }
}
