//! Player systems
//!
//! Spawns the body/head rig, runs one movement tick per frame and copies the
//! controller's transforms onto the rig for rendering.

use bevy::prelude::*;
use shared::{InputState, ObstacleRegistry, PlayerController, Settings};
use std::f32::consts::FRAC_PI_2;

/// Vertical field of view, degrees
const CAMERA_FOV_DEGREES: f32 = 75.0;

/// The player's body (yaw only)
#[derive(Component)]
pub struct PlayerBody;

/// The camera (pitch only), child of the body
#[derive(Component)]
pub struct PlayerHead;

/// Spawn the player body, its heading arrow and the first-person camera
pub fn spawn_player(
    mut commands: Commands,
    settings: Res<Settings>,
    controller: Res<PlayerController>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let player = &settings.player;

    commands
        .spawn((
            PlayerBody,
            Mesh3d(meshes.add(Cuboid::new(player.width, player.height, player.width))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(0.0, 1.0, 0.0, 0.7),
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            controller.body_transform(),
        ))
        .with_children(|body| {
            // Heading arrow
            body.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: 0.2,
                    height: 0.5,
                })),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 0.0, 0.0),
                    ..default()
                })),
                Transform::from_xyz(0.0, 1.0, -0.5)
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ));

            body.spawn((
                PlayerHead,
                Camera3d::default(),
                Projection::Perspective(PerspectiveProjection {
                    fov: CAMERA_FOV_DEGREES.to_radians(),
                    near: 0.1,
                    far: 1000.0,
                    ..default()
                }),
                controller.head_transform(),
            ));
        });

    info!(
        "Player spawned at {:?} (collision radius {})",
        controller.position(),
        controller.collision_radius()
    );
}

/// One movement tick per frame
pub fn step_player(
    input_state: Res<InputState>,
    mut controller: ResMut<PlayerController>,
    mut registry: ResMut<ObstacleRegistry>,
) {
    controller.tick(&input_state, &mut registry);
}

/// Copy the controller's body/head transforms onto the rendered rig
pub fn sync_player_transforms(
    controller: Res<PlayerController>,
    mut bodies: Query<&mut Transform, (With<PlayerBody>, Without<PlayerHead>)>,
    mut heads: Query<&mut Transform, (With<PlayerHead>, Without<PlayerBody>)>,
) {
    if !controller.is_changed() {
        return;
    }

    for mut transform in bodies.iter_mut() {
        *transform = controller.body_transform();
    }
    for mut transform in heads.iter_mut() {
        *transform = controller.head_transform();
    }
}
