//! World systems
//!
//! Builds the round office once at startup: lights, floor, ceiling, the
//! two-tone wall, columns, windows, the statue and the furniture. Every
//! collidable piece comes from `shared::office_layout`, which is then handed to
//! the obstacle registry.

use bevy::prelude::*;
use shared::{office_layout, HitCallback, OfficeLayout, OfficePiece, Settings};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::statue::{Statue, StatueShake};

// =============================================================================
// COMPONENTS
// =============================================================================

/// Root entity for all world visuals
#[derive(Component)]
pub struct OfficeRoot;

/// Segments used to approximate the round wall
const WALL_SEGMENTS: u32 = 32;
const WALL_THICKNESS: f32 = 0.05;

// =============================================================================
// SPAWNING
// =============================================================================

/// Spawn the office and insert its `ObstacleRegistry`
pub fn spawn_office(
    mut commands: Commands,
    settings: Res<Settings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let layout = office_layout(&settings.world);

    let root = commands
        .spawn((
            OfficeRoot,
            Transform::default(),
            GlobalTransform::default(),
            Visibility::default(),
            InheritedVisibility::default(),
        ))
        .id();

    // --- Lighting ---
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });
    commands.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.08)));

    let light = commands
        .spawn((
            PointLight {
                intensity: 1_500_000.0,
                range: 30.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(0.0, layout.room_height + 1.0, 0.0),
        ))
        .id();
    commands.entity(root).add_child(light);

    spawn_floor_and_ceiling(&mut commands, root, &layout, &mut meshes, &mut materials);
    spawn_outer_wall(&mut commands, root, &layout, &mut meshes, &mut materials);
    spawn_windows(&mut commands, root, &layout, &mut meshes, &mut materials);

    let column_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::rgb(0.07, 0.07, 0.07),
        perceptual_roughness: 0.2,
        reflectance: 0.8,
        ..default()
    });
    let wood = materials.add(StandardMaterial {
        base_color: Color::srgb(0.29, 0.22, 0.16),
        perceptual_roughness: 0.35,
        ..default()
    });
    let upholstery = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.0, 0.0),
        perceptual_roughness: 0.35,
        ..default()
    });

    let statue_hit = Arc::new(AtomicBool::new(false));

    for descriptor in &layout.obstacles {
        let entity = match descriptor.piece {
            OfficePiece::Column(_) => spawn_column(
                &mut commands,
                descriptor.transform,
                settings.world.column_radius,
                layout.room_height,
                &mut meshes,
                column_material.clone(),
            ),
            OfficePiece::Statue => spawn_statue(
                &mut commands,
                descriptor.transform,
                statue_hit.clone(),
                &mut meshes,
                &mut materials,
            ),
            OfficePiece::Desk => commands
                .spawn((
                    Mesh3d(meshes.add(Cuboid::from_size(shared::world::DESK_SIZE))),
                    MeshMaterial3d(wood.clone()),
                    descriptor.transform,
                ))
                .id(),
            OfficePiece::Chair => commands
                .spawn((
                    Mesh3d(meshes.add(Cuboid::from_size(shared::world::CHAIR_SIZE))),
                    MeshMaterial3d(upholstery.clone()),
                    descriptor.transform,
                ))
                .id(),
        };
        commands.entity(root).add_child(entity);
    }

    // The registry takes ownership of the obstacle records from here on
    let registry = layout.into_registry(|piece| match piece {
        OfficePiece::Statue => {
            let statue_hit = statue_hit.clone();
            let on_hit: HitCallback = Box::new(move || statue_hit.store(true, Ordering::Release));
            Some(on_hit)
        }
        _ => None,
    });
    commands.insert_resource(registry);
}

fn spawn_floor_and_ceiling(
    commands: &mut Commands,
    root: Entity,
    layout: &OfficeLayout,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let disk = meshes.add(Circle::new(layout.room_radius));

    // Blue carpet
    let floor = commands
        .spawn((
            Mesh3d(disk.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.10, 0.14, 0.49),
                perceptual_roughness: 0.95,
                ..default()
            })),
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        ))
        .id();

    let ceiling = commands
        .spawn((
            Mesh3d(disk),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::WHITE,
                ..default()
            })),
            Transform::from_xyz(0.0, layout.room_height, 0.0)
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        ))
        .id();

    commands.entity(root).add_children(&[floor, ceiling]);
}

/// Wallpaper above, white wainscoting below
fn spawn_outer_wall(
    commands: &mut Commands,
    root: Entity,
    layout: &OfficeLayout,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let radius = layout.room_radius;
    let height = layout.room_height;
    // Slight overlap so the seams between panels close up
    let panel_width = 2.0 * radius * (PI / WALL_SEGMENTS as f32).sin() * 1.02;

    let sections = [
        (height * 0.6, height * 0.7, Color::srgb(0.83, 0.76, 0.62)),
        (height * 0.4, height * 0.2, Color::WHITE),
    ];

    for (section_height, y, color) in sections {
        let mesh = meshes.add(Cuboid::new(panel_width, section_height, WALL_THICKNESS));
        let material = materials.add(StandardMaterial {
            base_color: color,
            cull_mode: None,
            double_sided: true,
            ..default()
        });

        for i in 0..WALL_SEGMENTS {
            let angle = (i as f32 + 0.5) / WALL_SEGMENTS as f32 * TAU;
            let position = Vec3::new(radius * angle.cos(), y, radius * angle.sin());
            let panel = commands
                .spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(position)
                        .looking_at(Vec3::new(0.0, y, 0.0), Vec3::Y),
                ))
                .id();
            commands.entity(root).add_child(panel);
        }
    }
}

fn spawn_windows(
    commands: &mut Commands,
    root: Entity,
    layout: &OfficeLayout,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    if layout.windows.is_empty() {
        return;
    }

    let mesh = meshes.add(Circle::new(layout.window_radius));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::rgb(0.5, 0.5, 0.5),
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    });

    for transform in &layout.windows {
        let window = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                *transform,
            ))
            .id();
        commands.entity(root).add_child(window);
    }
}

fn spawn_column(
    commands: &mut Commands,
    transform: Transform,
    radius: f32,
    height: f32,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
) -> Entity {
    let trim_height = height * 0.1;
    let trim = meshes.add(ConicalFrustum {
        radius_top: radius * 1.5,
        radius_bottom: radius,
        height: trim_height,
    });

    commands
        .spawn((
            Mesh3d(meshes.add(Cylinder::new(radius, height))),
            MeshMaterial3d(material.clone()),
            transform,
        ))
        .with_children(|column| {
            // Capital
            column.spawn((
                Mesh3d(trim.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, height * 0.5 - trim_height * 0.5, 0.0),
            ));
            // Base (capital flipped)
            column.spawn((
                Mesh3d(trim),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, -height * 0.5 + trim_height * 0.5, 0.0)
                    .with_rotation(Quat::from_rotation_x(PI)),
            ));
        })
        .id()
}

fn spawn_statue(
    commands: &mut Commands,
    transform: Transform,
    hit: Arc<AtomicBool>,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    // Copper green
    let patina = materials.add(StandardMaterial {
        base_color: Color::srgb(0.48, 0.62, 0.54),
        metallic: 0.5,
        perceptual_roughness: 0.5,
        ..default()
    });

    commands
        .spawn((
            Statue,
            StatueShake::new(hit),
            transform,
            Visibility::default(),
        ))
        .with_children(|statue| {
            // Robe
            statue.spawn((
                Mesh3d(meshes.add(ConicalFrustum {
                    radius_top: 0.3,
                    radius_bottom: 0.6,
                    height: 2.0,
                })),
                MeshMaterial3d(patina.clone()),
                Transform::default(),
            ));
            // Crown
            statue.spawn((
                Mesh3d(meshes.add(Cylinder::new(0.4, 0.4))),
                MeshMaterial3d(patina.clone()),
                Transform::from_xyz(0.0, 1.2, 0.0),
            ));
            // Raised arm
            statue.spawn((
                Mesh3d(meshes.add(Cylinder::new(0.1, 1.0))),
                MeshMaterial3d(patina.clone()),
                Transform::from_xyz(0.4, 0.8, 0.0).with_rotation(Quat::from_rotation_z(FRAC_PI_4)),
            ));
            // Torch
            statue.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: 0.2,
                    height: 0.4,
                })),
                MeshMaterial3d(patina),
                Transform::from_xyz(0.8, 1.2, 0.0),
            ));
        })
        .id()
}
