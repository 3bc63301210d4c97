//! Office layout: where every collidable (and decorative) piece of the round
//! room goes.
//!
//! Pure data so the client can spawn visuals from it and the tests can walk
//! through it without a renderer. The outer wall itself is not an obstacle; the
//! registry's boundary disk stands in for it.

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_4, PI, TAU};

use crate::obstacles::{HitCallback, Obstacle, ObstacleRegistry, ObstacleShape};
use crate::settings::WorldSettings;

/// Which piece of furniture a descriptor describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OfficePiece {
    Column(u32),
    Statue,
    Desk,
    Chair,
}

impl OfficePiece {
    pub fn label(&self) -> String {
        match self {
            OfficePiece::Column(i) => format!("column {i}"),
            OfficePiece::Statue => "statue".to_string(),
            OfficePiece::Desk => "desk".to_string(),
            OfficePiece::Chair => "chair".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleDescriptor {
    pub piece: OfficePiece,
    pub shape: ObstacleShape,
    pub transform: Transform,
    /// Wants a hit callback.
    pub interactive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OfficeLayout {
    pub room_radius: f32,
    pub room_height: f32,
    pub boundary_radius: f32,
    /// Registration order; earlier entries win overlapping hits.
    pub obstacles: Vec<ObstacleDescriptor>,
    /// Window placements facing the room centre (decorative).
    pub windows: Vec<Transform>,
    pub window_radius: f32,
}

pub const STATUE_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const DESK_SIZE: Vec3 = Vec3::new(2.0, 0.8, 1.0);
pub const CHAIR_SIZE: Vec3 = Vec3::new(0.8, 1.2, 0.8);

/// Lay out the round office for `world`.
pub fn office_layout(world: &WorldSettings) -> OfficeLayout {
    let room_radius = world.room_radius();
    let height = world.room_height;
    let mut obstacles = Vec::new();

    let ring = room_radius * world.column_ring_scale;
    for i in 0..world.column_count {
        let angle = i as f32 / world.column_count as f32 * TAU;
        obstacles.push(ObstacleDescriptor {
            piece: OfficePiece::Column(i),
            shape: ObstacleShape::cylinder(world.column_radius, height),
            transform: Transform::from_xyz(ring * angle.cos(), height * 0.5, ring * angle.sin()),
            interactive: false,
        });
    }

    obstacles.push(ObstacleDescriptor {
        piece: OfficePiece::Statue,
        // Grouped mesh (body, crown, arm, torch): no single box fits it
        shape: ObstacleShape::BoundingSphere { radius: None },
        transform: Transform::from_translation(STATUE_POSITION),
        interactive: true,
    });

    // Desk against the back wall, chair in front of it
    let desk_x = -world.room_width * 0.3;
    let desk_z = -world.room_width * 0.35;
    obstacles.push(ObstacleDescriptor {
        piece: OfficePiece::Desk,
        shape: ObstacleShape::cuboid(DESK_SIZE),
        transform: Transform::from_xyz(desk_x, DESK_SIZE.y * 0.5, desk_z)
            .with_rotation(Quat::from_rotation_y(FRAC_PI_4)),
        interactive: false,
    });
    obstacles.push(ObstacleDescriptor {
        piece: OfficePiece::Chair,
        shape: ObstacleShape::cuboid(CHAIR_SIZE),
        transform: Transform::from_xyz(desk_x, CHAIR_SIZE.y * 0.5, desk_z + 1.0)
            .with_rotation(Quat::from_rotation_y(FRAC_PI_4)),
        interactive: false,
    });

    // Windows sit halfway between columns
    let window_ring = room_radius * world.window_ring_scale;
    let window_y = height * 0.7;
    let offset = if world.window_count > 0 {
        PI / world.window_count as f32
    } else {
        0.0
    };
    let windows = (0..world.window_count)
        .map(|i| {
            let angle = i as f32 / world.window_count as f32 * TAU + offset;
            Transform::from_xyz(window_ring * angle.cos(), window_y, window_ring * angle.sin())
                .looking_at(Vec3::new(0.0, window_y, 0.0), Vec3::Y)
        })
        .collect();

    OfficeLayout {
        room_radius,
        room_height: height,
        boundary_radius: world.boundary_radius(),
        obstacles,
        windows,
        window_radius: world.window_radius,
    }
}

impl OfficeLayout {
    pub fn descriptor(&self, piece: OfficePiece) -> Option<&ObstacleDescriptor> {
        self.obstacles.iter().find(|d| d.piece == piece)
    }

    /// Hand every obstacle to a new registry. `callback_for` supplies the hit
    /// callback of each interactive piece; the layout is consumed.
    pub fn into_registry(
        self,
        mut callback_for: impl FnMut(OfficePiece) -> Option<HitCallback>,
    ) -> ObstacleRegistry {
        let mut registry = ObstacleRegistry::new();
        registry.set_boundary_radius(self.boundary_radius);

        for descriptor in self.obstacles {
            let mut obstacle = Obstacle::new(descriptor.shape, descriptor.transform)
                .with_label(descriptor.piece.label());
            if descriptor.interactive {
                match callback_for(descriptor.piece) {
                    Some(on_hit) => obstacle = obstacle.with_callback(on_hit),
                    None => debug!("No hit callback for {:?}", descriptor.piece),
                }
            }
            registry.insert(obstacle);
        }

        info!(
            "Office registry built: {} obstacles, boundary radius {:.3}",
            registry.len(),
            registry.boundary_radius()
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MoveOutcome;
    use crate::obstacles::ContactResult;
    use crate::settings::Settings;
    use crate::InputState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_layout_counts() {
        let layout = office_layout(&WorldSettings::default());
        // 8 columns, statue, desk, chair
        assert_eq!(layout.obstacles.len(), 11);
        assert_eq!(layout.windows.len(), 8);
        assert!((layout.boundary_radius - 6.375).abs() < 1e-6);

        let statue = layout.descriptor(OfficePiece::Statue).expect("statue");
        assert!(statue.interactive);
        assert_eq!(statue.transform.translation, STATUE_POSITION);
        assert_eq!(
            layout.obstacles.iter().filter(|d| d.interactive).count(),
            1
        );
    }

    #[test]
    fn test_columns_on_ring() {
        let world = WorldSettings::default();
        let layout = office_layout(&world);
        for d in layout.obstacles.iter().filter(|d| matches!(d.piece, OfficePiece::Column(_))) {
            let p = d.transform.translation;
            let r = Vec2::new(p.x, p.z).length();
            assert!((r - 6.75).abs() < 1e-4);
            assert_eq!(p.y, world.room_height * 0.5);
        }
    }

    #[test]
    fn test_windows_face_centre() {
        let layout = office_layout(&WorldSettings::default());
        for w in &layout.windows {
            let to_centre = (Vec3::new(0.0, w.translation.y, 0.0) - w.translation).normalize();
            assert!(w.forward().dot(to_centre) > 0.999);
        }
    }

    #[test]
    fn test_spawn_is_clear() {
        let settings = Settings::default();
        let registry = office_layout(&settings.world).into_registry(|_| None);
        assert_eq!(
            registry.query(settings.spawn_position(), settings.player.collision_radius),
            ContactResult::Clear
        );
    }

    #[test]
    fn test_walking_into_statue() {
        let settings = Settings::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_cb = hits.clone();
        let mut registry = office_layout(&settings.world).into_registry(|piece| {
            assert_eq!(piece, OfficePiece::Statue);
            let hits_cb = hits_cb.clone();
            let on_hit: HitCallback = Box::new(move || {
                hits_cb.fetch_add(1, Ordering::SeqCst);
            });
            Some(on_hit)
        });

        let mut controller = settings.player_controller();
        let input = InputState {
            forward: true,
            ..default()
        };

        let mut blocked = 0;
        for _ in 0..40 {
            if let MoveOutcome::Blocked(contact) = controller.tick(&input, &mut registry) {
                let ContactResult::Obstacle(id) = contact else {
                    panic!("expected the statue, got {contact:?}");
                };
                assert_eq!(
                    registry.obstacle(id).and_then(|o| o.label.as_deref()),
                    Some("statue")
                );
                blocked += 1;
            }
        }

        // Stops just short of the statue sphere and keeps bumping it
        let z = controller.position().z;
        assert!(z > 1.0 && z < 1.4, "z = {z}");
        assert!(blocked > 0);
        assert_eq!(hits.load(Ordering::SeqCst), blocked);
    }
}
