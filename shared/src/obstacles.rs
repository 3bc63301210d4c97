//! Static obstacle registry.
//!
//! Holds every collidable shape of the room plus the circular boundary disk and
//! answers "does a sphere of radius `r` at `p` touch anything?" queries.
//!
//! Queries are a linear scan in registration order. The first obstacle that
//! reports contact wins, so when two shapes overlap the earlier one owns the hit
//! (and its callback).
//!
//! [`ObstacleRegistry::query`] is pure. Interaction callbacks only run through
//! [`ObstacleRegistry::notify`], which the caller invokes with the query result.

use bevy::prelude::*;
use std::fmt;

/// Bounding radius used by [`ObstacleShape::BoundingSphere`] when none is given.
pub const DEFAULT_BOUNDING_RADIUS: f32 = 1.0;

/// Callback fired when an interactive obstacle is the one reporting contact.
pub type HitCallback = Box<dyn FnMut() + Send + Sync>;

/// Collision shape in obstacle-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObstacleShape {
    /// Padded-AABB test against the local box.
    Box { half_extents: Vec3 },
    /// Y-aligned cylinder centred on the local origin.
    Cylinder { radius: f32, half_height: f32 },
    /// Sphere for grouped shapes without simple box geometry.
    BoundingSphere { radius: Option<f32> },
}

impl ObstacleShape {
    pub fn cuboid(size: Vec3) -> Self {
        Self::Box {
            half_extents: size * 0.5,
        }
    }

    pub fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder {
            radius,
            half_height: height * 0.5,
        }
    }

    /// Non-finite or negative parameters make a shape malformed.
    pub fn is_well_formed(&self) -> bool {
        match *self {
            ObstacleShape::Box { half_extents } => {
                half_extents.is_finite() && half_extents.min_element() >= 0.0
            }
            ObstacleShape::Cylinder {
                radius,
                half_height,
            } => radius.is_finite() && half_height.is_finite() && radius >= 0.0 && half_height >= 0.0,
            ObstacleShape::BoundingSphere { radius } => {
                radius.map_or(true, |r| r.is_finite() && r >= 0.0)
            }
        }
    }

    /// Contact test for a sphere of `radius` at `local` (already in shape space).
    pub fn contains(&self, local: Vec3, radius: f32) -> bool {
        match *self {
            ObstacleShape::Box { half_extents } => {
                local.x.abs() < half_extents.x + radius
                    && local.y.abs() < half_extents.y + radius
                    && local.z.abs() < half_extents.z + radius
            }
            ObstacleShape::Cylinder {
                radius: cyl_radius,
                half_height,
            } => {
                let horizontal = Vec2::new(local.x, local.z).length();
                horizontal < cyl_radius + radius && local.y.abs() < half_height + radius
            }
            ObstacleShape::BoundingSphere { radius: bounding } => {
                local.length() < bounding.unwrap_or(DEFAULT_BOUNDING_RADIUS) + radius
            }
        }
    }
}

/// Index of an obstacle in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub usize);

/// Result of a registry query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactResult {
    Clear,
    /// Outside the boundary disk.
    Boundary,
    /// First registered obstacle reporting contact.
    Obstacle(ObstacleId),
}

impl ContactResult {
    #[inline]
    pub fn is_contact(&self) -> bool {
        !matches!(self, ContactResult::Clear)
    }

    #[inline]
    pub fn is_clear(&self) -> bool {
        matches!(self, ContactResult::Clear)
    }
}

/// A static collidable shape.
pub struct Obstacle {
    pub shape: ObstacleShape,
    /// World placement. Scale is ignored.
    pub transform: Transform,
    /// Name used in logs.
    pub label: Option<String>,
    on_hit: Option<HitCallback>,
    well_formed: bool,
}

impl Obstacle {
    pub fn new(shape: ObstacleShape, transform: Transform) -> Self {
        let well_formed = shape.is_well_formed()
            && transform.translation.is_finite()
            && transform.rotation.is_finite()
            && transform.rotation.is_normalized();

        Self {
            shape,
            transform,
            label: None,
            on_hit: None,
            well_formed,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_callback(mut self, on_hit: impl FnMut() + Send + Sync + 'static) -> Self {
        self.on_hit = Some(Box::new(on_hit));
        self
    }

    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.on_hit.is_some()
    }

    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// World-space point expressed in this obstacle's local frame.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.transform.rotation.inverse() * (point - self.transform.translation)
    }

    /// Malformed obstacles never collide.
    pub fn contains(&self, point: Vec3, radius: f32) -> bool {
        self.well_formed && self.shape.contains(self.to_local(point), radius)
    }

    fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }
}

impl fmt::Debug for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Obstacle")
            .field("shape", &self.shape)
            .field("transform", &self.transform)
            .field("label", &self.label)
            .field("interactive", &self.is_interactive())
            .field("well_formed", &self.well_formed)
            .finish()
    }
}

/// Every static obstacle of the session plus the boundary disk.
#[derive(Resource, Default, Debug)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    /// Horizontal limit around the world origin. 0 means unconstrained.
    boundary_radius: f32,
    boundary_set: bool,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the radius of the playable disk (infinite vertical extent).
    ///
    /// Negative or non-finite values are treated as 0 (unconstrained).
    pub fn set_boundary_radius(&mut self, radius: f32) {
        if self.boundary_set {
            warn!(
                "Boundary radius set twice ({} -> {radius}); keeping the latest",
                self.boundary_radius
            );
        }

        self.boundary_radius = if radius.is_finite() && radius >= 0.0 {
            radius
        } else {
            warn!("Invalid boundary radius {radius}; leaving the room unconstrained");
            0.0
        };
        self.boundary_set = true;
    }

    #[inline]
    pub fn boundary_radius(&self) -> f32 {
        self.boundary_radius
    }

    /// Append a static obstacle. O(1).
    pub fn add_obstacle(&mut self, shape: ObstacleShape, transform: Transform) -> ObstacleId {
        self.insert(Obstacle::new(shape, transform))
    }

    /// Append an obstacle whose `on_hit` runs whenever it is the one reporting contact.
    pub fn add_interactive_obstacle(
        &mut self,
        shape: ObstacleShape,
        transform: Transform,
        on_hit: impl FnMut() + Send + Sync + 'static,
    ) -> ObstacleId {
        self.insert(Obstacle::new(shape, transform).with_callback(on_hit))
    }

    /// Append a fully built obstacle (label, callback).
    pub fn insert(&mut self, obstacle: Obstacle) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len());
        if !obstacle.is_well_formed() {
            warn!(
                "Obstacle {:?} ({}) has malformed shape or transform; it will never collide",
                id,
                obstacle.display_name()
            );
        }
        self.obstacles.push(obstacle);
        id
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| (ObstacleId(i), o))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// True if a sphere at `position` pokes out of the boundary disk.
    pub fn breaches_boundary(&self, position: Vec3, radius: f32) -> bool {
        if self.boundary_radius <= 0.0 {
            return false;
        }
        let distance_from_center = (position.x * position.x + position.z * position.z).sqrt();
        distance_from_center + radius > self.boundary_radius
    }

    /// Contact test for a sphere of `radius` at `position`. No side effects.
    pub fn query(&self, position: Vec3, radius: f32) -> ContactResult {
        if self.breaches_boundary(position, radius) {
            return ContactResult::Boundary;
        }

        self.obstacles
            .iter()
            .position(|o| o.contains(position, radius))
            .map_or(ContactResult::Clear, |i| ContactResult::Obstacle(ObstacleId(i)))
    }

    /// Run the callback of the obstacle named by `contact`, if it has one.
    ///
    /// Fires once per call; there is no debouncing across calls.
    pub fn notify(&mut self, contact: ContactResult) {
        let ContactResult::Obstacle(id) = contact else {
            return;
        };
        let Some(obstacle) = self.obstacles.get_mut(id.0) else {
            return;
        };

        debug!("Contact with obstacle {:?} ({})", id, obstacle.display_name());
        if let Some(on_hit) = obstacle.on_hit.as_mut() {
            on_hit();
        }
    }

    /// [`Self::query`] followed by [`Self::notify`].
    pub fn check(&mut self, position: Vec3, radius: f32) -> bool {
        let contact = self.query(position, radius);
        self.notify(contact);
        contact.is_contact()
    }
}
