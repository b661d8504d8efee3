//! Picking rays and the projection seam shared by cameras and sprites.

use glam::{Vec2, Vec3, Vec4};

/// A world-space ray cast through a screen pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Point on the near clip plane.
    pub origin: Vec3,
    /// Unit direction towards the far clip plane.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray. `direction` is stored as given.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Returns the point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns the parameter of the point on the ray closest to `point`.
    #[must_use]
    pub fn closest_t(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.direction)
    }

    /// Distance from `point` to the infinite line through the ray.
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        point.distance(self.at(self.closest_t(point)))
    }
}

/// Something that maps world space onto the screen.
///
/// Implemented by cameras; consumed by billboard sprites when they refresh
/// their render proxy.
pub trait Projector {
    /// Projects a world point to window coordinates.
    ///
    /// Returns `(screen_x, screen_y, depth, 1 / clip_w)`.
    fn project(&self, point: Vec3) -> Vec4;

    /// On-screen size in pixels of a camera-facing billboard of `size`
    /// (in pixels at the camera's pixel scale) centred at `position`.
    ///
    /// Components are signed; a non-positive component means the
    /// billboard is flipped or collapsed.
    fn point_size(&self, position: Vec3, size: Vec2) -> Vec2;
}
