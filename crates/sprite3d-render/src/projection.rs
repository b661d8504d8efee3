//! Projection policies.
//!
//! A camera's projection matrix is the only thing that differs between
//! perspective and orthographic cameras; everything else (view matrix,
//! projection to the screen, picking, billboards) is shared. Both policies
//! build OpenGL-style clip space (NDC z in `[-1, 1]`).

use glam::{Mat4, UVec2};

/// Builds a camera's projection matrix.
pub trait Projection {
    /// Returns the projection for a viewport in pixels and clip planes, or
    /// `None` when no matrix can be built (zero-sized viewport). The camera
    /// keeps its previous matrices in that case.
    fn projection_matrix(&self, viewport: UVec2, near: f32, far: f32) -> Option<Mat4>;
}

/// Field-of-view based projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    fov: f32,
}

impl Perspective {
    /// Creates a perspective projection from a vertical field of view in degrees.
    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            fov: degrees.to_radians(),
        }
    }

    /// Creates a perspective projection from a vertical field of view in radians.
    pub fn from_radians(radians: f32) -> Self {
        Self { fov: radians }
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets the field of view in degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fov = degrees.to_radians();
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::from_degrees(80.0)
    }
}

impl Projection for Perspective {
    #[allow(clippy::cast_precision_loss)]
    fn projection_matrix(&self, viewport: UVec2, near: f32, far: f32) -> Option<Mat4> {
        if viewport.x == 0 || viewport.y == 0 {
            return None;
        }
        let aspect = viewport.x as f32 / viewport.y as f32;
        Some(Mat4::perspective_rh_gl(
            self.fov,
            aspect,
            near.abs(),
            far.abs(),
        ))
    }
}

/// Fixed-viewport projection: one world unit per pixel, times `zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    zoom: f32,
}

impl Orthographic {
    /// Creates an orthographic projection with the given zoom.
    pub fn new(zoom: f32) -> Self {
        Self { zoom }
    }

    /// Viewport multiplier.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Sets the viewport multiplier.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }
}

impl Default for Orthographic {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Projection for Orthographic {
    #[allow(clippy::cast_precision_loss)]
    fn projection_matrix(&self, viewport: UVec2, near: f32, far: f32) -> Option<Mat4> {
        if viewport.x == 0 || viewport.y == 0 {
            return None;
        }
        let half_width = self.zoom * viewport.x as f32 / 2.0;
        let half_height = self.zoom * viewport.y as f32 / 2.0;
        Some(Mat4::orthographic_rh_gl(
            -half_width,
            half_width,
            -half_height,
            half_height,
            near,
            far,
        ))
    }
}
