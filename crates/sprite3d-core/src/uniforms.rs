//! GPU-ready camera data.

use glam::{Mat4, Vec3};

/// Camera matrices laid out for a uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// World to view.
    pub view: [[f32; 4]; 4],
    /// View to clip.
    pub projection: [[f32; 4]; 4],
    /// World to clip.
    pub view_projection: [[f32; 4]; 4],
    /// Clip to world.
    pub inv_view_projection: [[f32; 4]; 4],
    /// Eye position; `w` is padding.
    pub position: [f32; 4],
}

impl CameraUniforms {
    /// Packs camera matrices.
    pub fn new(
        view: Mat4,
        projection: Mat4,
        view_projection: Mat4,
        inv_view_projection: Mat4,
        position: Vec3,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_projection: view_projection.to_cols_array_2d(),
            inv_view_projection: inv_view_projection.to_cols_array_2d(),
            position: position.extend(1.0).to_array(),
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::new(
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Vec3::ZERO,
        )
    }
}
