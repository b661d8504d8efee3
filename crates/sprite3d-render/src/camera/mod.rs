//! Camera state and matrix recomputation.
//!
//! A [`Camera`] is a pure function of its position, orientation, viewport
//! and projection parameters. Every mutator rebuilds all derived matrices
//! (projection, view, combined, inverse) before returning, then re-projects
//! the sprites the camera owns, so `project`/`unproject`/`pick_ray` never
//! see stale matrices. Mutators return `&mut Self` for chaining.

mod children;
mod transform;

use std::cell::Cell;
use std::fmt;

use glam::{Mat4, Quat, UVec2, Vec3};
use sprite3d_core::{
    CameraOptions, CameraUniforms, DepthRange, NullHost, Result, SceneHost, Sprite3dError,
    WindowOrigin,
};
use sprite3d_structures::SpriteSet;

use crate::projection::{Orthographic, Perspective, Projection};

/// A camera with a field-of-view projection.
pub type PerspectiveCamera = Camera<Perspective>;

/// A camera with a fixed-viewport projection.
pub type OrthographicCamera = Camera<Orthographic>;

/// A 3D camera that projects world points to the screen and drives the
/// billboard sprites it owns.
///
/// `P` supplies the projection matrix; see [`Perspective`] and
/// [`Orthographic`].
pub struct Camera<P: Projection> {
    name: String,
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    near: f32,
    far: f32,
    depth_range: DepthRange,
    viewport: UVec2,
    window_origin: WindowOrigin,
    pixel_scale: f32,
    projection_policy: P,

    projection: Mat4,
    view: Mat4,
    combined: Mat4,
    inv_projection_view: Mat4,
    degenerate: bool,

    billboard_matrix: Cell<Mat4>,
    billboard_matrix_dirty: Cell<bool>,

    children: SpriteSet,
    host: Box<dyn SceneHost>,
}

impl<P: Projection> Camera<P> {
    /// Creates a camera at the origin looking down -Z with +Y up.
    ///
    /// The projection-specific fields of `options` (`fov_degrees`, `zoom`)
    /// are ignored; `projection` is used as given.
    pub fn new(projection: P, options: &CameraOptions) -> Self {
        let mut camera = Self {
            name: options.name.clone(),
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            near: options.near,
            far: options.far,
            depth_range: options.depth_range,
            viewport: UVec2::new(options.viewport_width, options.viewport_height),
            window_origin: options.window_origin,
            pixel_scale: options.pixel_scale,
            projection_policy: projection,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            combined: Mat4::IDENTITY,
            inv_projection_view: Mat4::IDENTITY,
            degenerate: false,
            billboard_matrix: Cell::new(Mat4::IDENTITY),
            billboard_matrix_dirty: Cell::new(true),
            children: SpriteSet::new(),
            host: Box::new(NullHost),
        };
        camera.recompute();
        camera
    }

    /// Replaces the display/update-list collaborator.
    #[must_use]
    pub fn with_host(mut self, host: Box<dyn SceneHost>) -> Self {
        self.host = host;
        self
    }

    /// Replaces the display/update-list collaborator.
    ///
    /// Sprites already owned are not re-registered with the new host.
    pub fn set_host(&mut self, host: Box<dyn SceneHost>) -> &mut Self {
        self.host = host;
        self
    }

    // ===== FRAME ENTRY =====

    /// Per-frame tick from the host driver. Timing arguments are unused;
    /// the camera is fully recomputed every tick.
    pub fn update(&mut self, _timestep_ms: f64, _delta_ms: f64) -> &mut Self {
        self.recompute()
    }

    /// Rebuilds every derived matrix and re-projects all owned sprites.
    ///
    /// When the projection policy cannot build a matrix (zero-sized
    /// viewport) nothing is touched and the previous matrices stay in place.
    pub fn recompute(&mut self) -> &mut Self {
        let Some(projection) = self
            .projection_policy
            .projection_matrix(self.viewport, self.near, self.far)
        else {
            log::debug!(
                "camera '{}': {}x{} viewport, projection not rebuilt",
                self.name,
                self.viewport.x,
                self.viewport.y
            );
            return self;
        };

        self.projection = projection;
        self.view = Mat4::look_at_rh(self.position, self.position + self.direction, self.up);
        self.combined = self.projection * self.view;
        self.invert_combined();
        self.billboard_matrix_dirty.set(true);

        self.update_children()
    }

    fn invert_combined(&mut self) {
        let det = self.combined.determinant();
        if det == 0.0 || !det.is_finite() {
            // Same as an in-place invert that refuses singular input.
            if !self.degenerate {
                log::warn!(
                    "camera '{}': combined matrix is singular, unproject and pick rays are meaningless",
                    self.name
                );
            }
            self.degenerate = true;
            self.inv_projection_view = self.combined;
        } else {
            self.degenerate = false;
            self.inv_projection_view = self.combined.inverse();
        }
    }

    // ===== MUTATORS =====

    /// Moves the camera to `position`.
    pub fn set_position(&mut self, position: impl Into<Vec3>) -> &mut Self {
        self.position = position.into();
        self.recompute()
    }

    /// Moves the camera by `offset`.
    pub fn translate(&mut self, offset: impl Into<Vec3>) -> &mut Self {
        self.position += offset.into();
        self.recompute()
    }

    /// Sets the X coordinate of the position.
    pub fn set_x(&mut self, x: f32) -> &mut Self {
        self.position.x = x;
        self.recompute()
    }

    /// Sets the Y coordinate of the position.
    pub fn set_y(&mut self, y: f32) -> &mut Self {
        self.position.y = y;
        self.recompute()
    }

    /// Sets the Z coordinate of the position.
    pub fn set_z(&mut self, z: f32) -> &mut Self {
        self.position.z = z;
        self.recompute()
    }

    /// Sets the view direction as given, without re-orthogonalizing `up`.
    pub fn set_direction(&mut self, direction: impl Into<Vec3>) -> &mut Self {
        self.direction = direction.into();
        self.recompute()
    }

    /// Sets the up vector as given. It is used as the reference for the
    /// next [`look_at`](Self::look_at).
    pub fn set_up(&mut self, up: impl Into<Vec3>) -> &mut Self {
        self.up = up.into();
        self.recompute()
    }

    /// Points the camera at `target`.
    ///
    /// `up` is re-orthogonalized against the new direction starting from
    /// the current `up`: `right = dir x up`, then `up = right x dir`.
    /// A target at the camera position leaves the orientation unchanged;
    /// an `up` parallel to the new direction is replaced by an arbitrary
    /// perpendicular.
    pub fn look_at(&mut self, target: impl Into<Vec3>) -> &mut Self {
        let Some(direction) = (target.into() - self.position).try_normalize() else {
            log::debug!("camera '{}': look_at target is the camera position", self.name);
            return self.recompute();
        };

        let right = direction
            .cross(self.up)
            .try_normalize()
            .unwrap_or_else(|| direction.any_orthonormal_vector());

        self.direction = direction;
        self.up = right.cross(direction).normalize();
        self.recompute()
    }

    /// Rotates `direction` and `up` by `radians` around `axis`.
    pub fn rotate(&mut self, radians: f32, axis: impl Into<Vec3>) -> &mut Self {
        self.rotate_basis(radians, axis.into());
        self.recompute()
    }

    /// Rotates the view basis by `radians` around `axis` with the camera
    /// moved to `point`, then moves it back by the same offset.
    ///
    /// The position ends where it started; only `direction` and `up`
    /// change. Use [`orbit`](Self::orbit) to move the eye around `point`.
    pub fn rotate_around(
        &mut self,
        point: impl Into<Vec3>,
        radians: f32,
        axis: impl Into<Vec3>,
    ) -> &mut Self {
        let offset = point.into() - self.position;
        self.position += offset;
        self.rotate_basis(radians, axis.into());
        self.position -= offset;
        self.recompute()
    }

    /// Orbits the camera by `radians` around the line through `point`
    /// along `axis`, rotating the view basis by the same angle.
    pub fn orbit(
        &mut self,
        point: impl Into<Vec3>,
        radians: f32,
        axis: impl Into<Vec3>,
    ) -> &mut Self {
        let point = point.into();
        let rotation = self.rotate_basis(radians, axis.into());
        self.position = point + rotation * (self.position - point);
        self.recompute()
    }

    fn rotate_basis(&mut self, radians: f32, axis: Vec3) -> Quat {
        let rotation = Quat::from_axis_angle(axis.normalize_or_zero(), radians);
        self.direction = rotation * self.direction;
        self.up = rotation * self.up;
        rotation
    }

    /// Sets the viewport size in pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> &mut Self {
        self.viewport = UVec2::new(width, height);
        self.recompute()
    }

    /// Like [`set_viewport`](Self::set_viewport) but rejects a zero dimension
    /// instead of keeping stale matrices.
    pub fn try_set_viewport(&mut self, width: u32, height: u32) -> Result<&mut Self> {
        if width == 0 || height == 0 {
            return Err(Sprite3dError::InvalidViewport { width, height });
        }
        Ok(self.set_viewport(width, height))
    }

    /// Sets the world-unit to pixel ratio used for billboard sizes.
    pub fn set_pixel_scale(&mut self, pixel_scale: f32) -> &mut Self {
        self.pixel_scale = pixel_scale;
        self.recompute()
    }

    /// Sets the clip planes used to build the projection matrix.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> &mut Self {
        self.near = near;
        self.far = far;
        self.recompute()
    }

    /// Sets the window-space depth range written by `project`.
    pub fn set_depth_range(&mut self, range: DepthRange) -> &mut Self {
        self.depth_range = range;
        self.recompute()
    }

    /// Sets the screen Y convention.
    pub fn set_window_origin(&mut self, origin: WindowOrigin) -> &mut Self {
        self.window_origin = origin;
        self.recompute()
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    // ===== GETTERS =====

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// X coordinate of the position.
    #[must_use]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Y coordinate of the position.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Z coordinate of the position.
    #[must_use]
    pub fn z(&self) -> f32 {
        self.position.z
    }

    /// View direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Near clip plane.
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip plane.
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Window-space depth range.
    #[must_use]
    pub fn depth_range(&self) -> DepthRange {
        self.depth_range
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Screen Y convention.
    #[must_use]
    pub fn window_origin(&self) -> WindowOrigin {
        self.window_origin
    }

    /// World-unit to pixel ratio.
    #[must_use]
    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }

    /// The projection policy.
    #[must_use]
    pub fn projection_policy(&self) -> &P {
        &self.projection_policy
    }

    /// View to clip matrix.
    #[must_use]
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// World to view matrix.
    #[must_use]
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Combined `projection * view` matrix.
    #[must_use]
    pub fn combined(&self) -> &Mat4 {
        &self.combined
    }

    /// Inverse of the combined matrix. Equal to the combined matrix when
    /// that is singular.
    #[must_use]
    pub fn inv_projection_view(&self) -> &Mat4 {
        &self.inv_projection_view
    }

    /// Whether the combined matrix was singular at the last recompute.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Matrices packed for a GPU uniform buffer.
    #[must_use]
    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms::new(
            self.view,
            self.projection,
            self.combined,
            self.inv_projection_view,
            self.position,
        )
    }

    fn mutate_policy(&mut self, f: impl FnOnce(&mut P)) -> &mut Self {
        f(&mut self.projection_policy);
        self.recompute()
    }
}

impl Camera<Perspective> {
    /// Creates a perspective camera from options.
    pub fn perspective(options: &CameraOptions) -> Self {
        Self::new(Perspective::from_degrees(options.fov_degrees), options)
    }

    /// Sets the vertical field of view in degrees.
    pub fn set_fov(&mut self, degrees: f32) -> &mut Self {
        self.mutate_policy(|p| p.set_fov_degrees(degrees))
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.projection_policy.fov_degrees()
    }
}

impl Camera<Orthographic> {
    /// Creates an orthographic camera from options.
    pub fn orthographic(options: &CameraOptions) -> Self {
        Self::new(Orthographic::new(options.zoom), options)
    }

    /// Sets the viewport multiplier.
    pub fn set_zoom(&mut self, zoom: f32) -> &mut Self {
        self.mutate_policy(|p| p.set_zoom(zoom))
    }

    /// Viewport multiplier.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.projection_policy.zoom()
    }
}

impl<P: Projection + fmt::Debug> fmt::Debug for Camera<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("up", &self.up)
            .field("near", &self.near)
            .field("far", &self.far)
            .field("viewport", &self.viewport)
            .field("projection_policy", &self.projection_policy)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
