//! World/screen transforms, picking and billboard sizing.

use glam::{Mat4, Vec2, Vec3, Vec4};
use sprite3d_core::{Projector, Ray, Result, Sprite3dError, WindowOrigin};

use super::Camera;
use crate::projection::Projection;

/// Homogeneous divide that treats `w == 0` as `w == 1`.
fn perspective_divide(clip: Vec4) -> (Vec3, f32) {
    let w = if clip.w == 0.0 { 1.0 } else { clip.w };
    (clip.truncate() / w, w)
}

impl<P: Projection> Camera<P> {
    /// Projects a world point into window coordinates.
    ///
    /// Returns `(screen_x, screen_y, depth, 1 / clip_w)`. X spans
    /// `0..viewport.x`, Y spans `0..viewport.y` in the camera's
    /// [`WindowOrigin`] convention, and depth spans the camera's
    /// [`DepthRange`](sprite3d_core::DepthRange) between the near and far
    /// clip planes. A clip-space `w` of zero is treated as one.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec4 {
        let mut screen = self.project_bottom_left(point);
        if self.window_origin == WindowOrigin::TopLeft {
            #[allow(clippy::cast_precision_loss)]
            let height = self.viewport.y as f32;
            screen.y = height - screen.y;
        }
        screen
    }

    #[allow(clippy::cast_precision_loss)]
    fn project_bottom_left(&self, point: Vec3) -> Vec4 {
        let half_width = self.viewport.x as f32 / 2.0;
        let half_height = self.viewport.y as f32 / 2.0;

        let (ndc, w) = perspective_divide(self.combined * point.extend(1.0));

        Vec4::new(
            half_width * ndc.x + half_width,
            half_height * ndc.y + half_height,
            self.depth_range.map_ndc(ndc.z),
            1.0 / w,
        )
    }

    /// Maps a window point `(x, y, depth)` back into world space, using the
    /// full viewport. Inverse of [`project`](Self::project).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn unproject(&self, screen: Vec3) -> Vec3 {
        let viewport = Vec4::new(0.0, 0.0, self.viewport.x as f32, self.viewport.y as f32);
        self.unproject_in(screen, viewport, &self.inv_projection_view)
    }

    /// Maps a window point back into world space through an explicit
    /// viewport rectangle `(x, y, width, height)` and inverse
    /// projection-view matrix.
    #[must_use]
    pub fn unproject_in(&self, screen: Vec3, viewport: Vec4, inv_projection_view: &Mat4) -> Vec3 {
        let x = screen.x - viewport.x;
        let y = match self.window_origin {
            WindowOrigin::BottomLeft => screen.y - viewport.y,
            WindowOrigin::TopLeft => viewport.w - (screen.y - viewport.y),
        };

        let range = self.depth_range;
        let ndc = Vec3::new(
            2.0 * x / viewport.z - 1.0,
            2.0 * y / viewport.w - 1.0,
            (2.0 * screen.z - (range.far + range.near)) / (range.far - range.near),
        );

        perspective_divide(*inv_projection_view * ndc.extend(1.0)).0
    }

    /// Like [`unproject`](Self::unproject) but fails when the combined
    /// matrix is singular.
    pub fn try_unproject(&self, screen: Vec3) -> Result<Vec3> {
        if self.degenerate {
            return Err(Sprite3dError::DegenerateTransform);
        }
        Ok(self.unproject(screen))
    }

    /// Builds a world-space ray through the screen point `(x, y)`.
    ///
    /// The same pixel is unprojected on the near and far planes; the ray
    /// starts at the near point and points at the far one.
    #[must_use]
    pub fn pick_ray(&self, x: f32, y: f32) -> Ray {
        let range = self.depth_range;
        let origin = self.unproject(Vec3::new(x, y, range.near));
        let far = self.unproject(Vec3::new(x, y, range.far));
        Ray::new(origin, (far - origin).normalize())
    }

    /// Like [`pick_ray`](Self::pick_ray) but fails when the combined
    /// matrix is singular.
    pub fn try_pick_ray(&self, x: f32, y: f32) -> Result<Ray> {
        if self.degenerate {
            return Err(Sprite3dError::DegenerateTransform);
        }
        Ok(self.pick_ray(x, y))
    }

    /// Camera-facing orientation: columns are right, up and the reversed
    /// view direction.
    ///
    /// Cached until the next recompute.
    #[must_use]
    pub fn billboard_matrix(&self) -> Mat4 {
        if self.billboard_matrix_dirty.get() {
            self.update_billboard_matrix();
        }
        self.billboard_matrix.get()
    }

    /// Whether the billboard matrix will be rebuilt on next use.
    #[must_use]
    pub fn billboard_matrix_dirty(&self) -> bool {
        self.billboard_matrix_dirty.get()
    }

    /// Rebuilds the billboard orientation from `direction` and `up`.
    pub fn update_billboard_matrix(&self) {
        let dir = -self.direction;
        let right = self.up.cross(dir).normalize();
        let up = dir.cross(right).normalize();

        self.billboard_matrix.set(Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            dir.extend(0.0),
            Vec4::W,
        ));
        self.billboard_matrix_dirty.set(false);
    }

    /// On-screen size in pixels of a billboard centred at `position`.
    ///
    /// `size` is in pixels at the camera's pixel scale. Opposite corners of
    /// the billboard are projected and their signed difference returned, so
    /// a billboard behind the camera reports a negative size. The sign does
    /// not depend on the window origin.
    #[must_use]
    pub fn point_size(&self, position: Vec3, size: Vec2) -> Vec2 {
        let billboard = self.billboard_matrix();
        let half = size / self.pixel_scale / 2.0;

        let corner = |offset: Vec2| {
            let world = billboard.transform_point3(offset.extend(0.0)) + position;
            self.project_bottom_left(world)
        };

        let bottom_left = corner(-half);
        let top_right = corner(half);

        Vec2::new(top_right.x - bottom_left.x, top_right.y - bottom_left.y)
    }
}

impl<P: Projection> Projector for Camera<P> {
    fn project(&self, point: Vec3) -> Vec4 {
        Camera::project(self, point)
    }

    fn point_size(&self, position: Vec3, size: Vec2) -> Vec2 {
        Camera::point_size(self, position, size)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sprite3d_core::{CameraOptions, DepthRange};

    use super::*;
    use crate::camera::tests::perspective_800x600;
    use crate::camera::{OrthographicCamera, PerspectiveCamera};

    fn ortho_800x600() -> OrthographicCamera {
        OrthographicCamera::orthographic(&CameraOptions::orthographic().with_viewport(800, 600))
    }

    #[test]
    fn test_project_center() {
        let camera = perspective_800x600();
        let screen = camera.project(Vec3::ZERO);
        assert!((screen.x - 400.0).abs() < 1e-3);
        assert!((screen.y - 300.0).abs() < 1e-3);
        assert!(screen.z > 0.0 && screen.z < 1.0);
        assert!((screen.w - 0.1).abs() < 1e-5, "1 / clip w at distance 10");
    }

    #[test]
    fn test_project_depth_range_equal_to_clip_planes() {
        let mut camera = perspective_800x600();
        camera.set_depth_range(DepthRange::new(1.0, 100.0));
        let screen = camera.project(Vec3::ZERO);
        assert!(screen.z > 1.0 && screen.z < 100.0);

        let on_near = camera.project(Vec3::new(0.0, 0.0, 9.0));
        assert!((on_near.z - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_orthographic_identity() {
        let camera = ortho_800x600();
        let screen = camera.project(Vec3::ZERO);
        assert!((screen.x - 400.0).abs() < 1e-4);
        assert!((screen.y - 300.0).abs() < 1e-4);

        // One world unit per pixel at zoom 1.
        let screen = camera.project(Vec3::new(100.0, 50.0, -5.0));
        assert!((screen.x - 500.0).abs() < 1e-3);
        assert!((screen.y - 350.0).abs() < 1e-3);
        assert!((screen.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_origin_top_left_flips_y() {
        let mut camera = ortho_800x600();
        camera.set_window_origin(WindowOrigin::TopLeft);
        let screen = camera.project(Vec3::new(0.0, 100.0, -5.0));
        assert!((screen.y - 200.0).abs() < 1e-3);

        let back = camera.unproject(screen.truncate());
        assert!(back.abs_diff_eq(Vec3::new(0.0, 100.0, -5.0), 1e-3));
    }

    #[test]
    fn test_project_zero_w_is_clamped() {
        let camera = perspective_800x600();
        // A point in the camera's own plane has clip w == 0.
        let screen = camera.project(Vec3::new(1.0, 0.0, 10.0));
        assert!(screen.x.is_finite() && screen.y.is_finite() && screen.z.is_finite());
        assert_eq!(screen.w, 1.0);
    }

    #[test]
    fn test_unproject_near_far_planes() {
        let camera = perspective_800x600();
        let near = camera.unproject(Vec3::new(400.0, 300.0, 0.0));
        let far = camera.unproject(Vec3::new(400.0, 300.0, 1.0));
        assert!(near.abs_diff_eq(Vec3::new(0.0, 0.0, 9.0), 1e-3));
        assert!(far.abs_diff_eq(Vec3::new(0.0, 0.0, -90.0), 0.05));
    }

    #[test]
    fn test_unproject_in_offset_viewport() {
        let camera = ortho_800x600();
        let viewport = Vec4::new(100.0, 50.0, 800.0, 600.0);
        let world = camera.unproject_in(
            Vec3::new(500.0, 350.0, 0.0),
            viewport,
            camera.inv_projection_view(),
        );
        assert!(world.abs_diff_eq(Vec3::ZERO, 1e-3));
    }

    #[test]
    fn test_try_unproject() {
        let mut camera = perspective_800x600();
        let screen = Vec3::new(400.0, 300.0, 0.0);
        let world = camera.try_unproject(screen).unwrap();
        assert_eq!(world, camera.unproject(screen));

        // Direction parallel to up collapses the view basis.
        camera.set_direction(Vec3::Y);
        assert!(matches!(
            camera.try_unproject(screen),
            Err(Sprite3dError::DegenerateTransform)
        ));
    }

    #[test]
    fn test_pick_ray_through_center() {
        let camera = perspective_800x600();
        let ray = camera.pick_ray(400.0, 300.0);
        assert!(ray.origin.abs_diff_eq(Vec3::new(0.0, 0.0, 9.0), 1e-3));
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn test_pick_ray_projects_back() {
        let mut camera = perspective_800x600();
        camera.look_at((3.0, -2.0, 0.0));

        for (sx, sy) in [(10.0, 20.0), (400.0, 300.0), (790.0, 580.0)] {
            let ray = camera.pick_ray(sx, sy);
            let start = camera.project(ray.origin);
            assert!((start.x - sx).abs() < 0.05 && (start.y - sy).abs() < 0.05);
            assert!(start.z.abs() < 1e-3);

            let far_point = camera.unproject(Vec3::new(sx, sy, 1.0));
            let end = camera.project(ray.at(far_point.distance(ray.origin)));
            assert!((end.x - sx).abs() < 0.05 && (end.y - sy).abs() < 0.05);
            assert!((end.z - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_billboard_matrix_cache() {
        let mut camera = perspective_800x600();
        assert!(camera.billboard_matrix_dirty());
        let m = camera.billboard_matrix();
        assert!(!camera.billboard_matrix_dirty());
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6), "camera facing -Z");

        camera.rotate(std::f32::consts::FRAC_PI_2, Vec3::Y);
        assert!(camera.billboard_matrix_dirty());
        let m = camera.billboard_matrix();
        assert!(m.z_axis.truncate().abs_diff_eq(Vec3::X, 1e-5));
        assert!(m.y_axis.truncate().abs_diff_eq(Vec3::Y, 1e-5));
        assert!(m.x_axis.truncate().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_point_size_shrinks_with_distance() {
        let camera = perspective_800x600();
        let size = Vec2::new(128.0, 128.0);
        let near = camera.point_size(Vec3::new(0.0, 0.0, 5.0), size);
        let far = camera.point_size(Vec3::new(0.0, 0.0, -40.0), size);
        assert!(near.x > 0.0 && near.y > 0.0);
        assert!(far.x > 0.0 && far.y > 0.0);
        assert!(near.x > far.x && near.y > far.y);
    }

    #[test]
    fn test_point_size_negative_behind_camera() {
        let camera = perspective_800x600();
        let size = camera.point_size(Vec3::new(0.0, 0.0, 20.0), Vec2::splat(128.0));
        assert!(size.x < 0.0 && size.y < 0.0);
    }

    #[test]
    fn test_point_size_orthographic_constant() {
        let camera = ortho_800x600();
        let size = Vec2::new(256.0, 128.0);
        let a = camera.point_size(Vec3::new(0.0, 0.0, -1.0), size);
        let b = camera.point_size(Vec3::new(0.0, 0.0, -80.0), size);
        assert!(a.abs_diff_eq(b, 1e-3));
        // 2x1 world units at one pixel per unit.
        assert!(a.abs_diff_eq(Vec2::new(2.0, 1.0), 1e-3));
    }

    #[test]
    fn test_point_size_ignores_window_origin() {
        let mut camera = perspective_800x600();
        let before = camera.point_size(Vec3::ZERO, Vec2::splat(64.0));
        camera.set_window_origin(WindowOrigin::TopLeft);
        let after = camera.point_size(Vec3::ZERO, Vec2::splat(64.0));
        assert!(before.abs_diff_eq(after, 1e-4));
    }

    #[test]
    fn test_projector_trait_matches_inherent() {
        let camera = perspective_800x600();
        let p = Vec3::new(1.0, 2.0, -3.0);
        let projector: &dyn Projector = &camera;
        assert_eq!(projector.project(p), camera.project(p));
        assert_eq!(
            projector.point_size(p, Vec2::ONE),
            camera.point_size(p, Vec2::ONE)
        );
    }

    proptest! {
        #[test]
        fn prop_unproject_inverts_project(
            fx in -0.9f32..0.9, fy in -0.9f32..0.9, depth in 2.0f32..60.0,
            cx in -20.0f32..20.0, cy in -20.0f32..20.0, cz in -20.0f32..20.0,
            top_left in any::<bool>(),
        ) {
            let mut camera = PerspectiveCamera::perspective(
                &CameraOptions::perspective().with_viewport(800, 600),
            );
            camera.set_position((cx, cy, cz));
            camera.look_at(Vec3::ZERO);
            if top_left {
                camera.set_window_origin(WindowOrigin::TopLeft);
            }
            prop_assume!(!camera.is_degenerate());

            // Build a point inside the frustum from view-space fractions.
            let half_h = (camera.fov().to_radians() / 2.0).tan() * depth;
            let half_w = half_h * 800.0 / 600.0;
            let right = camera.direction().cross(camera.up()).normalize();
            let p = camera.position()
                + camera.direction() * depth
                + right * (fx * half_w)
                + camera.up() * (fy * half_h);

            let back = camera.unproject(camera.project(p).truncate());
            // Depth precision falls off with the square of the distance.
            prop_assert!(back.distance(p) <= 1e-2 + 1e-4 * depth * depth, "{p:?} -> {back:?}");
        }

        #[test]
        fn prop_point_size_decreases_with_depth(d1 in 2.0f32..90.0, d2 in 2.0f32..90.0) {
            prop_assume!((d1 - d2).abs() > 0.5);
            let camera = perspective_800x600();
            let size = Vec2::splat(128.0);
            let at = |d: f32| camera.point_size(camera.position() + camera.direction() * d, size);
            let (near, far) = if d1 < d2 { (at(d1), at(d2)) } else { (at(d2), at(d1)) };
            prop_assert!(near.x > far.x && near.y > far.y);
        }
    }
}
