//! Camera-facing billboard sprites.

use glam::{Vec2, Vec3, Vec4};
use sprite3d_core::{Projector, RenderProxy, TextureFrame};

/// A flat sprite placed in 3D space that always faces the camera.
///
/// The camera calls [`BillboardSprite::project`] after every recompute; the
/// sprite then writes screen position, scale, draw order and visibility
/// into its [`RenderProxy`] for the host's 2D renderer.
#[derive(Debug, Clone)]
pub struct BillboardSprite {
    position: Vec4,
    size: Vec2,
    scale: Vec2,
    visible: bool,
    /// Whether projection writes the horizontal scale to the proxy.
    pub adjust_scale_x: bool,
    /// Whether projection writes the vertical scale to the proxy.
    pub adjust_scale_y: bool,
    texture: TextureFrame,
    proxy: RenderProxy,
}

impl BillboardSprite {
    /// Creates a sprite at `position`. Its size is the texture frame size.
    pub fn new(position: Vec3, texture: TextureFrame) -> Self {
        Self {
            position: position.extend(0.0),
            size: texture.size,
            scale: Vec2::ONE,
            visible: true,
            adjust_scale_x: true,
            adjust_scale_y: true,
            texture,
            proxy: RenderProxy::default(),
        }
    }

    /// World-space position. `w` is reserved.
    #[must_use]
    pub fn position(&self) -> Vec4 {
        self.position
    }

    /// World-space position without the reserved component.
    #[must_use]
    pub fn position3(&self) -> Vec3 {
        self.position.truncate()
    }

    /// Moves the sprite, keeping the reserved `w` component.
    ///
    /// The proxy is refreshed on the owning camera's next recompute.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.extend(self.position.w);
    }

    /// Replaces all four position components.
    pub fn set_position4(&mut self, position: Vec4) {
        self.position = position;
    }

    /// Size in pixels at the camera's pixel scale.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Sets the size in pixels at the camera's pixel scale.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// The signed on-screen size computed by the last projection.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Whether the sprite wants to be drawn.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the sprite. A sprite that projects to a collapsed
    /// or flipped size stays hidden regardless.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.proxy.visible = visible && self.scale.x > 0.0 && self.scale.y > 0.0;
    }

    /// Texture reference given to the host.
    #[must_use]
    pub fn texture(&self) -> &TextureFrame {
        &self.texture
    }

    /// The 2D renderable state written by the last projection.
    #[must_use]
    pub fn proxy(&self) -> &RenderProxy {
        &self.proxy
    }

    /// Refreshes the proxy from `camera`.
    pub fn project<P: Projector + ?Sized>(&mut self, camera: &P) {
        let position = self.position3();
        let screen = camera.project(position);

        self.proxy.x = screen.x;
        self.proxy.y = screen.y;
        self.proxy.z = screen.z;
        self.proxy.w = screen.w;

        self.scale = camera.point_size(position, self.size);

        // Also catches NaN sizes from a degenerate camera.
        let facing = self.scale.x > 0.0 && self.scale.y > 0.0;
        if !facing {
            self.proxy.visible = false;
            return;
        }

        self.proxy.visible = self.visible;
        if self.adjust_scale_x {
            self.proxy.scale_x = self.scale.x;
        }
        if self.adjust_scale_y {
            self.proxy.scale_y = self.scale.y;
        }
        // Nearer sprites have smaller z and so draw on top.
        self.proxy.depth = -self.proxy.z;
    }
}
