//! Interfaces to the 2D scene that displays billboard sprites.
//!
//! The camera does not render anything. Each sprite writes its projected
//! screen state into a [`RenderProxy`], and the camera tells a [`SceneHost`]
//! when proxies appear and disappear so the host can add them to (or drop
//! them from) its display and update lists.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of a sprite within the camera that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteId(pub u64);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Texture reference handed to the host when a sprite is registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureFrame {
    /// Texture key in the host's texture cache.
    pub key: String,
    /// Optional frame name within the texture.
    pub frame: Option<String>,
    /// Frame size in pixels.
    pub size: Vec2,
}

impl TextureFrame {
    /// Creates a texture reference for a whole texture.
    pub fn new(key: impl Into<String>, size: Vec2) -> Self {
        Self {
            key: key.into(),
            frame: None,
            size,
        }
    }

    /// Selects a named frame within the texture.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }
}

/// The 2D renderable state a billboard sprite writes once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderProxy {
    /// Screen X in pixels.
    pub x: f32,
    /// Screen Y in pixels.
    pub y: f32,
    /// Window-space depth.
    pub z: f32,
    /// `1 / clip.w`, for perspective-correct interpolation.
    pub w: f32,
    /// Horizontal scale.
    pub scale_x: f32,
    /// Vertical scale.
    pub scale_y: f32,
    /// Draw-order key; larger values draw on top.
    pub depth: f32,
    /// Whether the host should draw this proxy.
    pub visible: bool,
}

impl Default for RenderProxy {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            depth: 0.0,
            visible: true,
        }
    }
}

/// Display-list and update-list collaborator.
///
/// Called by the camera when sprites are created, added, removed or the
/// camera is destroyed.
pub trait SceneHost {
    /// Registers a sprite's proxy with the display and update lists.
    fn add(&mut self, id: SpriteId, texture: &TextureFrame);

    /// Unregisters a sprite's proxy from the display and update lists.
    fn remove(&mut self, id: SpriteId);
}

/// A host that ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl SceneHost for NullHost {
    fn add(&mut self, _id: SpriteId, _texture: &TextureFrame) {}

    fn remove(&mut self, _id: SpriteId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_defaults() {
        let proxy = RenderProxy::default();
        assert!(proxy.visible);
        assert_eq!(proxy.scale_x, 1.0);
        assert_eq!(proxy.scale_y, 1.0);
        assert_eq!(proxy.w, 1.0);
    }

    #[test]
    fn test_texture_frame_builder() {
        let tex = TextureFrame::new("atlas", Vec2::new(64.0, 32.0)).with_frame("coin");
        assert_eq!(tex.key, "atlas");
        assert_eq!(tex.frame.as_deref(), Some("coin"));
        assert_eq!(tex.size, Vec2::new(64.0, 32.0));
    }

    #[test]
    fn test_sprite_id_display() {
        assert_eq!(SpriteId(3).to_string(), "#3");
    }
}
