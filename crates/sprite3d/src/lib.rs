//! sprite3d-rs: camera-driven billboard sprites.
//!
//! A [`Camera`] projects 3D world points onto the screen, unprojects screen
//! points back into the world, builds pick rays for mouse/touch hit-testing,
//! and sizes camera-facing [`BillboardSprite`]s by perspective depth. The
//! sprites it owns write their screen position, scale, draw order and
//! visibility into a [`RenderProxy`] that a 2D renderer draws.
//!
//! # Quick Start
//!
//! ```
//! use sprite3d::*;
//!
//! let mut camera = PerspectiveCamera::perspective(
//!     &CameraOptions::perspective().with_viewport(800, 600),
//! );
//! camera.set_position((0.0, 0.0, 10.0));
//!
//! let id = camera.create(Vec3::ZERO, TextureFrame::new("ball", Vec2::splat(64.0)), true);
//!
//! // Once per frame:
//! camera.update(16.0, 16.0);
//! let proxy = camera.sprite(id).unwrap().proxy();
//! assert!((proxy.x - 400.0).abs() < 1e-3);
//!
//! // Picking:
//! let ray = camera.pick_ray(400.0, 300.0);
//! assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4));
//! ```
//!
//! # Architecture
//!
//! - `sprite3d-core`: errors, options, rays, and the [`Projector`] /
//!   [`SceneHost`] traits
//! - `sprite3d-structures`: [`BillboardSprite`] and [`SpriteSet`]
//! - `sprite3d-render`: [`Camera`] and its [`Projection`] policies

// Re-export core types
pub use sprite3d_core::{
    error::{Result, Sprite3dError},
    host::{NullHost, RenderProxy, SceneHost, SpriteId, TextureFrame},
    options::{CameraOptions, DepthRange, WindowOrigin},
    pick::{Projector, Ray},
    uniforms::CameraUniforms,
    Mat4, Quat, Vec2, Vec3, Vec4,
};

// Re-export structures
pub use sprite3d_structures::{scatter, BillboardSprite, SpriteSet};

// Re-export render types
pub use sprite3d_render::{
    Camera, Orthographic, OrthographicCamera, Perspective, PerspectiveCamera, Projection,
};

pub use glam::{UVec2, UVec3};

/// Installs `env_logger` as the `log` backend, configured from `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("sprite3d-rs logging initialized");
    }
}
