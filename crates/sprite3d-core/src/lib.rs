//! Core abstractions for sprite3d-rs.
//!
//! This crate provides the types shared by cameras and billboard sprites:
//! - [`Projector`] trait, the seam through which sprites query a camera
//! - [`SceneHost`] trait for the display/update lists that draw sprites
//! - [`CameraOptions`] configuration and [`Ray`] picking rays
//! - The crate-wide [`Sprite3dError`] type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod host;
pub mod options;
pub mod pick;
pub mod uniforms;

pub use error::{Result, Sprite3dError};
pub use host::{NullHost, RenderProxy, SceneHost, SpriteId, TextureFrame};
pub use options::{CameraOptions, DepthRange, WindowOrigin};
pub use pick::{Projector, Ray};
pub use uniforms::CameraUniforms;

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
