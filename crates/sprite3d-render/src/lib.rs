//! Camera backend for sprite3d-rs.
//!
//! This crate provides the camera that turns 3D positions into screen
//! coordinates and drives billboard sprites:
//! - [`Camera`] with world/screen transforms, pick rays and billboard sizing
//! - [`Projection`] policies: [`Perspective`] and [`Orthographic`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Mutators return &mut Self for chaining; callers may ignore it
#![allow(clippy::return_self_not_must_use)]

pub mod camera;
pub mod projection;

pub use camera::{Camera, OrthographicCamera, PerspectiveCamera};
pub use projection::{Orthographic, Perspective, Projection};
