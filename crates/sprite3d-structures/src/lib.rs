//! Sprite structures for sprite3d-rs.
//!
//! This crate provides the objects a camera drives every frame:
//! - [`BillboardSprite`], a camera-facing sprite with a 2D render proxy
//! - [`SpriteSet`], the id-keyed collection a camera owns
//! - [`scatter`] helpers for laying out many sprites at once

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod billboard;
pub mod scatter;
pub mod sprite_set;

pub use billboard::BillboardSprite;
pub use sprite_set::SpriteSet;
