//! Error types for sprite3d-rs.

use thiserror::Error;

use crate::host::SpriteId;

/// The main error type for sprite3d-rs operations.
///
/// The per-frame camera operations (`project`, `unproject`, `pick_ray`,
/// `point_size`) never fail; they degrade numerically instead. These
/// variants are produced by lookups, configuration, and the checked
/// `try_*` camera variants.
#[derive(Error, Debug)]
pub enum Sprite3dError {
    /// The camera does not own a sprite with this id.
    #[error("sprite {0} not found")]
    SpriteNotFound(SpriteId),

    /// The combined projection-view matrix is singular and cannot be inverted.
    #[error("degenerate transform: combined projection-view matrix is singular")]
    DegenerateTransform,

    /// A viewport with a zero dimension.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Clip planes that cannot produce a projection.
    #[error("invalid clip range: near {near}, far {far}")]
    InvalidClipRange { near: f32, far: f32 },

    /// A pixel scale that is zero, negative or not finite.
    #[error("invalid pixel scale {0}")]
    InvalidPixelScale(f32),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for sprite3d-rs operations.
pub type Result<T> = std::result::Result<T, Sprite3dError>;
