//! Configuration options for cameras.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, Sprite3dError};

/// Window-space depth range that normalized device Z is mapped into.
///
/// This is independent of the clip planes used to build the projection
/// matrix. Setting it equal to the clip planes reproduces a single shared
/// near/far pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    /// Depth written for points on the near clip plane.
    pub near: f32,
    /// Depth written for points on the far clip plane.
    pub far: f32,
}

impl DepthRange {
    /// Creates a depth range.
    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// Maps normalized device Z in `[-1, 1]` into this range.
    #[must_use]
    pub fn map_ndc(self, ndc_z: f32) -> f32 {
        (self.far - self.near) / 2.0 * ndc_z + (self.far + self.near) / 2.0
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: 1.0,
        }
    }
}

/// Which screen corner is the origin of window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WindowOrigin {
    /// Y grows upward from the bottom edge, matching NDC.
    #[default]
    BottomLeft,
    /// Y grows downward from the top edge.
    TopLeft,
}

/// Camera configuration.
///
/// Every field can be changed later through the camera's setters; these
/// are the starting values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Display name.
    pub name: String,

    /// World units to pixels. With the default of 128, a 256x128 px
    /// texture is 2x1 world units.
    pub pixel_scale: f32,

    /// Near clip plane distance.
    pub near: f32,

    /// Far clip plane distance.
    pub far: f32,

    /// Window-space depth range written by `project`.
    pub depth_range: DepthRange,

    /// Viewport width in pixels.
    pub viewport_width: u32,

    /// Viewport height in pixels.
    pub viewport_height: u32,

    /// Screen Y convention shared by `project` and `unproject`.
    pub window_origin: WindowOrigin,

    /// Vertical field of view in degrees (perspective cameras).
    pub fov_degrees: f32,

    /// Viewport multiplier (orthographic cameras).
    pub zoom: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self::perspective()
    }
}

impl CameraOptions {
    /// Defaults for a perspective camera: 80 degree FOV, clip planes 1..100.
    pub fn perspective() -> Self {
        Self {
            name: String::new(),
            pixel_scale: 128.0,
            near: 1.0,
            far: 100.0,
            depth_range: DepthRange::default(),
            viewport_width: 0,
            viewport_height: 0,
            window_origin: WindowOrigin::BottomLeft,
            fov_degrees: 80.0,
            zoom: 1.0,
        }
    }

    /// Defaults for an orthographic camera: clip planes 0..100, zoom 1.
    pub fn orthographic() -> Self {
        Self {
            near: 0.0,
            ..Self::perspective()
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the viewport size in pixels.
    #[must_use]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Sets the clip planes.
    #[must_use]
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Sets the window-space depth range.
    #[must_use]
    pub fn with_depth_range(mut self, range: DepthRange) -> Self {
        self.depth_range = range;
        self
    }

    /// Sets the pixel scale.
    #[must_use]
    pub fn with_pixel_scale(mut self, pixel_scale: f32) -> Self {
        self.pixel_scale = pixel_scale;
        self
    }

    /// Sets the window origin convention.
    #[must_use]
    pub fn with_window_origin(mut self, origin: WindowOrigin) -> Self {
        self.window_origin = origin;
        self
    }

    /// Sets the field of view in degrees.
    #[must_use]
    pub fn with_fov_degrees(mut self, degrees: f32) -> Self {
        self.fov_degrees = degrees;
        self
    }

    /// Sets the orthographic zoom.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Checks that the values can produce a usable camera.
    ///
    /// A zero viewport is accepted here; cameras simply skip projection
    /// rebuilds until a size is set.
    pub fn validate(&self) -> Result<()> {
        if !self.near.is_finite() || !self.far.is_finite() || self.near == self.far {
            return Err(Sprite3dError::InvalidClipRange {
                near: self.near,
                far: self.far,
            });
        }
        if !self.pixel_scale.is_finite() || self.pixel_scale <= 0.0 {
            return Err(Sprite3dError::InvalidPixelScale(self.pixel_scale));
        }
        Ok(())
    }

    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&text)?;
        log::debug!("loaded camera options from {}", path.display());
        Ok(options)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
